//! CLI definition and handler

mod options;

pub use options::{validate_revision, Options};

use crate::config::{load_project_config, LanguageTable};
use crate::filter::FileFilter;
use crate::git::{self, Dispatcher, GitCli};
use crate::reporters;
use crate::stats;
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// gitfame - who owns the lines of a git repository
#[derive(Parser, Debug)]
#[command(name = "gitfame")]
#[command(
    version,
    about = "Show per-author line, commit and file ownership of a git repository",
    long_about = "gitfame blames every tracked file at a revision and reports, for each \
author, how many lines they own, how many distinct commits those lines come from, \
and how many files they touch.\n\n\
Defaults can be set per repository in gitfame.toml ([defaults] table).",
    after_help = "\
Examples:
  gitfame                                        Stats for the current repository
  gitfame --repository ../proj --order-by commits
  gitfame --languages rust,markdown --format json
  gitfame --exclude 'vendor/*' --restrict-to '*.go'
  gitfame --revision v1.0 --use-committer --format csv"
)]
pub struct Cli {
    /// Path to the git repository
    #[arg(long, default_value = ".")]
    pub repository: PathBuf,

    /// Revision to attribute lines at
    #[arg(long, default_value = "HEAD")]
    pub revision: String,

    /// Group by committer instead of author
    #[arg(long)]
    pub use_committer: bool,

    /// Sort key: lines, commits or files [default: lines]
    #[arg(long, value_parser = ["lines", "commits", "files"])]
    pub order_by: Option<String>,

    /// Output format: tabular, csv, json or json-lines [default: tabular]
    #[arg(long, value_parser = reporters::OutputFormat::NAMES)]
    pub format: Option<String>,

    /// Only include files with these extensions (e.g. .go,.rs)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Only include files of these languages (e.g. go,markdown)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Glob patterns of files to exclude
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Glob patterns files must match to be included
    #[arg(long, value_delimiter = ',')]
    pub restrict_to: Vec<String>,

    /// Number of parallel blame workers (1-64) [default: 8]
    #[arg(long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template("{spinner} blaming [{bar:30}] {pos}/{len} files")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

/// Run the whole pipeline and print the result to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();
    let project = load_project_config(&cli.repository);
    let opts = Options::resolve(cli, project.defaults).context("invalid options")?;
    let languages = LanguageTable::builtin()?;

    let files = git::list_files(&opts.repository, &opts.revision).context("listing files")?;
    let filter = FileFilter::new(&opts.filter, &languages)?;
    for lang in filter.unknown_languages() {
        warn!("unknown or extension-less language: {:?}", lang);
    }
    let files = filter.apply(files);
    info!("blaming {} files at {}", files.len(), opts.revision);

    let bar = progress_bar(files.len());
    let on_progress = |done: usize, _total: usize| bar.set_position(done as u64);
    let store = Dispatcher::new(&GitCli::new(), &opts.repository, &opts.revision)
        .with_identity(opts.identity)
        .with_workers(opts.workers)
        .run(&files, Some(&on_progress));
    bar.finish_and_clear();
    let store = store.context("blaming files")?;

    let ranked = stats::rank(store.author_stats(), opts.order_by);
    info!(
        "{} authors across {} files in {:.2?}",
        ranked.len(),
        files.len(),
        start.elapsed()
    );

    let mut out = reporters::report(&ranked, opts.format)?;
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    std::io::stdout()
        .lock()
        .write_all(out.as_bytes())
        .context("printing results")?;
    Ok(())
}
