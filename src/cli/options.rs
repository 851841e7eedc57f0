//! Resolution and validation of command-line options
//!
//! Flags given on the command line win; anything left unset falls back to
//! the `[defaults]` table of `gitfame.toml`, then to built-in defaults.

use super::Cli;
use crate::config::CliDefaults;
use crate::filter::{compile_glob, FilterOptions};
use crate::git::{Identity, DEFAULT_WORKERS};
use crate::reporters::OutputFormat;
use crate::stats::SortKey;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::path::PathBuf;

/// Fully resolved run options.
#[derive(Debug, Clone)]
pub struct Options {
    pub repository: PathBuf,
    pub revision: String,
    pub identity: Identity,
    pub order_by: SortKey,
    pub format: OutputFormat,
    pub filter: FilterOptions,
    pub workers: usize,
}

fn or_default(cli: Vec<String>, config: Vec<String>) -> Vec<String> {
    if cli.is_empty() {
        config
    } else {
        cli
    }
}

impl Options {
    pub fn resolve(cli: Cli, defaults: CliDefaults) -> Result<Self> {
        if cli.repository.as_os_str().is_empty() {
            bail!("--repository cannot be empty");
        }
        validate_revision(&cli.revision)?;

        let order_by = match cli.order_by.or(defaults.order_by) {
            Some(key) => key
                .parse::<SortKey>()
                .context("invalid --order-by value")?,
            None => SortKey::default(),
        };
        let format = match cli.format.or(defaults.format) {
            Some(fmt) => fmt
                .parse::<OutputFormat>()
                .context("invalid --format value")?,
            None => OutputFormat::default(),
        };
        let workers = cli.workers.or(defaults.workers).unwrap_or(DEFAULT_WORKERS);
        if !(1..=64).contains(&workers) {
            bail!("workers must be between 1 and 64, got {}", workers);
        }

        let filter = FilterOptions {
            exclude: or_default(cli.exclude, defaults.exclude),
            restrict_to: or_default(cli.restrict_to, defaults.restrict_to),
            languages: or_default(cli.languages, defaults.languages),
            extensions: or_default(cli.extensions, defaults.extensions),
        };
        validate_extensions(&filter.extensions)?;
        validate_patterns("--exclude", &filter.exclude)?;
        validate_patterns("--restrict-to", &filter.restrict_to)?;

        Ok(Self {
            repository: cli.repository,
            revision: cli.revision,
            identity: Identity::from_flag(
                cli.use_committer || defaults.use_committer.unwrap_or(false),
            ),
            order_by,
            format,
            filter,
            workers,
        })
    }
}

/// Accept `HEAD`-relative names, commit hashes and branch/tag names.
pub fn validate_revision(revision: &str) -> Result<()> {
    if revision.starts_with("HEAD") {
        return Ok(());
    }
    let hash = Regex::new(r"^[0-9a-fA-F]{7,40}$")?;
    let name = Regex::new(r"^[^\-][\w.\-/]+$")?;
    if hash.is_match(revision) || name.is_match(revision) {
        return Ok(());
    }
    bail!(
        "invalid revision format {:?} (must be 'HEAD', 'HEAD~n', a valid commit hash, or a tag)",
        revision
    )
}

fn validate_extensions(extensions: &[String]) -> Result<()> {
    for ext in extensions {
        if ext.is_empty() {
            bail!("empty extension provided in --extensions");
        }
        if !ext.starts_with('.') {
            bail!(
                "invalid extension {:?} in --extensions: must start with a dot",
                ext
            );
        }
    }
    Ok(())
}

fn validate_patterns(flag: &str, patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        if pattern.is_empty() {
            bail!("empty pattern provided in {}", flag);
        }
        compile_glob(pattern).with_context(|| format!("invalid pattern in {}", flag))?;
    }
    Ok(())
}
