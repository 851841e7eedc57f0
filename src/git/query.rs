//! Line attribution queries against a repository
//!
//! The dispatcher only needs three questions answered per file, so they sit
//! behind the [`AttributionQuery`] trait. [`GitCli`] answers them by shelling
//! out to the `git` binary; tests substitute in-memory fakes.

use super::error::{GitError, GitResult};
use std::path::Path;
use std::process::Command;
use tracing::trace;

/// Which identity of a commit statistics are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Author,
    Committer,
}

impl Identity {
    pub fn from_flag(use_committer: bool) -> Self {
        if use_committer {
            Identity::Committer
        } else {
            Identity::Author
        }
    }

    /// Porcelain line prefix carrying the name for this identity.
    pub fn porcelain_tag(self) -> &'static str {
        match self {
            Identity::Author => "author ",
            Identity::Committer => "committer ",
        }
    }

    /// `git show --format` placeholder for the name.
    fn format_placeholder(self) -> &'static str {
        match self {
            Identity::Author => "%an",
            Identity::Committer => "%cn",
        }
    }
}

/// Per-file attribution capability used by the dispatcher.
///
/// Implementations are shared across worker threads.
pub trait AttributionQuery: Send + Sync {
    /// Raw `git blame --porcelain` output for `file` at `revision`.
    ///
    /// An empty report means the file has no attributable lines.
    fn blame(&self, repo: &Path, revision: &str, file: &str) -> GitResult<Vec<u8>>;

    /// Most recent commit touching `file` as of `revision`, if any.
    fn last_commit_touching(
        &self,
        repo: &Path,
        revision: &str,
        file: &str,
    ) -> GitResult<Option<String>>;

    /// Name of the author (or committer) of `commit`.
    fn author_of(&self, repo: &Path, commit: &str, identity: Identity) -> GitResult<String>;
}

/// [`AttributionQuery`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git with `args` inside `repo`, returning stdout.
    pub(crate) fn run(&self, repo: &Path, args: &[&str]) -> GitResult<Vec<u8>> {
        let command = format!("{} {}", self.program, args.join(" "));
        trace!("running {} in {}", command, repo.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(repo)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl AttributionQuery for GitCli {
    fn blame(&self, repo: &Path, revision: &str, file: &str) -> GitResult<Vec<u8>> {
        self.run(repo, &["blame", "--porcelain", revision, "--", file])
    }

    fn last_commit_touching(
        &self,
        repo: &Path,
        revision: &str,
        file: &str,
    ) -> GitResult<Option<String>> {
        let out = self.run(repo, &["log", "-1", "--pretty=%H", revision, "--", file])?;
        let hash = String::from_utf8_lossy(&out).trim().to_string();
        Ok((!hash.is_empty()).then_some(hash))
    }

    fn author_of(&self, repo: &Path, commit: &str, identity: Identity) -> GitResult<String> {
        let format = format!("--format={}", identity.format_placeholder());
        let out = self.run(repo, &["show", "-s", &format, commit])?;
        Ok(String::from_utf8_lossy(&out).trim().to_string())
    }
}
