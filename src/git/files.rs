//! Tracked file listing

use super::error::GitResult;
use super::query::GitCli;
use std::path::Path;

/// All files tracked at `revision`, in git's order.
///
/// Paths are NUL-separated and taken verbatim, so names git would otherwise
/// quote (non-ASCII, embedded spaces) reach `git blame` unchanged.
pub fn list_files(repo: &Path, revision: &str) -> GitResult<Vec<String>> {
    let out = GitCli::new().run(repo, &["ls-tree", "-r", "-z", "--name-only", revision])?;
    Ok(out
        .split(|&b| b == 0)
        .filter(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect())
}
