//! Commit-keyed accumulation of blame results shared by all workers.

use dashmap::DashMap;
use std::collections::HashSet;

/// Everything attributed to one commit across the files blamed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitContribution {
    /// Name of the first author seen for this commit
    pub author: String,
    /// Lines currently attributed to this commit
    pub line_count: u64,
    /// Files containing at least one such line (or emptied by it)
    pub files: HashSet<String>,
}

/// Concurrently-writable map from commit id to [`CommitContribution`].
///
/// Writers on the same commit serialize on the map shard holding it.
#[derive(Debug, Default)]
pub struct ResultStore {
    commits: DashMap<String, CommitContribution>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one contribution.
    ///
    /// Empty commit ids are ignored. The author is only used when the commit
    /// is seen for the first time.
    pub fn record(&self, commit_id: &str, author: &str, file: &str, line_delta: u64) {
        if commit_id.is_empty() {
            return;
        }

        let mut entry = self
            .commits
            .entry(commit_id.to_string())
            .or_insert_with(|| CommitContribution {
                author: author.to_string(),
                ..Default::default()
            });
        entry.line_count += line_delta;
        if !entry.files.contains(file) {
            entry.files.insert(file.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, commit_id: &str) -> Option<CommitContribution> {
        self.commits.get(commit_id).map(|c| c.clone())
    }

    /// Consume the store once all writers are done.
    pub fn into_commits(self) -> impl Iterator<Item = (String, CommitContribution)> {
        self.commits.into_iter()
    }
}
