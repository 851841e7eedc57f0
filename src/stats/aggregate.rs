use super::AuthorStats;
use crate::git::{CommitContribution, ResultStore};
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct AuthorAccumulator {
    lines: u64,
    commits: HashSet<String>,
    files: HashSet<String>,
}

/// Fold commit contributions into per-author totals.
///
/// A file touched by several commits of the same author counts once.
/// The result is unordered; see [`super::rank`].
pub fn aggregate<I>(commits: I) -> Vec<AuthorStats>
where
    I: IntoIterator<Item = (String, CommitContribution)>,
{
    let mut by_author: HashMap<String, AuthorAccumulator> = HashMap::new();

    for (commit, contribution) in commits {
        let acc = by_author.entry(contribution.author).or_default();
        acc.lines += contribution.line_count;
        acc.commits.insert(commit);
        acc.files.extend(contribution.files);
    }

    by_author
        .into_iter()
        .map(|(name, acc)| AuthorStats {
            name,
            lines: acc.lines,
            commits: acc.commits.len(),
            files: acc.files.len(),
        })
        .collect()
}

impl ResultStore {
    /// Per-author totals of everything recorded.
    pub fn author_stats(self) -> Vec<AuthorStats> {
        aggregate(self.into_commits())
    }
}
