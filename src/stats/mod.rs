//! Per-author statistics
//!
//! [`aggregate`] folds the commit-keyed blame results into one
//! [`AuthorStats`] per author and [`rank`] orders them.

mod aggregate;
mod rank;

pub use aggregate::aggregate;
pub use rank::{compare, rank, SortKey};

use serde::Serialize;

/// Final per-author totals.
///
/// Field names and order are the output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorStats {
    pub name: String,
    pub lines: u64,
    pub commits: usize,
    pub files: usize,
}

impl AuthorStats {
    pub fn new(name: impl Into<String>, lines: u64, commits: usize, files: usize) -> Self {
        Self {
            name: name.into(),
            lines,
            commits,
            files,
        }
    }
}
