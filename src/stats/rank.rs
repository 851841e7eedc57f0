use super::AuthorStats;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Statistic used as the primary ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Lines,
    Commits,
    Files,
}

impl SortKey {
    /// Parse a key, treating anything unrecognized as `lines`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Keys compared in order: the primary, then the rest by precedence.
    fn chain(self) -> [SortKey; 3] {
        match self {
            SortKey::Lines => [SortKey::Lines, SortKey::Commits, SortKey::Files],
            SortKey::Commits => [SortKey::Commits, SortKey::Lines, SortKey::Files],
            SortKey::Files => [SortKey::Files, SortKey::Lines, SortKey::Commits],
        }
    }

    fn value(self, stats: &AuthorStats) -> u64 {
        match self {
            SortKey::Lines => stats.lines,
            SortKey::Commits => stats.commits as u64,
            SortKey::Files => stats.files as u64,
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(SortKey::Lines),
            "commits" => Ok(SortKey::Commits),
            "files" => Ok(SortKey::Files),
            _ => Err(anyhow::anyhow!(
                "invalid sort key '{}' (must be lines, commits, or files)",
                s
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Lines => write!(f, "lines"),
            SortKey::Commits => write!(f, "commits"),
            SortKey::Files => write!(f, "files"),
        }
    }
}

/// Ranking order: numeric keys descending, then name ascending ignoring case.
pub fn compare(a: &AuthorStats, b: &AuthorStats, key: SortKey) -> Ordering {
    key.chain()
        .iter()
        .map(|k| k.value(b).cmp(&k.value(a)))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        })
}

/// Sort `stats` in ranking order.
pub fn rank(mut stats: Vec<AuthorStats>, key: SortKey) -> Vec<AuthorStats> {
    stats.sort_by(|a, b| compare(a, b, key));
    stats
}
