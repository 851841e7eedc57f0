//! Parser for `git blame --porcelain` reports
//!
//! A porcelain report is a sequence of blocks. Each block opens with a header
//! line
//!
//! ```text
//! <commit> <orig-line> <final-line> [<lines-in-group>]
//! ```
//!
//! followed by commit metadata (only the first time a commit appears) and the
//! line content prefixed with a TAB. Only the 4-field form carries the group
//! size, so summing those counts attributes every line exactly once.

use super::error::{GitError, GitResult};
use super::query::Identity;
use super::store::ResultStore;
use std::collections::HashMap;

/// Minimum length of a token treated as a commit id.
const MIN_COMMIT_ID_LEN: usize = 4;

/// Line counts and names gathered from one file's report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileAttribution {
    /// `(commit, author, lines)` in order of first appearance
    commits: Vec<(String, Option<String>, u64)>,
    index: HashMap<String, usize>,
}

impl FileAttribution {
    fn slot(&mut self, commit: &str) -> &mut (String, Option<String>, u64) {
        let idx = match self.index.get(commit) {
            Some(&idx) => idx,
            None => {
                self.commits.push((commit.to_string(), None, 0));
                self.index.insert(commit.to_string(), self.commits.len() - 1);
                self.commits.len() - 1
            }
        };
        &mut self.commits[idx]
    }

    fn add_lines(&mut self, commit: &str, lines: u64) {
        self.slot(commit).2 += lines;
    }

    /// Keep the first name seen for `commit`.
    fn name_commit(&mut self, commit: &str, name: &str) {
        self.slot(commit).1.get_or_insert_with(|| name.to_string());
    }

    /// `(commit, author, lines)` triples in order of first appearance.
    pub fn commits(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.commits
            .iter()
            .map(|(c, a, n)| (c.as_str(), a.as_deref().unwrap_or(""), *n))
    }

    pub fn total_lines(&self) -> u64 {
        self.commits.iter().map(|(_, _, n)| n).sum()
    }

    /// Merge every commit seen in this file into `store`.
    pub fn flush_into(&self, store: &ResultStore, file: &str) {
        for (commit, author, lines) in self.commits() {
            store.record(commit, author, file, lines);
        }
    }
}

/// Whether `token` looks like an (abbreviated) commit hash.
pub fn is_commit_id(token: &str) -> bool {
    token.len() >= MIN_COMMIT_ID_LEN && token.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse one porcelain report.
pub fn parse_report(data: &[u8], identity: Identity) -> GitResult<FileAttribution> {
    let tag = identity.porcelain_tag();
    let mut result = FileAttribution::default();
    let mut current: Option<String> = None;

    for (idx, raw) in data.split(|&b| b == b'\n').enumerate() {
        // Content lines are opaque; never mistake source text for metadata.
        if raw.first() == Some(&b'\t') {
            continue;
        }
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end_matches('\r');

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() == 4 && is_commit_id(fields[0]) {
            let mut numbers = [0u64; 3];
            for (slot, field) in numbers.iter_mut().zip(&fields[1..]) {
                *slot = field.parse().map_err(|_| GitError::Parse {
                    line: idx + 1,
                    message: format!("expected a line number, found {:?}", field),
                })?;
            }
            result.add_lines(fields[0], numbers[2]);
            current = Some(fields[0].to_string());
            continue;
        }

        if let Some(name) = line.strip_prefix(tag) {
            if let Some(commit) = current.as_deref() {
                result.name_commit(commit, name);
            }
        }
    }

    Ok(result)
}

/// Parse a report for `file` and merge it into `store`.
pub fn record_report(
    data: &[u8],
    file: &str,
    identity: Identity,
    store: &ResultStore,
) -> GitResult<u64> {
    let attribution = parse_report(data, identity)?;
    attribution.flush_into(store, file);
    Ok(attribution.total_lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
1111111111111111111111111111111111111111 1 1 2
author Alice
author-mail <alice@example.com>
committer Bot
summary first
filename a.rs
\tfn main() {
1111111111111111111111111111111111111111 2 2
\t}
2222222222222222222222222222222222222222 3 3 1
author Bob
committer Bot
summary second
filename a.rs
\t// tail
";

    #[test]
    fn test_counts_group_sizes() {
        let attr = parse_report(REPORT.as_bytes(), Identity::Author).unwrap();
        let commits: Vec<_> = attr.commits().collect();
        assert_eq!(
            commits,
            vec![
                ("1111111111111111111111111111111111111111", "Alice", 2),
                ("2222222222222222222222222222222222222222", "Bob", 1),
            ]
        );
        assert_eq!(attr.total_lines(), 3);
    }

    #[test]
    fn test_committer_identity() {
        let attr = parse_report(REPORT.as_bytes(), Identity::Committer).unwrap();
        assert!(attr.commits().all(|(_, name, _)| name == "Bot"));
    }

    #[test]
    fn test_line_sum_matches_declared_counts() {
        let report = "\
aaaa 1 1 3
author A
\tx
aaaa 2 2
\tx
aaaa 3 3
\tx
bbbb 1 4 2
author B
\ty
bbbb 2 5
\ty
aaaa 7 6 4
\tz
";
        let attr = parse_report(report.as_bytes(), Identity::Author).unwrap();
        assert_eq!(attr.total_lines(), 3 + 2 + 4);
        let commits: Vec<_> = attr.commits().collect();
        assert_eq!(commits[0], ("aaaa", "A", 7));
        assert_eq!(commits[1], ("bbbb", "B", 2));
    }

    #[test]
    fn test_first_name_wins_within_report() {
        let report = "\
abcd 1 1 1
author First
\tone
abcd 2 2 1
author Second
\ttwo
";
        let attr = parse_report(report.as_bytes(), Identity::Author).unwrap();
        assert_eq!(attr.commits().next(), Some(("abcd", "First", 2)));
    }

    #[test]
    fn test_missing_identity_leaves_empty_name() {
        let report = "beef 1 1 5\n\tcontent\n";
        let attr = parse_report(report.as_bytes(), Identity::Author).unwrap();
        assert_eq!(attr.commits().next(), Some(("beef", "", 5)));
    }

    #[test]
    fn test_content_lines_are_not_headers() {
        let report = "\
abcd 1 1 1
author Alice
\tdead 1 2 3
";
        let attr = parse_report(report.as_bytes(), Identity::Author).unwrap();
        assert_eq!(attr.total_lines(), 1);
        assert_eq!(attr.commits().count(), 1);
    }

    #[test]
    fn test_short_or_non_hex_tokens_are_not_commits() {
        assert!(is_commit_id("abcd"));
        assert!(is_commit_id("ABCDEF0123"));
        assert!(!is_commit_id("abc"));
        assert!(!is_commit_id("summary"));
        assert!(!is_commit_id("abcg"));
    }

    #[test]
    fn test_bad_count_is_parse_error() {
        let report = "abcd 1 1 many\n";
        let err = parse_report(report.as_bytes(), Identity::Author).unwrap_err();
        assert!(matches!(err, GitError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_report() {
        let attr = parse_report(b"", Identity::Author).unwrap();
        assert_eq!(attr.total_lines(), 0);
        assert_eq!(attr.commits().count(), 0);
    }

    #[test]
    fn test_record_report_flushes_into_store() {
        let store = ResultStore::new();
        let lines = record_report(REPORT.as_bytes(), "a.rs", Identity::Author, &store).unwrap();
        assert_eq!(lines, 3);
        assert_eq!(store.len(), 2);
        let alice = store.get("1111111111111111111111111111111111111111").unwrap();
        assert_eq!(alice.author, "Alice");
        assert!(alice.files.contains("a.rs"));
    }
}
