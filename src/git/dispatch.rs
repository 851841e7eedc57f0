//! Parallel blame dispatch
//!
//! ```text
//!        files ──► unbounded queue (filled and closed up front)
//!                        │
//!        ┌───────────────┼───────────────┐
//!        ▼               ▼               ▼
//!   ┌──────────┐    ┌──────────┐    ┌──────────┐
//!   │ Worker 1 │    │ Worker 2 │    │ Worker N │   blame + parse per file
//!   └────┬─────┘    └────┬─────┘    └────┬─────┘
//!        └───────────────┼───────────────┘
//!                        ▼
//!                  ResultStore (sharded, additive merges)
//! ```
//!
//! The first fatal error raises a shared stop flag. Workers finish the file
//! they are on, stop pulling new ones, and the error is returned once every
//! worker has been joined. Nothing recorded before the failure is returned.

use super::error::{GitError, GitResult};
use super::porcelain::record_report;
use super::query::{AttributionQuery, Identity};
use super::store::ResultStore;
use crossbeam_channel::{bounded, unbounded};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use tracing::{debug, warn};

/// Default number of blame workers.
pub const DEFAULT_WORKERS: usize = 8;

/// Progress callback, invoked with `(files_done, files_total)`.
pub type Progress<'p> = &'p (dyn Fn(usize, usize) + Sync);

/// Blames a list of files on a fixed pool of worker threads.
pub struct Dispatcher<'a, Q: AttributionQuery + ?Sized> {
    query: &'a Q,
    repo: &'a Path,
    revision: &'a str,
    identity: Identity,
    workers: usize,
}

impl<'a, Q: AttributionQuery + ?Sized> Dispatcher<'a, Q> {
    pub fn new(query: &'a Q, repo: &'a Path, revision: &'a str) -> Self {
        Self {
            query,
            repo,
            revision,
            identity: Identity::Author,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Group lines by author or committer.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Set the worker count (at least 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Blame every file exactly once and merge the results.
    pub fn run(&self, files: &[String], progress: Option<Progress<'_>>) -> GitResult<ResultStore> {
        let total = files.len();
        let store = ResultStore::new();

        let (file_tx, file_rx) = unbounded::<&str>();
        for file in files {
            // Receiver is alive, so this cannot fail.
            let _ = file_tx.send(file.as_str());
        }
        drop(file_tx);

        let (err_tx, err_rx) = bounded::<GitError>(self.workers);
        let stop = AtomicBool::new(false);
        let done = AtomicUsize::new(0);
        let mut panicked = false;

        thread::scope(|s| {
            let handles: Vec<_> = (0..self.workers)
                .map(|_| {
                    let rx = file_rx.clone();
                    let err_tx = err_tx.clone();
                    let (store, stop, done) = (&store, &stop, &done);

                    s.spawn(move || {
                        for file in rx.iter() {
                            if stop.load(Ordering::Relaxed) {
                                break;
                            }
                            if let Err(e) = self.blame_one(file, store) {
                                stop.store(true, Ordering::Relaxed);
                                // One slot per worker, so this never blocks.
                                let _ = err_tx.try_send(GitError::for_file(file, e));
                                return;
                            }
                            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                            if let Some(cb) = progress {
                                cb(n, total);
                            }
                        }
                    })
                })
                .collect();

            for handle in handles {
                if handle.join().is_err() {
                    stop.store(true, Ordering::Relaxed);
                    panicked = true;
                }
            }
        });
        drop(err_tx);

        if let Ok(e) = err_rx.try_recv() {
            let discarded = err_rx.len();
            if discarded > 0 {
                debug!("{} further blame errors discarded", discarded);
            }
            return Err(e);
        }
        if panicked {
            warn!("blame worker panicked");
            return Err(GitError::WorkerPanicked);
        }

        debug!(
            "blamed {} files into {} commits",
            done.load(Ordering::Relaxed),
            store.len()
        );
        Ok(store)
    }

    fn blame_one(&self, file: &str, store: &ResultStore) -> GitResult<()> {
        debug!("blaming {}", file);
        let report = self.query.blame(self.repo, self.revision, file)?;
        if report.is_empty() {
            return self.record_untouched(file, store);
        }
        record_report(&report, file, self.identity, store)?;
        Ok(())
    }

    /// Attribute a file without blameable lines to its last commit.
    fn record_untouched(&self, file: &str, store: &ResultStore) -> GitResult<()> {
        let Some(commit) = self
            .query
            .last_commit_touching(self.repo, self.revision, file)?
        else {
            debug!("skipping {}: no history at {}", file, self.revision);
            return Ok(());
        };

        let name = self.query.author_of(self.repo, &commit, self.identity)?;
        debug!("{} has no lines, crediting {} ({})", file, commit, name);
        store.record(&commit, &name, file, 0);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory attribution source keyed by file path.
    #[derive(Default)]
    pub(crate) struct FakeQuery {
        pub reports: HashMap<String, String>,
        pub last_commits: HashMap<String, String>,
        pub authors: HashMap<String, String>,
        pub failing: Vec<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeQuery {
        pub(crate) fn with_report(mut self, file: &str, commit: &str, author: &str, lines: u64) -> Self {
            let report = format!(
                "{commit} 1 1 {lines}\nauthor {author}\ncommitter Bot\nfilename {file}\n\tline\n"
            );
            self.reports.insert(file.to_string(), report);
            self
        }
    }

    impl AttributionQuery for FakeQuery {
        fn blame(&self, _repo: &Path, _revision: &str, file: &str) -> GitResult<Vec<u8>> {
            self.calls.lock().unwrap().push(file.to_string());
            if self.failing.iter().any(|f| f == file) {
                return Err(GitError::CommandFailed {
                    command: "git blame".into(),
                    status: "exit status: 128".into(),
                    stderr: "fatal: boom".into(),
                });
            }
            Ok(self
                .reports
                .get(file)
                .map(|r| r.as_bytes().to_vec())
                .unwrap_or_default())
        }

        fn last_commit_touching(
            &self,
            _repo: &Path,
            _revision: &str,
            file: &str,
        ) -> GitResult<Option<String>> {
            Ok(self.last_commits.get(file).cloned())
        }

        fn author_of(&self, _repo: &Path, commit: &str, _identity: Identity) -> GitResult<String> {
            Ok(self.authors.get(commit).cloned().unwrap_or_default())
        }
    }

    fn ten_files() -> (FakeQuery, Vec<String>) {
        let mut query = FakeQuery::default();
        let mut files = Vec::new();
        for i in 0..10u64 {
            let file = format!("src/f{}.rs", i);
            let commit = format!("c0ffee{:02}", i % 4);
            let author = if i % 2 == 0 { "Alice" } else { "Bob" };
            query = query.with_report(&file, &commit, author, i + 1);
            files.push(file);
        }
        (query, files)
    }

    fn total_lines(store: ResultStore) -> u64 {
        store.into_commits().map(|(_, c)| c.line_count).sum()
    }

    #[test]
    fn test_every_file_blamed_once() {
        let (query, files) = ten_files();
        let store = Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(3)
            .run(&files, None)
            .unwrap();

        let mut calls = query.calls.lock().unwrap().clone();
        calls.sort();
        let mut expected = files.clone();
        expected.sort();
        assert_eq!(calls, expected);
        assert_eq!(total_lines(store), (1..=10).sum::<u64>());
    }

    #[test]
    fn test_worker_count_does_not_change_totals() {
        let (query, files) = ten_files();
        let parallel = Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(3)
            .run(&files, None)
            .unwrap();
        let (query, files) = ten_files();
        let serial = Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(1)
            .run(&files, None)
            .unwrap();
        assert_eq!(total_lines(parallel), total_lines(serial));
    }

    #[test]
    fn test_empty_file_credits_last_commit() {
        let mut query = FakeQuery::default().with_report("a.txt", "aaaa1111", "Alice", 4);
        query
            .last_commits
            .insert("empty.txt".into(), "cccc2222".into());
        query.authors.insert("cccc2222".into(), "Carol".into());

        let files = vec!["a.txt".to_string(), "empty.txt".to_string()];
        let store = Dispatcher::new(&query, Path::new("."), "HEAD")
            .run(&files, None)
            .unwrap();

        let carol = store.get("cccc2222").unwrap();
        assert_eq!(carol.author, "Carol");
        assert_eq!(carol.line_count, 0);
        assert!(carol.files.contains("empty.txt"));
    }

    #[test]
    fn test_file_without_history_is_skipped() {
        let query = FakeQuery::default();
        let files = vec!["ghost.txt".to_string()];
        let store = Dispatcher::new(&query, Path::new("."), "HEAD")
            .run(&files, None)
            .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_error_names_failing_file() {
        let (mut query, files) = ten_files();
        query.failing.push("src/f4.rs".into());

        let err = Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(3)
            .run(&files, None)
            .unwrap_err();
        assert!(err.to_string().contains("src/f4.rs"), "{}", err);
    }

    #[test]
    fn test_malformed_report_names_file() {
        let mut query = FakeQuery::default().with_report("ok.rs", "aaaa1111", "Alice", 2);
        query
            .reports
            .insert("bad.rs".into(), "abcd 1 1 many\nauthor Mallory\n".into());

        let files = vec!["ok.rs".to_string(), "bad.rs".to_string()];
        let err = Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(1)
            .run(&files, None)
            .unwrap_err();

        match &err {
            GitError::Blame { file, source } => {
                assert_eq!(file, "bad.rs");
                assert!(matches!(**source, GitError::Parse { line: 1, .. }), "{:?}", source);
            }
            other => panic!("expected a blame error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_stops_further_work() {
        let (mut query, files) = ten_files();
        query.failing.push(files[0].clone());

        let result = Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(1)
            .run(&files, None);
        assert!(result.is_err());
        assert_eq!(query.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_progress_reaches_total() {
        let (query, files) = ten_files();
        let seen = AtomicUsize::new(0);
        let cb = |done: usize, total: usize| {
            assert_eq!(total, 10);
            seen.fetch_max(done, Ordering::Relaxed);
        };
        Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(4)
            .run(&files, Some(&cb))
            .unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_zero_workers_clamped() {
        let (query, files) = ten_files();
        let store = Dispatcher::new(&query, Path::new("."), "HEAD")
            .with_workers(0)
            .run(&files, None)
            .unwrap();
        assert!(!store.is_empty());
    }
}
