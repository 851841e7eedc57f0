//! Git line attribution
//!
//! Turns a list of tracked files into commit-level contributions:
//!
//! - [`query`] asks git who last touched each line (`git blame --porcelain`)
//! - [`porcelain`] parses those reports into per-commit line counts
//! - [`store`] merges the counts from every worker
//! - [`dispatch`] runs the blames on a fixed pool of threads
//!
//! # Example
//!
//! ```no_run
//! use gitfame::git::{list_files, Dispatcher, GitCli, Identity};
//! use std::path::Path;
//!
//! let repo = Path::new(".");
//! let files = list_files(repo, "HEAD").unwrap();
//! let store = Dispatcher::new(&GitCli::new(), repo, "HEAD")
//!     .with_identity(Identity::Author)
//!     .run(&files, None)
//!     .unwrap();
//! println!("{} commits own lines at HEAD", store.len());
//! ```

pub mod dispatch;
pub mod error;
pub mod files;
pub mod porcelain;
pub mod query;
pub mod store;

pub use dispatch::{Dispatcher, Progress, DEFAULT_WORKERS};
pub use error::{GitError, GitResult};
pub use files::list_files;
pub use query::{AttributionQuery, GitCli, Identity};
pub use store::{CommitContribution, ResultStore};
