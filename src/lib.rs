//! gitfame - per-author ownership statistics for git repositories
//!
//! Blames every tracked file at a revision on a pool of worker threads,
//! folds the per-line attribution into commit-level counts, and ranks
//! authors by lines, commits and files owned.

pub mod cli;
pub mod config;
pub mod filter;
pub mod git;
pub mod reporters;
pub mod stats;
