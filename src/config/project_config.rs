//! Project-level configuration support
//!
//! Loads per-repository defaults from `gitfame.toml` in the repository root.
//!
//! # Configuration Format
//!
//! ```toml
//! # gitfame.toml
//!
//! [defaults]
//! order_by = "commits"
//! format = "json"
//! workers = 4
//! use_committer = false
//! exclude = ["vendor/*", "*.lock"]
//! restrict_to = []
//! extensions = [".rs"]
//! languages = ["markdown"]
//! ```
//!
//! Command-line flags always take precedence over these values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// File name looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "gitfame.toml";

/// Root of `gitfame.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub defaults: CliDefaults,
}

/// Defaults for command-line options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliDefaults {
    pub order_by: Option<String>,
    pub format: Option<String>,
    pub workers: Option<usize>,
    pub use_committer: Option<bool>,
    pub exclude: Vec<String>,
    pub restrict_to: Vec<String>,
    pub extensions: Vec<String>,
    pub languages: Vec<String>,
}

fn load_toml_config(path: &Path) -> Result<ProjectConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `gitfame.toml` from `repo_path`, or defaults if absent or invalid.
pub fn load_project_config(repo_path: &Path) -> ProjectConfig {
    let path = repo_path.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return ProjectConfig::default();
    }

    match load_toml_config(&path) {
        Ok(config) => {
            debug!("Loaded project config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring {}: {:#}", path.display(), e);
            ProjectConfig::default()
        }
    }
}
