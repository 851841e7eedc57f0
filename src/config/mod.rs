//! Configuration module for gitfame
//!
//! This module handles:
//! - Project-level defaults (gitfame.toml)
//! - The language to extension table used by file filtering

mod languages;
mod project_config;

pub use languages::{LanguageDescriptor, LanguageTable};
pub use project_config::{load_project_config, CliDefaults, ProjectConfig, CONFIG_FILE_NAME};
