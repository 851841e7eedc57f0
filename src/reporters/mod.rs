//! Output reporters for author statistics
//!
//! Supports multiple output formats:
//! - `tabular` - Aligned plain-text columns
//! - `csv` - Comma-separated values with a header row
//! - `json` - A single JSON array
//! - `json-lines` - One JSON object per line

mod csv;
mod json;
mod text;

use crate::stats::AuthorStats;
use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Tabular,
    Csv,
    Json,
    JsonLines,
}

impl OutputFormat {
    /// Every accepted format name, for help text and validation.
    pub const NAMES: [&'static str; 4] = ["tabular", "csv", "json", "json-lines"];
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabular" => Ok(OutputFormat::Tabular),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "json-lines" => Ok(OutputFormat::JsonLines),
            _ => Err(anyhow!(
                "invalid format '{}' (must be 'tabular', 'csv', 'json', or 'json-lines')",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Tabular => write!(f, "tabular"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonLines => write!(f, "json-lines"),
        }
    }
}

/// Render ranked statistics in the given format
pub fn report(stats: &[AuthorStats], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tabular => Ok(text::render(stats)),
        OutputFormat::Csv => Ok(csv::render(stats)),
        OutputFormat::Json => json::render(stats),
        OutputFormat::JsonLines => json::render_lines(stats),
    }
}
