//! JSON reporters
//!
//! `json` writes the ranked list as one compact array, `json-lines` writes
//! one object per line for streaming consumers.

use crate::stats::AuthorStats;
use anyhow::Result;

/// Render stats as a JSON array
pub fn render(stats: &[AuthorStats]) -> Result<String> {
    Ok(serde_json::to_string(stats)?)
}

/// Render stats as newline-delimited JSON
pub fn render_lines(stats: &[AuthorStats]) -> Result<String> {
    let mut out = String::new();
    for s in stats {
        out.push_str(&serde_json::to_string(s)?);
        out.push('\n');
    }
    Ok(out)
}
