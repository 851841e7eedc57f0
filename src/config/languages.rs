//! Language name to file extension table
//!
//! Built once at startup from the embedded `languages.json` and handed by
//! reference to whoever needs it.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

const BUILTIN_LANGUAGES: &str = include_str!("languages.json");

/// One entry of the language table.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Immutable lookup from lowercase language name to its extensions.
#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    by_name: HashMap<String, Vec<String>>,
}

impl LanguageTable {
    /// The table shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LANGUAGES).context("Failed to parse built-in language table")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let languages: Vec<LanguageDescriptor> = serde_json::from_str(json)?;
        Ok(Self::from_descriptors(languages))
    }

    pub fn from_descriptors(languages: impl IntoIterator<Item = LanguageDescriptor>) -> Self {
        let by_name = languages
            .into_iter()
            .map(|lang| (lang.name.to_lowercase(), lang.extensions))
            .collect();
        Self { by_name }
    }

    /// Extensions for `name` (case-insensitive); empty if unknown.
    pub fn extensions(&self, name: &str) -> &[String] {
        self.by_name
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
