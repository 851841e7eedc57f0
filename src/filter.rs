//! Glob and extension based file selection
//!
//! Patterns follow shell rules: `*` and `?` never cross a `/`.

use crate::config::LanguageTable;
use anyhow::{Context, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// What to keep out of / restrict the scan to.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub exclude: Vec<String>,
    pub restrict_to: Vec<String>,
    pub languages: Vec<String>,
    pub extensions: Vec<String>,
}

/// Compiled file filter.
#[derive(Debug, Clone)]
pub struct FileFilter {
    exclude: Option<GlobSet>,
    restrict_to: Option<GlobSet>,
    allowed_extensions: HashSet<String>,
    unknown_languages: Vec<String>,
}

/// Compile a single pattern with shell-style separator handling.
pub fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob pattern {:?}", pattern))
}

fn compile_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    Ok(Some(builder.build()?))
}

/// Lowercased extension including the dot, or empty.
///
/// Dot-files such as `.gitignore` count as all-extension.
pub fn file_extension(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.')
        .map(|i| name[i..].to_lowercase())
        .unwrap_or_default()
}

impl FileFilter {
    pub fn new(options: &FilterOptions, languages: &LanguageTable) -> Result<Self> {
        let mut allowed_extensions = HashSet::new();
        let mut unknown_languages = Vec::new();

        for lang in options.languages.iter().map(|l| l.trim()) {
            if lang.is_empty() {
                continue;
            }
            let exts = languages.extensions(lang);
            if exts.is_empty() {
                unknown_languages.push(lang.to_string());
            }
            allowed_extensions.extend(exts.iter().map(|e| e.to_lowercase()));
        }

        for ext in options.extensions.iter().map(|e| e.trim()) {
            if !ext.is_empty() {
                allowed_extensions.insert(ext.to_lowercase());
            }
        }

        Ok(Self {
            exclude: compile_set(&options.exclude)?,
            restrict_to: compile_set(&options.restrict_to)?,
            allowed_extensions,
            unknown_languages,
        })
    }

    /// Languages that were asked for but are not in the table.
    pub fn unknown_languages(&self) -> &[String] {
        &self.unknown_languages
    }

    pub fn matches(&self, file: &str) -> bool {
        if self.exclude.as_ref().is_some_and(|set| set.is_match(file)) {
            return false;
        }
        if self.restrict_to.as_ref().is_some_and(|set| !set.is_match(file)) {
            return false;
        }
        self.allowed_extensions.is_empty()
            || self.allowed_extensions.contains(&file_extension(file))
    }

    /// Keep the matching files, preserving order.
    pub fn apply(&self, files: Vec<String>) -> Vec<String> {
        files.into_iter().filter(|f| self.matches(f)).collect()
    }
}
