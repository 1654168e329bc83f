use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{AocsError, Result};

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".hg",
    ".svn",
    "dist",
    "build",
    "coverage",
    "out",
    "output",
    "target",
    "__pycache__",
];

/// Directories reserved for intentionally-invalid test fixtures.
pub const FIXTURE_DIR_PATTERNS: &[&str] = &[
    "**/fixtures/invalid",
    "**/fixtures/invalid-*",
    "**/__fixtures__/invalid",
    "**/__fixtures__/invalid-*",
];

/// Minified or generated artifacts.
pub const MINIFIED_FILE_PATTERNS: &[&str] = &["**/*.min.*"];

/// Decides which entries of a project tree are scanned.
///
/// Paths passed to both methods are relative to the scan root.
pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;

    fn should_descend(&self, _dir: &Path) -> bool {
        true
    }
}

/// Filter driven by declared-language extensions plus the fixed exclusion rules.
pub struct LanguageFilter {
    extensions: Vec<String>,
    excluded_dirs: GlobSet,
    excluded_files: GlobSet,
}

impl LanguageFilter {
    /// Create a filter for `extensions` with additional user `exclude_patterns`.
    ///
    /// User patterns apply to both directories and files.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> Result<Self> {
        let user: Vec<&str> = exclude_patterns.iter().map(String::as_str).collect();

        let dir_patterns: Vec<&str> = FIXTURE_DIR_PATTERNS
            .iter()
            .copied()
            .chain(user.iter().copied())
            .collect();
        let file_patterns: Vec<&str> = MINIFIED_FILE_PATTERNS
            .iter()
            .copied()
            .chain(user.iter().copied())
            .collect();

        Ok(Self {
            extensions,
            excluded_dirs: build_globset(&dir_patterns)?,
            excluded_files: build_globset(&file_patterns)?,
        })
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl FileFilter for LanguageFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_valid_extension(path) && !self.excluded_files.is_match(path)
    }

    fn should_descend(&self, dir: &Path) -> bool {
        let hidden_or_denied = dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.') || EXCLUDED_DIRS.contains(&name));
        !hidden_or_denied && !self.excluded_dirs.is_match(dir)
    }
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| AocsError::InvalidPattern {
            pattern: (*pattern).to_string(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| AocsError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
