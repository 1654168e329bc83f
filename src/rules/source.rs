use std::path::{Path, PathBuf};

use crate::error::{AocsError, Result};
use crate::language::{Language, LanguageRegistry};

use super::hints::{Hint, parse_masked};

/// A scanned file loaded for checking.
#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    /// Path relative to the project root, used in violations.
    pub path: PathBuf,
    pub language: &'a Language,
    pub content: String,
    comments: Vec<bool>,
    hints: Vec<Hint>,
}

impl<'a> SourceFile<'a> {
    /// Language of `path` by extension, if known.
    #[must_use]
    pub fn classify(path: &Path, languages: &'a LanguageRegistry) -> Option<&'a Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| languages.get_by_extension(ext))
    }

    /// Read `path` from disk. Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn read(path: &Path, display_path: &Path, language: &'a Language) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| AocsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_content(
            display_path,
            language,
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    }

    #[must_use]
    pub fn from_content(path: impl Into<PathBuf>, language: &'a Language, content: String) -> Self {
        let syntax = &language.comment_syntax;
        let comments = syntax.comment_mask(&content);
        let hints = parse_masked(&content, syntax, &comments);
        Self {
            path: path.into(),
            language,
            content,
            comments,
            hints,
        }
    }

    /// Lines paired with their 1-based line numbers.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content.lines().enumerate().map(|(i, line)| (i + 1, line))
    }

    /// Numbered lines that are not entirely comments.
    pub fn code_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.numbered_lines()
            .zip(&self.comments)
            .filter(|(_, is_comment)| !**is_comment)
            .map(|(line, _)| line)
    }

    /// Hints parsed when the file was loaded.
    #[must_use]
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Non-empty values of every hint with the given key.
    #[must_use]
    pub fn hint_values(&self, key: &str) -> Vec<(usize, String)> {
        self.hints
            .iter()
            .filter(|h| h.key == key)
            .filter_map(|h| {
                h.value
                    .as_ref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (h.line, v.clone()))
            })
            .collect()
    }

    #[must_use]
    pub fn has_hint(&self, key: &str) -> bool {
        self.hints
            .iter()
            .any(|h| h.key == key && h.value.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
