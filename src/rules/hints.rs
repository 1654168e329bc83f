//! Structured inline hints.
//!
//! A hint is a comment line carrying `@aocs-<key>: <value>`, e.g.
//! `// @aocs-role: service`. Only whole-line comments are considered.

use std::sync::LazyLock;

use regex::Regex;

use crate::language::CommentSyntax;

/// Hint keys understood by the rules.
pub const KNOWN_HINT_KEYS: &[&str] = &[
    "role",
    "module",
    "exports",
    "owner",
    "side-effects",
    "depends",
];

static HINT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@aocs-([A-Za-z0-9_-]*)(.*)$").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// 1-based line number.
    pub line: usize,
    pub key: String,
    /// Text after the colon, trimmed; `None` when the colon is missing.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintProblem {
    UnknownKey,
    MissingColon,
    EmptyValue,
}

impl Hint {
    /// Structural problem with this hint, if any.
    #[must_use]
    pub fn problem(&self) -> Option<HintProblem> {
        if !KNOWN_HINT_KEYS.contains(&self.key.as_str()) {
            return Some(HintProblem::UnknownKey);
        }
        match self.value.as_deref() {
            None => Some(HintProblem::MissingColon),
            Some("") => Some(HintProblem::EmptyValue),
            Some(_) => None,
        }
    }
}

/// Extract every hint from the comment lines of `content`.
#[must_use]
pub fn parse_hints(content: &str, syntax: &CommentSyntax) -> Vec<Hint> {
    parse_masked(content, syntax, &syntax.comment_mask(content))
}

/// Like [`parse_hints`], reusing a mask from [`CommentSyntax::comment_mask`].
#[must_use]
pub fn parse_masked(content: &str, syntax: &CommentSyntax, comments: &[bool]) -> Vec<Hint> {
    content
        .lines()
        .zip(comments)
        .enumerate()
        .filter(|(_, (_, is_comment))| **is_comment)
        .filter_map(|(i, (line, _))| {
            let caps = HINT_PATTERN.captures(line)?;
            let key = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let rest = caps.get(2).map_or("", |m| m.as_str()).trim_start();
            let value = rest.strip_prefix(':').map(|v| clean_value(v, syntax));
            Some(Hint {
                line: i + 1,
                key,
                value,
            })
        })
        .collect()
}

fn clean_value(raw: &str, syntax: &CommentSyntax) -> String {
    let mut value = raw.trim();
    for (_, end) in &syntax.multi_line {
        if let Some(stripped) = value.strip_suffix(end.as_str()) {
            value = stripped.trim_end();
        }
    }
    value.to_string()
}

#[cfg(test)]
#[path = "hints_tests.rs"]
mod tests;
