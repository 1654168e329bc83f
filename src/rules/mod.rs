//! Rule model and registry.
//!
//! A rule is a static descriptor (`id`, `name`, `severity`) paired with a
//! plain check function over a read-only [`RuleContext`]. Rules never observe
//! each other: each check builds and returns its own [`RuleOutcome`].
//!
//! Submodules:
//! - `hints`: parser for `@aocs-<key>: <value>` comment hints.
//! - `patterns`: catalog of forbidden code patterns.
//! - `source`: per-file view (language, content, hints) shared by checks.
//! - `universal`: rules applied to every project.
//! - `languages`: rule sets keyed by contract language name.

mod hints;
pub mod languages;
mod patterns;
mod source;
pub mod universal;

pub use hints::{Hint, HintProblem, KNOWN_HINT_KEYS, parse_hints};
pub use patterns::{ForbiddenPattern, PATTERN_IDS, forbidden_pattern};
pub use source::SourceFile;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::language::{Language, LanguageRegistry};
use crate::scanner::FileList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Counts toward pass/fail.
    Error,
    /// Reported separately; never fails a run.
    Warn,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported non-compliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl Violation {
    /// A project-level violation with no location.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn in_file(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line: None,
            message: message.into(),
        }
    }

    /// A violation at a 1-based line of `file`.
    #[must_use]
    pub fn at(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{line}: {}", file.display(), self.message),
            (Some(file), None) => write!(f, "{}: {}", file.display(), self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// What a single check found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl RuleOutcome {
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            violations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_violations(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            warnings: Vec::new(),
        }
    }
}

/// Normalized result of one executed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub violations: Vec<Violation>,
}

impl ResultRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        severity: Severity,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            severity,
            violations,
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Read-only inputs shared by every check.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub project_root: &'a Path,
    pub config: &'a Config,
    pub files: &'a FileList,
    pub languages: &'a LanguageRegistry,
}

impl<'a> RuleContext<'a> {
    /// Load every scanned file whose extension maps to a known language.
    ///
    /// Files that cannot be read (removed since the scan, permissions) are skipped.
    #[must_use]
    pub fn source_files(&self) -> Vec<SourceFile<'a>> {
        self.classified()
            .filter_map(|(path, lang)| self.load(path, lang))
            .collect()
    }

    /// Load the scanned files of one language, skipping unreadable ones.
    #[must_use]
    pub fn source_files_of(&self, language: &str) -> Vec<SourceFile<'a>> {
        self.classified()
            .filter(|(_, lang)| lang.name.eq_ignore_ascii_case(language))
            .filter_map(|(path, lang)| self.load(path, lang))
            .collect()
    }

    fn classified(&self) -> impl Iterator<Item = (&'a Path, &'a Language)> {
        let (files, languages) = (self.files, self.languages);
        files
            .iter()
            .filter_map(move |path| SourceFile::classify(path, languages).map(|lang| (path, lang)))
    }

    fn load(&self, path: &Path, language: &'a Language) -> Option<SourceFile<'a>> {
        let rel = self.files.relative(path);
        match SourceFile::read(path, rel, language) {
            Ok(source) => Some(source),
            Err(e) => {
                debug!(path = %rel.display(), error = %e, "skipping unreadable file");
                None
            }
        }
    }
}

/// Signature of a rule check.
pub type CheckFn = fn(&RuleContext<'_>) -> Result<RuleOutcome>;

/// Static rule descriptor.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub check: CheckFn,
}

impl Rule {
    #[must_use]
    pub const fn new(
        id: &'static str,
        name: &'static str,
        severity: Severity,
        check: CheckFn,
    ) -> Self {
        Self {
            id,
            name,
            severity,
            check,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable collection of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Universal rules plus a fixed lookup table of per-language rule sets.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    universal: RuleSet,
    languages: HashMap<&'static str, RuleSet>,
}

impl RuleRegistry {
    #[must_use]
    pub fn new(universal: RuleSet) -> Self {
        Self {
            universal,
            languages: HashMap::new(),
        }
    }

    /// Registry with every built-in rule.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            universal: universal::rules(),
            languages: languages::rule_sets(),
        }
    }

    /// Register (or replace) the rule set of a language, keyed lowercase.
    #[must_use]
    pub fn with_language(mut self, name: &'static str, rules: RuleSet) -> Self {
        self.languages.insert(name, rules);
        self
    }

    #[must_use]
    pub const fn universal(&self) -> &RuleSet {
        &self.universal
    }

    /// Rule set of a language; unknown names have none.
    #[must_use]
    pub fn for_language(&self, name: &str) -> Option<&RuleSet> {
        let key = name.trim().to_lowercase();
        self.languages.get(key.as_str())
    }

    /// Universal rules followed by the rules of each declared language.
    ///
    /// Each language contributes once even if declared repeatedly.
    #[must_use]
    pub fn rules_for(&self, config: &Config) -> Vec<Rule> {
        let mut seen: Vec<String> = Vec::new();
        let mut rules: Vec<Rule> = self.universal.iter().copied().collect();
        for name in &config.languages {
            let key = name.trim().to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            if let Some(set) = self.for_language(&key) {
                rules.extend(set.iter().copied());
            }
            seen.push(key);
        }
        rules
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
