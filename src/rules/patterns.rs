//! Catalog of forbidden code patterns.
//!
//! Each pattern is a shallow, line-oriented regex per language family. A
//! pattern with no matcher for a file's language never fires for that file.

use std::sync::LazyLock;

use regex::Regex;

const JS_FAMILY: &[&str] = &["javascript", "typescript"];
const PYTHON: &[&str] = &["python"];
const RUST: &[&str] = &["rust"];

/// Every pattern id a contract may list.
pub const PATTERN_IDS: &[&str] = &[
    "dynamic-eval",
    "global-mutation",
    "wildcard-import",
    "console-log",
    "debugger-statement",
    "bare-except",
];

type Matcher = (&'static [&'static str], &'static str);

const PATTERN_TABLE: &[(&str, &str, &[Matcher])] = &[
    (
        "dynamic-eval",
        "dynamic code evaluation",
        &[
            (JS_FAMILY, r"(?:^|[^\w$.])eval\s*\(|\bnew\s+Function\s*\("),
            (PYTHON, r"(?:^|[^\w.])(?:eval|exec)\s*\("),
        ],
    ),
    (
        "global-mutation",
        "mutation of global state",
        &[
            (JS_FAMILY, r"\b(?:window|globalThis|global)\.[\w$]+\s*=[^=]"),
            (PYTHON, r"^\s*global\s+\w"),
        ],
    ),
    (
        "wildcard-import",
        "wildcard import",
        &[
            (JS_FAMILY, r"\bimport\s*\*\s*as\b"),
            (PYTHON, r"^\s*from\s+\S+\s+import\s+\*"),
            (RUST, r"^\s*(?:pub\s+)?use\s+[\w:]+::\*\s*;"),
        ],
    ),
    (
        "console-log",
        "debug console output",
        &[
            (JS_FAMILY, r"\bconsole\.log\s*\("),
            (PYTHON, r"(?:^|[^\w.])print\s*\("),
        ],
    ),
    (
        "debugger-statement",
        "debugger statement",
        &[
            (JS_FAMILY, r"(?:^|[^\w$.])debugger\s*;?\s*$"),
            (PYTHON, r"\bbreakpoint\s*\(|\bpdb\.set_trace\s*\("),
        ],
    ),
    ("bare-except", "bare except clause", &[(PYTHON, r"^\s*except\s*:")]),
];

#[derive(Debug)]
pub struct ForbiddenPattern {
    pub id: &'static str,
    pub description: &'static str,
    matchers: Vec<(&'static [&'static str], Regex)>,
}

impl ForbiddenPattern {
    /// Matcher for a language name, if the pattern applies to it.
    #[must_use]
    pub fn matcher_for(&self, language: &str) -> Option<&Regex> {
        self.matchers
            .iter()
            .find(|(langs, _)| langs.iter().any(|l| l.eq_ignore_ascii_case(language)))
            .map(|(_, re)| re)
    }

    #[must_use]
    pub fn is_match(&self, language: &str, line: &str) -> bool {
        self.matcher_for(language).is_some_and(|re| re.is_match(line))
    }
}

static CATALOG: LazyLock<Vec<ForbiddenPattern>> = LazyLock::new(|| {
    PATTERN_TABLE
        .iter()
        .map(|&(id, description, matchers)| ForbiddenPattern {
            id,
            description,
            matchers: matchers
                .iter()
                .map(|(langs, pattern)| (*langs, Regex::new(pattern).expect("Invalid regex")))
                .collect(),
        })
        .collect()
});

/// Look up a catalog entry by id.
#[must_use]
pub fn forbidden_pattern(id: &str) -> Option<&'static ForbiddenPattern> {
    CATALOG.iter().find(|p| p.id == id)
}

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod tests;
