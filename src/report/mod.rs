//! Result aggregation and rendering.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{ColorMode, TextFormatter};

use serde::Serialize;

use crate::error::Result;
use crate::rules::{ResultRecord, Severity};

/// Tally of a validation run together with every record it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub results: Vec<ResultRecord>,
}

impl Summary {
    /// Count records by severity and cleanliness.
    ///
    /// Error records pass or fail; warn records only add to `warnings` when
    /// they carry violations.
    #[must_use]
    pub fn from_results(results: Vec<ResultRecord>) -> Self {
        let (passed, failed, warnings) =
            results
                .iter()
                .fold((0, 0, 0), |(p, f, w), r| match (r.severity, r.is_clean()) {
                    (Severity::Error, true) => (p + 1, f, w),
                    (Severity::Error, false) => (p, f + 1, w),
                    (Severity::Warn, false) => (p, f, w + 1),
                    (Severity::Warn, true) => (p, f, w),
                });

        Self {
            passed,
            failed,
            warnings,
            results,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for this run.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.is_success() {
            crate::EXIT_SUCCESS
        } else {
            crate::EXIT_VIOLATIONS
        }
    }
}

/// Trait for rendering a validation summary.
pub trait OutputFormatter {
    /// Format the summary into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, summary: &Summary) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
