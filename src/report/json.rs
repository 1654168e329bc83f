use serde::Serialize;

use crate::error::Result;
use crate::rules::ResultRecord;

use super::{OutputFormatter, Summary};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Counts,
    results: &'a [ResultRecord],
}

#[derive(Serialize)]
struct Counts {
    passed: usize,
    failed: usize,
    warnings: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &Summary) -> Result<String> {
        let output = JsonOutput {
            summary: Counts {
                passed: summary.passed,
                failed: summary.failed,
                warnings: summary.warnings,
            },
            results: &summary.results,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
