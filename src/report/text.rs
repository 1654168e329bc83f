use std::fmt::Write;

use crate::error::Result;
use crate::rules::{ResultRecord, Severity};

use super::{OutputFormatter, Summary};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Passed,
    Warning,
    Failed,
}

impl Status {
    fn of(record: &ResultRecord) -> Self {
        match (record.severity, record.violations.is_empty()) {
            (_, true) => Self::Passed,
            (Severity::Warn, false) => Self::Warning,
            (Severity::Error, false) => Self::Failed,
        }
    }

    const fn icon(self) -> &'static str {
        match self {
            Self::Passed => "✓",
            Self::Warning => "⚠",
            Self::Failed => "✗",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Warning => "WARNING",
            Self::Failed => "FAILED",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Passed => ansi::GREEN,
            Self::Warning => ansi::YELLOW,
            Self::Failed => ansi::RED,
        }
    }
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose >= 1`, passing records are listed too.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_record(&self, record: &ResultRecord, output: &mut String) {
        let status = Status::of(record);
        let label = self.colorize(status.label(), status.color());
        let _ = writeln!(
            output,
            "{} {label}: {} ({})",
            status.icon(),
            record.id,
            record.name
        );
        for violation in &record.violations {
            let _ = writeln!(output, "   {violation}");
        }
    }

    fn format_summary(&self, summary: &Summary) -> String {
        let checked = summary.passed + summary.failed;
        let passed = self.colorize(&summary.passed.to_string(), ansi::GREEN);
        let warnings = self.colorize(&summary.warnings.to_string(), ansi::YELLOW);
        let failed = self.colorize(&summary.failed.to_string(), ansi::RED);
        format!(
            "Summary: {checked} rules checked, {passed} passed, {warnings} warnings, {failed} failed"
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &Summary) -> Result<String> {
        let mut output = String::new();

        // Failures first, then warnings, then (verbose only) passes.
        for wanted in [Status::Failed, Status::Warning, Status::Passed] {
            if wanted == Status::Passed && self.verbose == 0 {
                continue;
            }
            for record in summary.results.iter().filter(|r| Status::of(r) == wanted) {
                self.format_record(record, &mut output);
                output.push('\n');
            }
        }

        let _ = writeln!(output, "{}", self.format_summary(summary));
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
