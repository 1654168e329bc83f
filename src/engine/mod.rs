//! Validation orchestrator.
//!
//! Loads the contract, scans the project, then runs every applicable rule in
//! turn. A rule that errors or panics is converted into a failed record for
//! that rule alone; the remaining rules still run.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Once;

use tracing::{debug, info, warn};

use crate::config::{CONTRACT_FILE, load_contract};
use crate::language::LanguageRegistry;
use crate::report::Summary;
use crate::rules::{
    ResultRecord, Rule, RuleContext, RuleOutcome, RuleRegistry, Severity, Violation,
};
use crate::scanner::scan_project;

thread_local! {
    static IN_RULE: Cell<bool> = const { Cell::new(false) };
}

static QUIET_RULE_PANICS: Once = Once::new();

/// Keep the default hook from printing panics that `execute_rule` reports itself.
fn install_panic_hook() {
    QUIET_RULE_PANICS.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if IN_RULE.get() {
                debug!(location = ?info.location(), "rule panicked");
            } else {
                previous(info);
            }
        }));
    });
}

/// Options for a validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Extra globs, relative to the project root, excluded from scanning.
    pub exclude: Vec<String>,
}

/// Result of running one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleExecution {
    /// The check returned; one record, plus a `-warnings` record when it warned.
    Completed(Vec<ResultRecord>),
    /// The check returned an error or panicked.
    Failed(ResultRecord),
}

impl RuleExecution {
    #[must_use]
    pub fn into_records(self) -> Vec<ResultRecord> {
        match self {
            Self::Completed(records) => records,
            Self::Failed(record) => vec![record],
        }
    }
}

/// Validate `project` with the built-in rules.
#[must_use]
pub fn validate(project: &Path, options: &ValidateOptions) -> Summary {
    validate_with(project, options, &RuleRegistry::builtin())
}

/// Validate `project` against the rules of `registry`.
///
/// Never fails: contract and scan problems become synthetic error records.
#[must_use]
pub fn validate_with(
    project: &Path,
    options: &ValidateOptions,
    registry: &RuleRegistry,
) -> Summary {
    debug!("validating {}", project.display());

    let loaded = load_contract(project);
    let Some(config) = loaded.config else {
        warn!(errors = loaded.errors.len(), "contract is invalid");
        let violations = loaded
            .errors
            .into_iter()
            .map(|error| Violation::in_file(CONTRACT_FILE, error))
            .collect();
        return finish(vec![ResultRecord::new(
            "contract",
            "Repository contract",
            Severity::Error,
            violations,
        )]);
    };

    let languages = LanguageRegistry::default();
    let files = match scan_project(project, &config, &languages, &options.exclude) {
        Ok(files) => files,
        Err(e) => {
            warn!("scan failed: {e}");
            return finish(vec![ResultRecord::new(
                "scan",
                "Project scan",
                Severity::Error,
                vec![Violation::new(e.message())],
            )]);
        }
    };

    let ctx = RuleContext {
        project_root: project,
        config: &config,
        files: &files,
        languages: &languages,
    };

    let results = registry
        .rules_for(&config)
        .iter()
        .flat_map(|rule| execute_rule(rule, &ctx).into_records())
        .collect();

    finish(results)
}

/// Run a single rule, isolating any failure inside its check.
#[must_use]
pub fn execute_rule(rule: &Rule, ctx: &RuleContext<'_>) -> RuleExecution {
    debug!(rule = rule.id, "running rule");
    install_panic_hook();

    IN_RULE.set(true);
    let result = panic::catch_unwind(AssertUnwindSafe(|| (rule.check)(ctx)));
    IN_RULE.set(false);

    let outcome = match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => return failed(rule, &e.message()),
        Err(payload) => return failed(rule, &panic_message(payload.as_ref())),
    };

    RuleExecution::Completed(records(rule, outcome))
}

fn records(rule: &Rule, outcome: RuleOutcome) -> Vec<ResultRecord> {
    debug!(
        rule = rule.id,
        violations = outcome.violations.len(),
        warnings = outcome.warnings.len(),
        "rule finished"
    );

    let mut records = vec![ResultRecord::new(
        rule.id,
        rule.name,
        rule.severity,
        outcome.violations,
    )];
    if !outcome.warnings.is_empty() {
        records.push(ResultRecord::new(
            format!("{}-warnings", rule.id),
            format!("{} (warnings)", rule.name),
            Severity::Warn,
            outcome.warnings,
        ));
    }
    records
}

fn failed(rule: &Rule, description: &str) -> RuleExecution {
    warn!(rule = rule.id, "rule failed: {description}");
    RuleExecution::Failed(ResultRecord::new(
        rule.id,
        rule.name,
        Severity::Error,
        vec![Violation::new(format!("rule execution failed: {description}"))],
    ))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn finish(results: Vec<ResultRecord>) -> Summary {
    let summary = Summary::from_results(results);
    info!(
        passed = summary.passed,
        failed = summary.failed,
        warnings = summary.warnings,
        "validation complete"
    );
    summary
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
