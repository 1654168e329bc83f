//! Rules applied to every project regardless of declared languages.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use crate::config::{AGENT_README_FILE, CANONICAL_ROLES, CONTRACT_FILE, parse_contract};
use crate::error::{AocsError, Result};

use super::{
    HintProblem, Rule, RuleContext, RuleOutcome, RuleSet, Severity, Violation, forbidden_pattern,
};

/// Word budget for the agent README.
pub const AGENT_README_MAX_WORDS: usize = 200;

/// Built-in universal rules, in execution order.
#[must_use]
pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        Rule::new(
            "contract-present",
            "Repository contract present",
            Severity::Error,
            check_contract_present,
        ),
        Rule::new(
            "contract-schema",
            "Repository contract schema",
            Severity::Error,
            check_contract_schema,
        ),
        Rule::new(
            "file-roles",
            "File role declarations",
            Severity::Error,
            check_file_roles,
        ),
        Rule::new(
            "inline-hints",
            "Inline hint syntax",
            Severity::Error,
            check_inline_hints,
        ),
        Rule::new(
            "forbidden-patterns",
            "Forbidden code patterns",
            Severity::Error,
            check_forbidden_patterns,
        ),
        Rule::new(
            "module-manifest",
            "Module manifest declarations",
            Severity::Warn,
            check_module_manifest,
        ),
        Rule::new(
            "agent-readme",
            "Agent README",
            Severity::Error,
            check_agent_readme,
        ),
    ])
}

fn check_contract_present(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    if ctx.project_root.join(CONTRACT_FILE).is_file() {
        return Ok(RuleOutcome::pass());
    }
    Ok(RuleOutcome::with_violations(vec![Violation::new(format!(
        "missing {CONTRACT_FILE} at the project root"
    ))]))
}

fn check_contract_schema(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    let path = ctx.project_root.join(CONTRACT_FILE);
    if !path.is_file() {
        return Ok(RuleOutcome::with_violations(vec![Violation::new(format!(
            "cannot validate schema: {CONTRACT_FILE} is missing"
        ))]));
    }
    let content = read_text(&path)?;
    let violations = parse_contract(path, &content)
        .errors
        .into_iter()
        .map(|error| Violation::in_file(CONTRACT_FILE, error))
        .collect();
    Ok(RuleOutcome::with_violations(violations))
}

fn check_file_roles(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    let mut violations = Vec::new();

    for source in ctx.source_files() {
        let roles = source.hint_values("role");

        if roles.is_empty() {
            if ctx.config.mode.is_strict() {
                violations.push(Violation::at(
                    &source.path,
                    1,
                    "missing @aocs-role declaration",
                ));
            }
            continue;
        }

        for (line, role) in &roles {
            if ctx.config.allows_role(role) {
                continue;
            }
            let message = if CANONICAL_ROLES.contains(&role.as_str()) {
                format!("role '{role}' is not listed in the contract's roles")
            } else {
                format!(
                    "unknown role '{role}'. Valid roles: {}",
                    CANONICAL_ROLES.join(", ")
                )
            };
            violations.push(Violation::at(&source.path, *line, message));
        }

        let (_, first) = &roles[0];
        if let Some((line, other)) = roles.iter().find(|(_, r)| r != first) {
            violations.push(Violation::at(
                &source.path,
                *line,
                format!("conflicting role declarations: '{first}' and '{other}'"),
            ));
        }
    }

    Ok(RuleOutcome::with_violations(violations))
}

fn check_inline_hints(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    let mut violations = Vec::new();

    for source in ctx.source_files() {
        for hint in source.hints() {
            let message = match hint.problem() {
                None => continue,
                Some(HintProblem::UnknownKey) => {
                    format!("unknown hint key '@aocs-{}'", hint.key)
                }
                Some(HintProblem::MissingColon) => {
                    format!("hint '@aocs-{}' is missing ':' before its value", hint.key)
                }
                Some(HintProblem::EmptyValue) => {
                    format!("hint '@aocs-{}' has an empty value", hint.key)
                }
            };
            violations.push(Violation::at(&source.path, hint.line, message));
        }
    }

    Ok(RuleOutcome::with_violations(violations))
}

fn check_forbidden_patterns(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    let patterns: Vec<_> = ctx
        .config
        .enforced_patterns()
        .filter_map(forbidden_pattern)
        .collect();
    if patterns.is_empty() {
        return Ok(RuleOutcome::pass());
    }

    let mut violations = Vec::new();
    for source in ctx.source_files() {
        let language = source.language.name.as_str();
        for (line_no, line) in source.code_lines() {
            for pattern in patterns.iter().filter(|p| p.is_match(language, line)) {
                violations.push(Violation::at(
                    &source.path,
                    line_no,
                    format!(
                        "forbidden pattern '{}' ({})",
                        pattern.id, pattern.description
                    ),
                ));
            }
        }
    }

    Ok(RuleOutcome::with_violations(violations))
}

fn check_module_manifest(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    if !ctx.config.mode.is_strict() {
        return Ok(RuleOutcome::pass());
    }

    let mut export_patterns: HashMap<&str, Regex> = HashMap::new();
    let mut violations = Vec::new();

    for source in ctx.source_files() {
        let lang = source.language;
        if !export_patterns.contains_key(lang.name.as_str()) {
            let re = Regex::new(&lang.export_pattern).map_err(|e| AocsError::Rule {
                rule: "module-manifest".to_string(),
                message: format!("invalid export pattern for {}: {e}", lang.name),
            })?;
            export_patterns.insert(lang.name.as_str(), re);
        }
        let exports = &export_patterns[lang.name.as_str()];

        let has_exports = source.code_lines().any(|(_, line)| exports.is_match(line));
        if has_exports && !source.has_hint("module") {
            violations.push(Violation::at(
                &source.path,
                1,
                "exports public items but declares no @aocs-module manifest",
            ));
        }
    }

    Ok(RuleOutcome::with_violations(violations))
}

fn check_agent_readme(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    let path = ctx.project_root.join(AGENT_README_FILE);
    if !path.is_file() {
        return Ok(RuleOutcome::with_violations(vec![Violation::new(format!(
            "missing {AGENT_README_FILE} at the project root"
        ))]));
    }

    let words = read_text(&path)?.split_whitespace().count();
    let mut outcome = RuleOutcome::pass();
    if words > AGENT_README_MAX_WORDS {
        outcome.warnings.push(Violation::in_file(
            AGENT_README_FILE,
            format!(
                "{AGENT_README_FILE} has {words} words; keep it to {AGENT_README_MAX_WORDS} or fewer"
            ),
        ));
    }
    Ok(outcome)
}

/// Read `path`, replacing invalid UTF-8 instead of failing.
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| AocsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[path = "universal_tests.rs"]
mod tests;
