use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::config::{Config, Mode};
use crate::error::{AocsError, Result};
use crate::rules::{RuleSet, universal};
use crate::scanner::FileList;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (relative, content) in files {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn record<'a>(summary: &'a Summary, id: &str) -> &'a ResultRecord {
    summary.results.iter().find(|r| r.id == id).unwrap()
}

const LITE_JS: &str = r#"{"version": "1.0", "languages": ["javascript"], "mode": "lite"}"#;
const README: &str = "Agents: read .aocs.json first.\n";

fn passing(_ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    Ok(RuleOutcome::pass())
}

fn erroring(_ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    Err(AocsError::Rule {
        rule: "erroring".to_string(),
        message: "boom".to_string(),
    })
}

fn panicking(_ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    panic!("kaboom")
}

fn warning(_ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    Ok(RuleOutcome {
        violations: vec![Violation::new("broken")],
        warnings: vec![Violation::new("iffy")],
    })
}

#[test]
fn contract_missing_required_fields_yields_single_record() {
    let dir = project(&[(".aocs.json", "{}")]);
    let summary = validate(dir.path(), &ValidateOptions::default());

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.passed, 0);

    let contract = &summary.results[0];
    assert_eq!(contract.id, "contract");
    assert_eq!(contract.severity, Severity::Error);
    assert_eq!(contract.violations.len(), 3);
    for field in ["version", "languages", "mode"] {
        assert!(
            contract.violations.iter().any(|v| v.message.contains(field)),
            "no violation for {field}"
        );
    }
}

#[test]
fn missing_contract_file_is_reported() {
    let dir = project(&[]);
    let summary = validate(dir.path(), &ValidateOptions::default());

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.exit_code(), 1);
    assert!(summary.results[0].violations[0].message.contains("not found"));
}

#[test]
fn empty_project_runs_every_rule() {
    let dir = project(&[(".aocs.json", LITE_JS), ("AGENTS.md", README)]);
    let summary = validate(dir.path(), &ValidateOptions::default());

    let expected = RuleRegistry::builtin()
        .rules_for(&Config::new(vec!["javascript".to_string()], Mode::Lite))
        .len();
    assert_eq!(summary.results.len(), expected);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.warnings, 0);
    let error_rules = summary
        .results
        .iter()
        .filter(|r| r.severity == Severity::Error)
        .count();
    assert_eq!(summary.passed, error_rules);
}

#[test]
fn failing_rules_are_isolated() {
    let registry = RuleRegistry::new(RuleSet::new(vec![
        Rule::new("first", "First", Severity::Error, passing),
        Rule::new("erroring", "Erroring", Severity::Warn, erroring),
        Rule::new("panicking", "Panicking", Severity::Error, panicking),
        Rule::new("last", "Last", Severity::Error, passing),
    ]));
    let dir = project(&[(".aocs.json", LITE_JS)]);
    let summary = validate_with(dir.path(), &ValidateOptions::default(), &registry);

    let ids: Vec<&str> = summary.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "erroring", "panicking", "last"]);

    let erroring = &summary.results[1];
    assert_eq!(erroring.severity, Severity::Error);
    assert_eq!(erroring.violations.len(), 1);
    assert!(erroring.violations[0].message.contains("boom"));

    let panicking = &summary.results[2];
    assert_eq!(panicking.violations.len(), 1);
    assert!(panicking.violations[0].message.contains("kaboom"));

    assert!(summary.results[0].is_clean());
    assert!(summary.results[3].is_clean());
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 2);
}

#[test]
fn warnings_are_split_into_their_own_record() {
    let registry = RuleRegistry::new(RuleSet::new(vec![Rule::new(
        "mixed",
        "Mixed",
        Severity::Error,
        warning,
    )]));
    let dir = project(&[(".aocs.json", LITE_JS)]);
    let summary = validate_with(dir.path(), &ValidateOptions::default(), &registry);

    assert_eq!(summary.results.len(), 2);
    let split = &summary.results[1];
    assert_eq!(split.id, "mixed-warnings");
    assert_eq!(split.name, "Mixed (warnings)");
    assert_eq!(split.severity, Severity::Warn);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.warnings, 1);
}

#[test]
fn execute_rule_reports_completion() {
    let dir = project(&[]);
    let config = Config::new(vec!["javascript".to_string()], Mode::Lite);
    let files = FileList::new(dir.path(), Vec::new());
    let languages = LanguageRegistry::default();
    let ctx = RuleContext {
        project_root: dir.path(),
        config: &config,
        files: &files,
        languages: &languages,
    };

    let rule = Rule::new("ok", "Ok", Severity::Error, passing);
    assert_eq!(
        execute_rule(&rule, &ctx),
        RuleExecution::Completed(vec![ResultRecord::new("ok", "Ok", Severity::Error, Vec::new())])
    );

    let rule = Rule::new("bad", "Bad", Severity::Error, panicking);
    assert!(matches!(execute_rule(&rule, &ctx), RuleExecution::Failed(_)));
}

#[test]
fn rule_panics_are_reported_once_and_scope_is_reset() {
    let dir = project(&[]);
    let config = Config::new(vec!["javascript".to_string()], Mode::Lite);
    let files = FileList::new(dir.path(), Vec::new());
    let languages = LanguageRegistry::default();
    let ctx = RuleContext {
        project_root: dir.path(),
        config: &config,
        files: &files,
        languages: &languages,
    };

    let rule = Rule::new("bad", "Bad", Severity::Warn, panicking);
    let RuleExecution::Failed(record) = execute_rule(&rule, &ctx) else {
        panic!("panicking rule should fail");
    };
    assert_eq!(record.violations.len(), 1);
    assert!(!IN_RULE.get());

    let rule = Rule::new("ok", "Ok", Severity::Error, passing);
    assert!(matches!(execute_rule(&rule, &ctx), RuleExecution::Completed(_)));
    assert!(!IN_RULE.get());
}

#[test]
fn builtin_rules_complete_when_a_scanned_file_disappears() {
    let dir = project(&[("src/ok.js", "// @aocs-role: util\nconst ok = 1;\n")]);
    let config = Config::new(vec!["javascript".to_string()], Mode::Strict);
    let files = FileList::new(
        dir.path(),
        vec![dir.path().join("src/ok.js"), dir.path().join("src/vanished.js")],
    );
    let languages = LanguageRegistry::default();
    let ctx = RuleContext {
        project_root: dir.path(),
        config: &config,
        files: &files,
        languages: &languages,
    };

    for rule in &RuleRegistry::builtin().rules_for(&config) {
        if ["file-roles", "inline-hints", "forbidden-patterns", "module-manifest"]
            .contains(&rule.id)
        {
            assert!(
                matches!(execute_rule(rule, &ctx), RuleExecution::Completed(_)),
                "{} failed",
                rule.id
            );
        }
    }
    let file_roles = RuleRegistry::builtin().universal().get("file-roles").copied().unwrap();
    assert_eq!(
        execute_rule(&file_roles, &ctx),
        RuleExecution::Completed(vec![ResultRecord::new(
            "file-roles",
            "File role declarations",
            Severity::Error,
            Vec::new()
        )])
    );
}

#[test]
fn validation_is_idempotent() {
    let dir = project(&[
        (".aocs.json", LITE_JS),
        ("AGENTS.md", README),
        ("src/a.js", "// @aocs-role: nonsense\n"),
    ]);
    let options = ValidateOptions::default();

    let first = validate(dir.path(), &options);
    let second = validate(dir.path(), &options);
    assert_eq!(first, second);
    assert_eq!(first.failed, 1);
}

#[test]
fn node_modules_never_produce_violations() {
    let contract = r#"{"version": "1.0", "languages": ["javascript"], "mode": "strict",
        "forbiddenPatterns": ["dynamic-eval", "console-log"]}"#;
    let dir = project(&[
        (".aocs.json", contract),
        ("AGENTS.md", README),
        ("node_modules/lib/index.js", "eval(code);\nconsole.log(1);\nexport default 1;\n"),
    ]);
    let summary = validate(dir.path(), &ValidateOptions::default());

    assert_eq!(summary.failed, 0);
    assert_eq!(summary.warnings, 0);
    for result in &summary.results {
        assert!(result.is_clean(), "{} reported violations", result.id);
    }
}

#[test]
fn dynamic_eval_is_reported_at_its_line() {
    let contract = r#"{"version": "1.0", "languages": ["javascript"], "mode": "lite",
        "forbiddenPatterns": ["dynamic-eval"]}"#;
    let dir = project(&[
        (".aocs.json", contract),
        ("AGENTS.md", README),
        ("src/run.js", "const input = read();\nconst out = eval(input);\n"),
    ]);
    let summary = validate(dir.path(), &ValidateOptions::default());

    let forbidden = record(&summary, "forbidden-patterns");
    assert_eq!(forbidden.severity, Severity::Error);
    assert_eq!(forbidden.violations.len(), 1);
    assert_eq!(forbidden.violations[0].file.as_deref(), Some(Path::new("src/run.js")));
    assert_eq!(forbidden.violations[0].line, Some(2));
    assert_eq!(summary.failed, 1);
}

#[test]
fn strict_export_without_manifest_warns_at_line_one() {
    let contract = r#"{"version": "1.0", "languages": ["javascript"], "mode": "strict"}"#;
    let dir = project(&[
        (".aocs.json", contract),
        ("AGENTS.md", README),
        ("src/api.js", "// @aocs-role: util\nexport function get() {}\n"),
    ]);
    let summary = validate(dir.path(), &ValidateOptions::default());

    let manifest = record(&summary, "module-manifest");
    assert_eq!(manifest.severity, Severity::Warn);
    assert_eq!(manifest.violations.len(), 1);
    assert_eq!(manifest.violations[0].line, Some(1));
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.warnings, 1);
}

#[test]
fn invalid_exclude_glob_becomes_scan_record() {
    let dir = project(&[(".aocs.json", LITE_JS)]);
    let options = ValidateOptions {
        exclude: vec!["src/[".to_string()],
    };
    let summary = validate(dir.path(), &options);

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].id, "scan");
    assert_eq!(summary.failed, 1);
}

#[test]
fn exclude_globs_hide_files_from_rules() {
    let contract = r#"{"version": "1.0", "languages": ["javascript"], "mode": "strict"}"#;
    let dir = project(&[
        (".aocs.json", contract),
        ("AGENTS.md", README),
        ("vendor/lib.js", "const x = 1;\n"),
    ]);

    let without = validate(dir.path(), &ValidateOptions::default());
    assert_eq!(record(&without, "file-roles").violations.len(), 1);

    let options = ValidateOptions {
        exclude: vec!["vendor/**".to_string()],
    };
    let with = validate(dir.path(), &options);
    assert!(record(&with, "file-roles").is_clean());
}

#[test]
fn builtin_universal_rules_run_first() {
    let dir = project(&[(".aocs.json", LITE_JS), ("AGENTS.md", README)]);
    let summary = validate(dir.path(), &ValidateOptions::default());

    let universal_ids: Vec<&str> = universal::rules().iter().map(|r| r.id).collect();
    let leading: Vec<&str> = summary
        .results
        .iter()
        .take(universal_ids.len())
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(leading, universal_ids);
}
