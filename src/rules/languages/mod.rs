//! Per-language rule sets.
//!
//! Languages without an entry (rust, go, unknown names) contribute no rules.

mod javascript;
mod python;
mod typescript;

use std::collections::HashMap;

use crate::config::{Config, SideEffects, StateOwnership};
use crate::error::Result;

use super::{RuleContext, RuleOutcome, RuleSet, Violation};

/// Built-in lookup table from lowercase language name to rule set.
#[must_use]
pub fn rule_sets() -> HashMap<&'static str, RuleSet> {
    HashMap::from([
        ("javascript", javascript::rules()),
        ("typescript", typescript::rules()),
        ("python", python::rules()),
    ])
}

/// A hint that files of a given role must carry.
struct RoleAnnotation {
    role: &'static str,
    hint: &'static str,
}

const STATE_OWNER: RoleAnnotation = RoleAnnotation {
    role: "state",
    hint: "owner",
};

const SERVICE_EFFECTS: RoleAnnotation = RoleAnnotation {
    role: "service",
    hint: "side-effects",
};

fn owner_required(config: &Config) -> bool {
    config.state_ownership != Some(StateOwnership::Shared)
}

fn effects_required(config: &Config) -> bool {
    config.side_effects != Some(SideEffects::Unrestricted)
}

/// Report every `language` file declaring `annotation.role` without the
/// matching hint.
fn require_role_annotation(
    ctx: &RuleContext<'_>,
    language: &str,
    annotation: &RoleAnnotation,
) -> Result<RuleOutcome> {
    let mut violations = Vec::new();

    for source in ctx.source_files_of(language) {
        let declared = source
            .hint_values("role")
            .into_iter()
            .find(|(_, role)| role == annotation.role);
        if let Some((line, _)) = declared
            && !source.has_hint(annotation.hint)
        {
            violations.push(Violation::at(
                &source.path,
                line,
                format!(
                    "'{}' role requires an @aocs-{} annotation",
                    annotation.role, annotation.hint
                ),
            ));
        }
    }

    Ok(RuleOutcome::with_violations(violations))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
