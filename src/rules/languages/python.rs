use crate::error::Result;
use crate::rules::{Rule, RuleContext, RuleOutcome, RuleSet, Severity};

use super::{SERVICE_EFFECTS, effects_required, require_role_annotation};

pub fn rules() -> RuleSet {
    RuleSet::new(vec![Rule::new(
        "py-service-effects",
        "Python service side-effect annotation",
        Severity::Warn,
        check_service_effects,
    )])
}

fn check_service_effects(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    if !effects_required(ctx.config) {
        return Ok(RuleOutcome::pass());
    }
    require_role_annotation(ctx, "python", &SERVICE_EFFECTS)
}
