use crate::error::Result;
use crate::rules::{Rule, RuleContext, RuleOutcome, RuleSet, Severity};

use super::{
    SERVICE_EFFECTS, STATE_OWNER, effects_required, owner_required, require_role_annotation,
};

const LANGUAGE: &str = "typescript";

pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        Rule::new(
            "ts-state-owner",
            "TypeScript state owner annotation",
            Severity::Error,
            check_state_owner,
        ),
        Rule::new(
            "ts-service-effects",
            "TypeScript service side-effect annotation",
            Severity::Warn,
            check_service_effects,
        ),
    ])
}

fn check_state_owner(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    if !owner_required(ctx.config) {
        return Ok(RuleOutcome::pass());
    }
    require_role_annotation(ctx, LANGUAGE, &STATE_OWNER)
}

fn check_service_effects(ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
    if !effects_required(ctx.config) {
        return Ok(RuleOutcome::pass());
    }
    require_role_annotation(ctx, LANGUAGE, &SERVICE_EFFECTS)
}
