use crate::aspects::Aspect;
use crate::body::BodyId;
use crate::chart::ChartModel;
use crate::rules::{AspectBonusRule, RuleTables};

/// Rules matching an aspect from `recipient` to `other` at `orb`.
pub fn matching_rules<'r>(
    tables: &'r RuleTables,
    recipient: BodyId,
    other: BodyId,
    aspect: Aspect,
    orb: f64,
) -> impl Iterator<Item = &'r AspectBonusRule> {
    tables
        .aspect_bonuses
        .iter()
        .filter(move |rule| rule.matches(recipient, other, aspect, orb))
}

/// Awards every matching aspect-bonus rule to `recipient`. Returns the
/// number of rules applied.
pub fn apply_aspect_bonuses(
    chart: &mut ChartModel,
    tables: &RuleTables,
    recipient: BodyId,
    other: BodyId,
    aspect: Aspect,
    orb: f64,
) -> usize {
    let Some(body) = chart.body_mut(recipient) else {
        return 0;
    };
    let mut applied = 0;
    for rule in matching_rules(tables, recipient, other, aspect, orb) {
        log::debug!(
            "aspect bonus {} {:+} for {recipient} ({} to {other}, orb {orb:.3})",
            rule.kind,
            rule.points,
            aspect.name()
        );
        body.award(rule.kind.clone(), rule.points);
        applied += 1;
    }
    applied
}
