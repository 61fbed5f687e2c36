//! Dignity-based rules: sign role, own house, and angle dominance.

use crate::body::BodyId;
use crate::chart::{CelestialBody, ChartModel};
use crate::diagnostics::{Angle, Notice};
use crate::rules::{DignityRole, RuleTables};
use crate::scoring::BonusKind;
use crate::zodiac::Sign;

/// Dignity role of the body in its sign and the points configured for it.
pub fn dignity_award(tables: &RuleTables, body: &CelestialBody) -> Option<(DignityRole, i32)> {
    let role = tables.dignity(body.sign(), body.id())?;
    let points = tables.points_for(&role.bonus_kind())?;
    Some((role, points))
}

/// The body sits in the house whose natural sign (house 1 = Aries) it rules.
pub fn in_own_house(tables: &RuleTables, body: &CelestialBody) -> bool {
    let Some(natural_sign) = body
        .house()
        .and_then(|h| h.checked_sub(1))
        .and_then(Sign::from_index) else {
        return false;
    };
    tables.dignity(natural_sign, body.id()) == Some(DignityRole::Domicile)
}

impl Angle {
    pub fn cusp(self) -> BodyId {
        match self {
            Angle::Ascendant => BodyId::ASC,
            Angle::Midheaven => BodyId::MC,
        }
    }

    pub fn bonus_kind(self) -> BonusKind {
        match self {
            Angle::Ascendant => BonusKind::AscendantDominant,
            Angle::Midheaven => BonusKind::MidheavenDominant,
        }
    }
}

/// Chart bodies holding domicile in the sign of the angle's cuspid.
pub fn angle_dominants(
    chart: &ChartModel,
    tables: &RuleTables,
    angle: Angle,
) -> Result<Vec<BodyId>, Notice> {
    let cusp = chart
        .body(angle.cusp())
        .ok_or(Notice::MissingAngle { angle })?;
    let sign = cusp.sign();
    let dominants: Vec<BodyId> = chart
        .planets()
        .filter(|body| tables.dignity(sign, body.id()) == Some(DignityRole::Domicile))
        .map(CelestialBody::id)
        .collect();
    if dominants.is_empty() {
        Err(Notice::NoDominant { angle, sign })
    } else {
        Ok(dominants)
    }
}
