//! Planetary hour, day and year rulers.

use crate::body::BodyId;
use crate::diagnostics::RulerRole;
use crate::natal::NatalMoment;
use crate::rules::RuleTables;
use crate::scoring::BonusKind;

impl RulerRole {
    pub const ALL: [RulerRole; 3] = [RulerRole::Hour, RulerRole::Day, RulerRole::Year];

    pub fn bonus_kind(self) -> BonusKind {
        match self {
            RulerRole::Hour => BonusKind::HourRuler,
            RulerRole::Day => BonusKind::DayRuler,
            RulerRole::Year => BonusKind::YearRuler,
        }
    }
}

/// Ruler of the given role for a birth moment, if the tables know it.
pub fn ruler_for(tables: &RuleTables, natal: &NatalMoment, role: RulerRole) -> Option<BodyId> {
    match role {
        RulerRole::Hour => tables.hour_ruler(natal.weekday, natal.hour.hour, natal.hour.diurnal),
        RulerRole::Day => tables.weekday_ruler(natal.weekday),
        RulerRole::Year => tables.year_ruler(natal.year),
    }
}
