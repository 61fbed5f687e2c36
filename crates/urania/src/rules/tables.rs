//! Resolved, immutable rule tables.
//!
//! Everything here is keyed by internal identifiers; name resolution happens
//! once in the loader. Lookups that fall back from one key to another are
//! written as ordered strategy lists and the first hit wins.

use crate::aspects::Aspect;
use crate::body::BodyId;
use crate::scoring::BonusKind;
use crate::zodiac::{Element, Gender, Sign};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const DEFAULT_MINOR_ORB: f64 = 3.0;
pub const DEFAULT_LESSER_CUSP_ORB: f64 = 2.0;
pub const DEFAULT_EXALTATION_ORB: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DignityRole {
    Domicile,
    Exaltation,
    Exile,
    Fall,
}

impl DignityRole {
    pub fn bonus_kind(self) -> BonusKind {
        match self {
            DignityRole::Domicile => BonusKind::Domicile,
            DignityRole::Exaltation => BonusKind::Exaltation,
            DignityRole::Exile => BonusKind::Exile,
            DignityRole::Fall => BonusKind::Fall,
        }
    }
}

/// Closed range of absolute degrees, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeRange {
    pub from: f64,
    pub to: f64,
}

impl DegreeRange {
    pub fn contains(&self, abs_degree: f64) -> bool {
        self.from <= abs_degree && abs_degree <= self.to
    }
}

/// Special band of absolute degrees awarding its own bonus kind.
/// Both ends are included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeBand {
    pub kind: BonusKind,
    pub range: DegreeRange,
    pub points: i32,
}

/// A term of a sign: `from` included, `to` excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub from: f64,
    pub to: f64,
    pub points: i32,
}

impl Term {
    pub fn contains(&self, abs_degree: f64) -> bool {
        self.from <= abs_degree && abs_degree < self.to
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyAttributes {
    pub gender: Option<Gender>,
    pub element: Option<Element>,
    pub malefic: bool,
    /// Absolute degree of exact exaltation.
    pub exaltation: Option<f64>,
}

/// Planetary-hour rulers of one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRulers {
    pub day: [BodyId; 12],
    pub night: [BodyId; 12],
}

/// Bonus awarded to body 1 of an aspect matching every condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectBonusRule {
    pub kind: BonusKind,
    /// Bodies eligible to receive the bonus.
    pub bodies: HashSet<BodyId>,
    pub aspect: Aspect,
    /// Other body of the aspect; either retrograde polarity matches.
    pub target: BodyId,
    /// Inclusive orb band; `None` accepts any orb.
    pub orb_band: Option<(f64, f64)>,
    pub points: i32,
}

impl AspectBonusRule {
    pub fn matches(&self, recipient: BodyId, other: BodyId, aspect: Aspect, orb: f64) -> bool {
        self.aspect == aspect
            && other.same_identity(self.target)
            && self.bodies.contains(&recipient)
            && self
                .orb_band
                .map_or(true, |(from, to)| from <= orb && orb <= to)
    }
}

/// Per-body per-sign 30-entry degree bonus arrays.
///
/// Built from a base table plus an alias list. Every retrograde variant
/// shares its direct body's arrays unless an alias points it elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DegreeBonusTable {
    tables: HashMap<BodyId, HashMap<Sign, [i32; 30]>>,
}

impl DegreeBonusTable {
    /// Resolves `aliases` (`(body, source)`: `body` uses `source`'s arrays)
    /// on top of `base`.
    pub fn build(
        base: HashMap<BodyId, HashMap<Sign, [i32; 30]>>,
        aliases: &[(BodyId, BodyId)],
    ) -> Self {
        let mut tables = base.clone();
        for (body, per_sign) in &base {
            if !body.is_retro() && !body.is_cusp() {
                tables.entry(body.retro()).or_insert_with(|| per_sign.clone());
            }
        }
        for (body, source) in aliases {
            match base.get(source) {
                Some(per_sign) => {
                    tables.insert(*body, per_sign.clone());
                }
                None => log::warn!("degree bonus alias {body} -> {source}: source has no table"),
            }
        }
        Self { tables }
    }

    /// Points for the integer part of `degree` within `sign`.
    pub fn lookup(&self, body: BodyId, sign: Sign, degree: f64) -> Option<i32> {
        let per_sign = self.tables.get(&body)?.get(&sign)?;
        let index = (degree.floor().max(0.0) as usize).min(29);
        Some(per_sign[index])
    }
}

type OrbStrategy = fn(&RuleTables, BodyId, BodyId) -> Option<f64>;

/// Orb resolution order for a pair of bodies.
const ORB_STRATEGIES: [OrbStrategy; 3] = [
    |t, a, b| t.table_orb(a, b),
    |t, a, b| t.table_orb(b, a),
    |t, a, b| (a.is_cusp() != b.is_cusp()).then_some(t.lesser_cusp_orb),
];

type DignityStrategy = fn(&RuleTables, Sign, BodyId) -> Option<DignityRole>;

/// Exact identifier first, then the direct identity of a retrograde body.
const DIGNITY_STRATEGIES: [DignityStrategy; 2] = [
    |t, sign, body| t.dignities.get(&sign)?.get(&body).copied(),
    |t, sign, body| t.dignities.get(&sign)?.get(&body.direct()).copied(),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RuleTables {
    /// Aspects checked by the detector, in evaluation order.
    pub aspects: Vec<Aspect>,
    pub minor_orb: f64,
    pub lesser_cusp_orb: f64,
    pub exaltation_orb: f64,
    /// Corporeal bodies eligible for the closest-to-midheaven rule.
    pub real_planets: HashSet<BodyId>,
    /// Major-aspect orbs keyed by direct identities, as configured.
    pub major_orbs: HashMap<BodyId, HashMap<BodyId, f64>>,
    /// Average daily speed in degrees.
    pub avg_speeds: HashMap<BodyId, f64>,
    pub modality_ranges: HashMap<Sign, Vec<DegreeRange>>,
    pub dignities: HashMap<Sign, HashMap<BodyId, DignityRole>>,
    pub attributes: HashMap<BodyId, BodyAttributes>,
    pub points: HashMap<BonusKind, i32>,
    pub weekday_rulers: HashMap<Weekday, BodyId>,
    /// Indexed by `year mod 7`.
    pub year_rulers: Vec<BodyId>,
    pub hour_rulers: HashMap<Weekday, HourRulers>,
    pub degree_bands: Vec<DegreeBand>,
    /// `[house - 1][third - 1]`.
    pub house_thirds: HashMap<BodyId, [[i32; 3]; 12]>,
    pub terms: HashMap<BodyId, HashMap<Sign, Vec<Term>>>,
    /// `[integer degree mod 7]` -> owning bodies.
    pub degree_owners: HashMap<Sign, [HashSet<BodyId>; 7]>,
    pub degree_bonuses: DegreeBonusTable,
    pub aspect_bonuses: Vec<AspectBonusRule>,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            aspects: Aspect::DEFAULT_SET.to_vec(),
            minor_orb: DEFAULT_MINOR_ORB,
            lesser_cusp_orb: DEFAULT_LESSER_CUSP_ORB,
            exaltation_orb: DEFAULT_EXALTATION_ORB,
            real_planets: BodyId::POINTS[..10].iter().copied().collect(),
            major_orbs: HashMap::new(),
            avg_speeds: HashMap::new(),
            modality_ranges: HashMap::new(),
            dignities: HashMap::new(),
            attributes: HashMap::new(),
            points: HashMap::new(),
            weekday_rulers: HashMap::new(),
            year_rulers: Vec::new(),
            hour_rulers: HashMap::new(),
            degree_bands: Vec::new(),
            house_thirds: HashMap::new(),
            terms: HashMap::new(),
            degree_owners: HashMap::new(),
            degree_bonuses: DegreeBonusTable::default(),
            aspect_bonuses: Vec::new(),
        }
    }
}

impl RuleTables {
    fn table_orb(&self, a: BodyId, b: BodyId) -> Option<f64> {
        self.major_orbs.get(&a.direct())?.get(&b.direct()).copied()
    }

    /// Orb tolerance for a pair, `None` when no strategy applies.
    pub fn orb_between(&self, a: BodyId, b: BodyId) -> Option<f64> {
        ORB_STRATEGIES.iter().find_map(|strategy| strategy(self, a, b))
    }

    /// Tolerance for a specific aspect given the pair's orb.
    pub fn aspect_tolerance(&self, aspect: Aspect, pair_orb: f64) -> f64 {
        if aspect.is_minor() {
            pair_orb.min(self.minor_orb)
        } else {
            pair_orb
        }
    }

    pub fn dignity(&self, sign: Sign, body: BodyId) -> Option<DignityRole> {
        DIGNITY_STRATEGIES
            .iter()
            .find_map(|strategy| strategy(self, sign, body))
    }

    /// Signs in which the body (by direct identity) holds domicile.
    pub fn domicile_signs(&self, body: BodyId) -> impl Iterator<Item = Sign> + '_ {
        Sign::ALL
            .into_iter()
            .filter(move |sign| self.dignity(*sign, body) == Some(DignityRole::Domicile))
    }

    pub fn points_for(&self, kind: &BonusKind) -> Option<i32> {
        self.points.get(kind).copied()
    }

    pub fn avg_speed(&self, body: BodyId) -> Option<f64> {
        self.avg_speeds.get(&body.direct()).copied()
    }

    pub fn attributes(&self, body: BodyId) -> Option<&BodyAttributes> {
        self.attributes.get(&body.direct())
    }

    pub fn house_third_points(&self, body: BodyId, house: u8, third: u8) -> Option<i32> {
        let table = self.house_thirds.get(&body.direct())?;
        let row = table.get(usize::from(house).checked_sub(1)?)?;
        row.get(usize::from(third).checked_sub(1)?).copied()
    }

    pub fn term_at(&self, body: BodyId, sign: Sign, abs_degree: f64) -> Option<&Term> {
        self.terms
            .get(&body.direct())?
            .get(&sign)?
            .iter()
            .find(|term| term.contains(abs_degree))
    }

    pub fn owns_degree(&self, body: BodyId, sign: Sign, degree: f64) -> bool {
        let slot = (degree.floor().max(0.0) as usize) % 7;
        self.degree_owners
            .get(&sign)
            .map_or(false, |owners| owners[slot].contains(&body.direct()))
    }

    pub fn hour_ruler(&self, weekday: Weekday, hour: u8, diurnal: bool) -> Option<BodyId> {
        let rulers = self.hour_rulers.get(&weekday)?;
        let index = usize::from(hour).checked_sub(1)?;
        let sequence = if diurnal { &rulers.day } else { &rulers.night };
        sequence.get(index).copied()
    }

    pub fn weekday_ruler(&self, weekday: Weekday) -> Option<BodyId> {
        self.weekday_rulers.get(&weekday).copied()
    }

    pub fn year_ruler(&self, year: i32) -> Option<BodyId> {
        if self.year_rulers.is_empty() {
            return None;
        }
        let index = year.rem_euclid(7) as usize;
        self.year_rulers.get(index).copied()
    }
}
