use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A named scoring category.
///
/// Fixed kinds take their points from the flat point table; `Named` kinds
/// come from configured degree bands and aspect-bonus rules, which carry
/// their own points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BonusKind {
    Domicile,
    Exaltation,
    Exile,
    Fall,
    OwnHouse,
    Cardinal,
    Fixed,
    Mutable,
    HouseThird,
    DegreeBonus,
    Terms,
    OwnDegree,
    OwnElement,
    OwnGender,
    WrongGender,
    ExaltationDegree,
    Retrograde,
    Fast,
    Slow,
    HourRuler,
    DayRuler,
    YearRuler,
    AscendantDominant,
    MidheavenDominant,
    Named(String),
}

const FIXED_KINDS: [(BonusKind, &str); 24] = [
    (BonusKind::Domicile, "domicile"),
    (BonusKind::Exaltation, "exaltation"),
    (BonusKind::Exile, "exile"),
    (BonusKind::Fall, "fall"),
    (BonusKind::OwnHouse, "own_house"),
    (BonusKind::Cardinal, "cardinal"),
    (BonusKind::Fixed, "fixed"),
    (BonusKind::Mutable, "mutable"),
    (BonusKind::HouseThird, "house_third"),
    (BonusKind::DegreeBonus, "degree_bonus"),
    (BonusKind::Terms, "terms"),
    (BonusKind::OwnDegree, "own_degree"),
    (BonusKind::OwnElement, "own_element"),
    (BonusKind::OwnGender, "own_gender"),
    (BonusKind::WrongGender, "wrong_gender"),
    (BonusKind::ExaltationDegree, "exaltation_degree"),
    (BonusKind::Retrograde, "retrograde"),
    (BonusKind::Fast, "fast"),
    (BonusKind::Slow, "slow"),
    (BonusKind::HourRuler, "hour_ruler"),
    (BonusKind::DayRuler, "day_ruler"),
    (BonusKind::YearRuler, "year_ruler"),
    (BonusKind::AscendantDominant, "ascendant_dominant"),
    (BonusKind::MidheavenDominant, "midheaven_dominant"),
];

impl BonusKind {
    pub fn name(&self) -> &str {
        match self {
            BonusKind::Named(name) => name,
            fixed => FIXED_KINDS
                .iter()
                .find(|(kind, _)| kind == fixed)
                .map(|(_, name)| *name)
                .unwrap_or("unknown"),
        }
    }

    /// Fixed kind with this name, if any.
    pub fn fixed(name: &str) -> Option<BonusKind> {
        FIXED_KINDS
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(kind, _)| kind.clone())
    }

    /// Fixed kind when the name is reserved, otherwise a named kind.
    pub fn from_name(name: &str) -> BonusKind {
        Self::fixed(name).unwrap_or_else(|| BonusKind::Named(name.to_string()))
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for BonusKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for BonusKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(BonusKind::from_name(&name))
    }
}

/// Insertion-ordered bonus mapping of one body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bonuses(IndexMap<BonusKind, i32>);

impl Bonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the points of a kind; a kind already present keeps its position.
    pub fn set(&mut self, kind: BonusKind, points: i32) {
        self.0.insert(kind, points);
    }

    pub fn get(&self, kind: &BonusKind) -> Option<i32> {
        self.0.get(kind).copied()
    }

    pub fn contains(&self, kind: &BonusKind) -> bool {
        self.0.contains_key(kind)
    }

    pub fn total(&self) -> i32 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BonusKind, i32)> {
        self.0.iter().map(|(kind, points)| (kind, *points))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
