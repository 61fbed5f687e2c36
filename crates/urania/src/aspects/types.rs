use crate::body::BodyId;
use serde::{Deserialize, Serialize};

/// Aspect kinds, including the synthetic midheaven-proximity aspect used by
/// the closest-to-MC rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Square,
    Trine,
    Sesquiquadrate,
    Quincunx,
    Opposition,
    /// Never detected geometrically; raised by the scorer for the body
    /// nearest the midheaven.
    MidheavenProximity,
}

impl Aspect {
    /// Aspects detected when the rule tables do not say otherwise.
    pub const DEFAULT_SET: [Aspect; 7] = [
        Aspect::Conjunction,
        Aspect::SemiSextile,
        Aspect::Sextile,
        Aspect::Square,
        Aspect::Trine,
        Aspect::Quincunx,
        Aspect::Opposition,
    ];

    /// Exact angle in degrees; `None` for the synthetic aspect.
    pub fn angle(self) -> Option<f64> {
        match self {
            Aspect::Conjunction => Some(0.0),
            Aspect::SemiSextile => Some(30.0),
            Aspect::SemiSquare => Some(45.0),
            Aspect::Sextile => Some(60.0),
            Aspect::Square => Some(90.0),
            Aspect::Trine => Some(120.0),
            Aspect::Sesquiquadrate => Some(135.0),
            Aspect::Quincunx => Some(150.0),
            Aspect::Opposition => Some(180.0),
            Aspect::MidheavenProximity => None,
        }
    }

    /// Minor aspects have their orb capped by the minor-aspect orb.
    pub fn is_minor(self) -> bool {
        matches!(
            self,
            Aspect::SemiSextile | Aspect::SemiSquare | Aspect::Sesquiquadrate | Aspect::Quincunx
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Aspect::Conjunction => "conjunction",
            Aspect::SemiSextile => "semi_sextile",
            Aspect::SemiSquare => "semi_square",
            Aspect::Sextile => "sextile",
            Aspect::Square => "square",
            Aspect::Trine => "trine",
            Aspect::Sesquiquadrate => "sesquiquadrate",
            Aspect::Quincunx => "quincunx",
            Aspect::Opposition => "opposition",
            Aspect::MidheavenProximity => "midheaven_proximity",
        }
    }

    pub fn from_name(name: &str) -> Option<Aspect> {
        const ALL: [Aspect; 10] = [
            Aspect::Conjunction,
            Aspect::SemiSextile,
            Aspect::SemiSquare,
            Aspect::Sextile,
            Aspect::Square,
            Aspect::Trine,
            Aspect::Sesquiquadrate,
            Aspect::Quincunx,
            Aspect::Opposition,
            Aspect::MidheavenProximity,
        ];
        ALL.into_iter().find(|a| a.name() == name)
    }
}

/// A recorded aspect between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectHit {
    pub from: BodyId,
    pub to: BodyId,
    pub aspect: Aspect,
    /// Measured arc between the two bodies.
    pub separation: f64,
    /// Deviation from the exact aspect angle.
    pub orb: f64,
}
