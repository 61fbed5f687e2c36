//! Body identifiers and the reserved identifier ranges.
//!
//! Planets and points occupy small integers. Adding [`BodyId::RETRO_FLAG`]
//! yields the retrograde variant of a body; house cuspids live at
//! `HOUSE_BASE + n` for house `n` in 1..=12.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u16);

impl BodyId {
    pub const SUN: BodyId = BodyId(1);
    pub const MOON: BodyId = BodyId(2);
    pub const MERCURY: BodyId = BodyId(3);
    pub const VENUS: BodyId = BodyId(4);
    pub const MARS: BodyId = BodyId(5);
    pub const JUPITER: BodyId = BodyId(6);
    pub const SATURN: BodyId = BodyId(7);
    pub const URANUS: BodyId = BodyId(8);
    pub const NEPTUNE: BodyId = BodyId(9);
    pub const PLUTO: BodyId = BodyId(10);
    pub const CHIRON: BodyId = BodyId(11);
    pub const SELENA: BodyId = BodyId(12);
    pub const LILITH: BodyId = BodyId(13);
    pub const SOUTH_NODE: BodyId = BodyId(14);
    pub const NORTH_NODE: BodyId = BodyId(15);
    pub const PROSERPINA: BodyId = BodyId(16);
    pub const VERTEX: BodyId = BodyId(17);
    pub const PARS_FORTUNA: BodyId = BodyId(18);

    /// Bit marking the retrograde variant of a body.
    pub const RETRO_FLAG: u16 = 1024;
    /// Cuspid of house `n` is `HOUSE_BASE + n`.
    pub const HOUSE_BASE: u16 = 148;

    pub const ASC: BodyId = BodyId::cusp(1);
    pub const IC: BodyId = BodyId::cusp(4);
    pub const DSC: BodyId = BodyId::cusp(7);
    pub const MC: BodyId = BodyId::cusp(10);

    /// Cuspids in house order, ascendant first.
    pub const CUSPS: [BodyId; 12] = [
        BodyId::cusp(1),
        BodyId::cusp(2),
        BodyId::cusp(3),
        BodyId::cusp(4),
        BodyId::cusp(5),
        BodyId::cusp(6),
        BodyId::cusp(7),
        BodyId::cusp(8),
        BodyId::cusp(9),
        BodyId::cusp(10),
        BodyId::cusp(11),
        BodyId::cusp(12),
    ];

    /// Planets and points with a regular (non-cuspid) identity.
    pub const POINTS: [BodyId; 18] = [
        BodyId::SUN,
        BodyId::MOON,
        BodyId::MERCURY,
        BodyId::VENUS,
        BodyId::MARS,
        BodyId::JUPITER,
        BodyId::SATURN,
        BodyId::URANUS,
        BodyId::NEPTUNE,
        BodyId::PLUTO,
        BodyId::CHIRON,
        BodyId::SELENA,
        BodyId::LILITH,
        BodyId::SOUTH_NODE,
        BodyId::NORTH_NODE,
        BodyId::PROSERPINA,
        BodyId::VERTEX,
        BodyId::PARS_FORTUNA,
    ];

    /// Cuspid identifier of house `house` (1..=12).
    pub const fn cusp(house: u8) -> BodyId {
        BodyId(Self::HOUSE_BASE + house as u16)
    }

    pub fn is_retro(self) -> bool {
        self.0 & Self::RETRO_FLAG != 0
    }

    /// The non-retrograde identity of this body.
    pub fn direct(self) -> BodyId {
        BodyId(self.0 & !Self::RETRO_FLAG)
    }

    /// The retrograde variant of this body.
    pub fn retro(self) -> BodyId {
        BodyId(self.0 | Self::RETRO_FLAG)
    }

    pub fn is_cusp(self) -> bool {
        self.house_number().is_some()
    }

    /// House number (1..=12) when this identifier is a cuspid.
    pub fn house_number(self) -> Option<u8> {
        let id = self.direct().0;
        if id > Self::HOUSE_BASE && id <= Self::HOUSE_BASE + 12 {
            Some((id - Self::HOUSE_BASE) as u8)
        } else {
            None
        }
    }

    /// Same body regardless of retrograde polarity.
    pub fn same_identity(self, other: BodyId) -> bool {
        self.direct() == other.direct()
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.house_number() {
            Some(n) => write!(f, "cusp#{n}"),
            None if self.is_retro() => write!(f, "body#{}R", self.direct().0),
            None => write!(f, "body#{}", self.0),
        }
    }
}
