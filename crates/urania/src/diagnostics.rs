//! Non-fatal conditions surfaced to the caller.
//!
//! A [`Diagnostic`] reports input that was discarded. A [`Notice`] reports a
//! structural gap found during analysis; the dependent rule was skipped.

use crate::body::BodyId;
use crate::zodiac::Sign;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A line could not be resolved into a record.
    UnresolvedLine { line: usize, text: String, reason: String },
    /// A resolved record carried an impossible sign or degree.
    InvalidPosition { body: BodyId, reason: String },
    /// A previous-day record names a body that has no current position.
    OrphanPrevious { body: BodyId },
    /// A natal time line was incomplete.
    IncompleteNatal { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    Ascendant,
    Midheaven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RulerRole {
    Hour,
    Day,
    Year,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A house could not be sized because a cuspid is absent.
    MissingCusp { house: u8 },
    /// A body fell into no house.
    Unhoused { body: BodyId },
    /// No body holds domicile in the sign of the angle.
    NoDominant { angle: Angle, sign: Sign },
    /// The angle's cuspid is absent, so dominance was not evaluated.
    MissingAngle { angle: Angle },
    /// The ruler table names a body that is not in the chart.
    RulerAbsent { role: RulerRole, ruler: BodyId },
    /// The ruler table has no entry for this chart's moment.
    RulerUnknown { role: RulerRole },
    /// Natal moment unknown, ruler rules skipped.
    NoNatalMoment,
    /// No eligible body in houses 9 and 10.
    NoMidheavenCandidate,
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::Ascendant => f.write_str("ascendant"),
            Angle::Midheaven => f.write_str("midheaven"),
        }
    }
}

impl fmt::Display for RulerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulerRole::Hour => f.write_str("hour"),
            RulerRole::Day => f.write_str("day"),
            RulerRole::Year => f.write_str("year"),
        }
    }
}
