use crate::aspects::AspectHit;
use crate::body::BodyId;
use crate::diagnostics::{Diagnostic, Notice};
use crate::geometry::{absolute_degree, shortest_arc, SIGN_ARC};
use crate::natal::NatalMoment;
use crate::scoring::{BonusKind, Bonuses};
use crate::zodiac::Sign;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One parsed `(body, sign, degree)` line, already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub body: BodyId,
    pub sign_index: u8,
    pub degree: f64,
}

impl PositionRecord {
    pub fn new(body: BodyId, sign: Sign, degree: f64) -> Self {
        Self {
            body,
            sign_index: sign.index(),
            degree,
        }
    }

    /// Resolved sign and degree, or the reason the record is unusable.
    fn validate(&self) -> Result<(Sign, f64), String> {
        let sign = Sign::from_index(self.sign_index)
            .ok_or_else(|| format!("sign index {} outside 0..12", self.sign_index))?;
        if !self.degree.is_finite() || self.degree < 0.0 || self.degree >= SIGN_ARC {
            return Err(format!("degree {} outside [0, 30)", self.degree));
        }
        Ok((sign, self.degree))
    }
}

/// A body or cuspid placed in the chart, with all per-body analysis state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialBody {
    id: BodyId,
    sign: Sign,
    degree: f64,
    abs_degree: f64,
    house: Option<u8>,
    third: Option<u8>,
    previous: Option<f64>,
    bonuses: Bonuses,
}

impl CelestialBody {
    pub fn new(id: BodyId, sign: Sign, degree: f64) -> Self {
        Self {
            id,
            sign,
            degree,
            abs_degree: absolute_degree(sign.index(), degree),
            house: None,
            third: None,
            previous: None,
            bonuses: Bonuses::new(),
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Degree within the sign, in [0, 30).
    pub fn degree(&self) -> f64 {
        self.degree
    }

    pub fn abs_degree(&self) -> f64 {
        self.abs_degree
    }

    /// Moves the body; the absolute degree follows.
    pub fn set_position(&mut self, sign: Sign, degree: f64) {
        self.sign = sign;
        self.degree = degree;
        self.abs_degree = absolute_degree(sign.index(), degree);
    }

    pub fn house(&self) -> Option<u8> {
        self.house
    }

    pub fn third(&self) -> Option<u8> {
        self.third
    }

    pub(crate) fn place(&mut self, house: u8, third: u8) {
        self.house = Some(house);
        self.third = Some(third);
    }

    pub fn previous_abs_degree(&self) -> Option<f64> {
        self.previous
    }

    pub fn set_previous(&mut self, abs_degree: f64) {
        self.previous = Some(abs_degree);
    }

    /// Arc travelled since the previous-day position.
    pub fn daily_speed(&self) -> Option<f64> {
        self.previous.map(|prev| shortest_arc(self.abs_degree, prev))
    }

    pub fn bonuses(&self) -> &Bonuses {
        &self.bonuses
    }

    pub fn award(&mut self, kind: BonusKind, points: i32) {
        self.bonuses.set(kind, points);
    }

    pub fn total(&self) -> i32 {
        self.bonuses.total()
    }

    fn reset_analysis(&mut self) {
        self.house = None;
        self.third = None;
        self.bonuses.clear();
    }
}

/// One chart: positions, cuspids, natal moment and analysis results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartModel {
    bodies: IndexMap<BodyId, CelestialBody>,
    natal: Option<NatalMoment>,
    aspects: Vec<AspectHit>,
    diagnostics: Vec<Diagnostic>,
    notices: Vec<Notice>,
}

impl ChartModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a position; an invalid record is discarded and
    /// reported as a diagnostic.
    pub fn add_position(&mut self, record: PositionRecord) -> bool {
        match record.validate() {
            Ok((sign, degree)) => {
                self.bodies
                    .insert(record.body, CelestialBody::new(record.body, sign, degree));
                true
            }
            Err(reason) => {
                log::warn!("discarding position of {}: {reason}", record.body);
                self.diagnostics.push(Diagnostic::InvalidPosition {
                    body: record.body,
                    reason,
                });
                false
            }
        }
    }

    /// Attaches a previous-day position to a body already in the chart.
    pub fn add_previous(&mut self, record: PositionRecord) -> bool {
        let (sign, degree) = match record.validate() {
            Ok(resolved) => resolved,
            Err(reason) => {
                self.diagnostics.push(Diagnostic::InvalidPosition {
                    body: record.body,
                    reason,
                });
                return false;
            }
        };
        match self.bodies.get_mut(&record.body) {
            Some(body) => {
                body.set_previous(absolute_degree(sign.index(), degree));
                true
            }
            None => {
                log::warn!("previous-day position for {} without a current one", record.body);
                self.diagnostics
                    .push(Diagnostic::OrphanPrevious { body: record.body });
                false
            }
        }
    }

    pub fn set_natal(&mut self, natal: NatalMoment) {
        self.natal = Some(natal);
    }

    pub fn natal(&self) -> Option<&NatalMoment> {
        self.natal.as_ref()
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(&id)
    }

    /// All bodies and cuspids in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.values()
    }

    /// Bodies that are not house cuspids, in insertion order.
    pub fn planets(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.values().filter(|b| !b.id.is_cusp())
    }

    /// Cuspid of house `house` (1..=12).
    pub fn cusp(&self, house: u8) -> Option<&CelestialBody> {
        self.bodies.get(&BodyId::cusp(house))
    }

    /// Chart body with this identity in either retrograde polarity.
    pub fn find_identity(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies
            .get(&id)
            .or_else(|| self.bodies.values().find(|b| b.id.same_identity(id)))
    }

    pub fn aspects(&self) -> &[AspectHit] {
        &self.aspects
    }

    pub(crate) fn push_aspect(&mut self, hit: AspectHit) {
        self.aspects.push(hit);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub(crate) fn notice(&mut self, notice: Notice) {
        log::warn!("{notice:?}");
        self.notices.push(notice);
    }

    /// Clears houses, bonuses, aspects and notices from a previous run.
    pub(crate) fn reset_analysis(&mut self) {
        for body in self.bodies.values_mut() {
            body.reset_analysis();
        }
        self.aspects.clear();
        self.notices.clear();
    }

    pub fn total(&self, id: BodyId) -> Option<i32> {
        self.body(id).map(CelestialBody::total)
    }
}
