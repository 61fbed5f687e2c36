//! Bonus scoring.
//!
//! Per-body rules each read one body and the rule tables and propose
//! `(kind, points)` awards; they run in a fixed order so the bonus mapping
//! reads the same way for every chart. Chart-wide rules (rulers, angle
//! dominance, closest to the midheaven) run afterwards. Every rule owns a
//! distinct bonus kind, so the total does not depend on the order.

use crate::aspects::Aspect;
use crate::body::BodyId;
use crate::chart::{CelestialBody, ChartModel};
use crate::diagnostics::{Angle, Notice, RulerRole};
use crate::geometry::shortest_arc;
use crate::rules::RuleTables;
use crate::scoring::aspect_bonus::apply_aspect_bonuses;
use crate::scoring::dignities::{angle_dominants, dignity_award, in_own_house};
use crate::scoring::rulers::ruler_for;
use crate::scoring::BonusKind;
use crate::zodiac::Modality;

type Awards = Vec<(BonusKind, i32)>;

pub struct BonusScorer<'a> {
    tables: &'a RuleTables,
}

impl<'a> BonusScorer<'a> {
    /// Per-body rules in presentation order.
    const BODY_RULES: [fn(&Self, &CelestialBody, &mut Awards); 12] = [
        Self::dignity,
        Self::own_house,
        Self::modality_arc,
        Self::degree_bands,
        Self::house_third,
        Self::degree_bonus,
        Self::terms,
        Self::own_degree,
        Self::affinity,
        Self::exaltation_degree,
        Self::retrograde,
        Self::speed,
    ];

    pub fn new(tables: &'a RuleTables) -> Self {
        Self { tables }
    }

    /// Runs every rule against the chart. Houses must already be assigned.
    pub fn score(&self, chart: &mut ChartModel) {
        let per_body: Vec<(BodyId, Awards)> = chart
            .planets()
            .map(|body| (body.id(), self.body_awards(body)))
            .collect();
        for (id, awards) in per_body {
            if let Some(body) = chart.body_mut(id) {
                for (kind, points) in awards {
                    body.award(kind, points);
                }
            }
        }

        self.score_rulers(chart);
        for angle in [Angle::Ascendant, Angle::Midheaven] {
            self.score_dominance(chart, angle);
        }
        self.score_closest_to_midheaven(chart);
    }

    /// Awards of the per-body rules for one body, in rule order.
    pub fn body_awards(&self, body: &CelestialBody) -> Awards {
        let mut awards = Vec::new();
        for rule in Self::BODY_RULES {
            rule(self, body, &mut awards);
        }
        awards
    }

    /// Pushes `kind` with its points from the flat point table, if any.
    fn push_flat(&self, kind: BonusKind, awards: &mut Awards) {
        match self.tables.points_for(&kind) {
            Some(points) => awards.push((kind, points)),
            None => log::debug!("no points configured for {kind}"),
        }
    }

    fn dignity(&self, body: &CelestialBody, awards: &mut Awards) {
        if let Some((role, points)) = dignity_award(self.tables, body) {
            awards.push((role.bonus_kind(), points));
        }
    }

    fn own_house(&self, body: &CelestialBody, awards: &mut Awards) {
        if in_own_house(self.tables, body) {
            self.push_flat(BonusKind::OwnHouse, awards);
        }
    }

    fn modality_arc(&self, body: &CelestialBody, awards: &mut Awards) {
        let Some(ranges) = self.tables.modality_ranges.get(&body.sign()) else {
            return;
        };
        if ranges.iter().any(|range| range.contains(body.abs_degree())) {
            let kind = match body.sign().modality() {
                Modality::Cardinal => BonusKind::Cardinal,
                Modality::Fixed => BonusKind::Fixed,
                Modality::Mutable => BonusKind::Mutable,
            };
            self.push_flat(kind, awards);
        }
    }

    fn degree_bands(&self, body: &CelestialBody, awards: &mut Awards) {
        for band in &self.tables.degree_bands {
            if band.range.contains(body.abs_degree()) {
                awards.push((band.kind.clone(), band.points));
            }
        }
    }

    fn house_third(&self, body: &CelestialBody, awards: &mut Awards) {
        let (Some(house), Some(third)) = (body.house(), body.third()) else {
            return;
        };
        if let Some(points) = self.tables.house_third_points(body.id(), house, third) {
            awards.push((BonusKind::HouseThird, points));
        }
    }

    fn degree_bonus(&self, body: &CelestialBody, awards: &mut Awards) {
        if let Some(points) = self
            .tables
            .degree_bonuses
            .lookup(body.id(), body.sign(), body.degree())
        {
            awards.push((BonusKind::DegreeBonus, points));
        }
    }

    fn terms(&self, body: &CelestialBody, awards: &mut Awards) {
        if let Some(term) = self.tables.term_at(body.id(), body.sign(), body.abs_degree()) {
            awards.push((BonusKind::Terms, term.points));
        }
    }

    fn own_degree(&self, body: &CelestialBody, awards: &mut Awards) {
        if self.tables.owns_degree(body.id(), body.sign(), body.degree()) {
            self.push_flat(BonusKind::OwnDegree, awards);
        }
    }

    fn affinity(&self, body: &CelestialBody, awards: &mut Awards) {
        let Some(attrs) = self.tables.attributes(body.id()) else {
            return;
        };
        if attrs.element == Some(body.sign().element()) {
            self.push_flat(BonusKind::OwnElement, awards);
        }
        if let Some(gender) = attrs.gender {
            let kind = if gender == body.sign().gender() {
                BonusKind::OwnGender
            } else {
                BonusKind::WrongGender
            };
            self.push_flat(kind, awards);
        }
    }

    fn exaltation_degree(&self, body: &CelestialBody, awards: &mut Awards) {
        let Some(exact) = self.tables.attributes(body.id()).and_then(|a| a.exaltation) else {
            return;
        };
        if shortest_arc(body.abs_degree(), exact) <= self.tables.exaltation_orb {
            self.push_flat(BonusKind::ExaltationDegree, awards);
        }
    }

    fn retrograde(&self, body: &CelestialBody, awards: &mut Awards) {
        if body.id().is_retro() {
            self.push_flat(BonusKind::Retrograde, awards);
        }
    }

    fn speed(&self, body: &CelestialBody, awards: &mut Awards) {
        let (Some(speed), Some(average)) =
            (body.daily_speed(), self.tables.avg_speed(body.id()))
        else {
            return;
        };
        let kind = if speed < average {
            BonusKind::Slow
        } else {
            BonusKind::Fast
        };
        log::debug!("{} speed {speed:.4}/day vs average {average:.4}: {kind}", body.id());
        self.push_flat(kind, awards);
    }

    fn score_rulers(&self, chart: &mut ChartModel) {
        let Some(natal) = chart.natal().copied() else {
            chart.notice(Notice::NoNatalMoment);
            return;
        };
        for role in RulerRole::ALL {
            let Some(ruler) = ruler_for(self.tables, &natal, role) else {
                chart.notice(Notice::RulerUnknown { role });
                continue;
            };
            let Some(id) = chart.find_identity(ruler).map(CelestialBody::id) else {
                chart.notice(Notice::RulerAbsent { role, ruler });
                continue;
            };
            let kind = role.bonus_kind();
            if let Some(points) = self.tables.points_for(&kind) {
                log::info!("{role} ruler {id} {points:+}");
                if let Some(body) = chart.body_mut(id) {
                    body.award(kind, points);
                }
            }
        }
    }

    fn score_dominance(&self, chart: &mut ChartModel, angle: Angle) {
        match angle_dominants(chart, self.tables, angle) {
            Ok(dominants) => {
                let kind = angle.bonus_kind();
                let Some(points) = self.tables.points_for(&kind) else {
                    return;
                };
                for id in dominants {
                    if let Some(body) = chart.body_mut(id) {
                        body.award(kind.clone(), points);
                    }
                }
            }
            Err(notice) => chart.notice(notice),
        }
    }

    /// Body in houses 9 or 10 nearest the midheaven, with its arc.
    pub fn closest_to_midheaven(&self, chart: &ChartModel) -> Option<(BodyId, f64)> {
        let mc = chart.body(BodyId::MC)?.abs_degree();
        chart
            .planets()
            .filter(|body| matches!(body.house(), Some(9) | Some(10)))
            .filter(|body| self.tables.real_planets.contains(&body.id().direct()))
            .map(|body| (body.id(), shortest_arc(body.abs_degree(), mc)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn score_closest_to_midheaven(&self, chart: &mut ChartModel) {
        // Missing MC was already reported by the dominance rule.
        if chart.body(BodyId::MC).is_none() {
            return;
        }
        match self.closest_to_midheaven(chart) {
            Some((id, arc)) => {
                log::info!("closest to midheaven: {id} at {arc:.3}");
                apply_aspect_bonuses(
                    chart,
                    self.tables,
                    id,
                    BodyId::MC,
                    Aspect::MidheavenProximity,
                    arc,
                );
            }
            None => chart.notice(Notice::NoMidheavenCandidate),
        }
    }
}
