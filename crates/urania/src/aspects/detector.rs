use crate::aspects::types::{Aspect, AspectHit};
use crate::body::BodyId;
use crate::chart::ChartModel;
use crate::geometry::shortest_arc;
use crate::rules::RuleTables;
use crate::scoring::aspect_bonus::apply_aspect_bonuses;

/// Aspect detector over one chart.
pub struct AspectDetector<'a> {
    tables: &'a RuleTables,
}

impl<'a> AspectDetector<'a> {
    pub fn new(tables: &'a RuleTables) -> Self {
        Self { tables }
    }

    /// Aspects formed at `separation` by a pair whose orb is `pair_orb`.
    pub fn classify(&self, separation: f64, pair_orb: f64) -> Vec<(Aspect, f64)> {
        self.tables
            .aspects
            .iter()
            .filter_map(|&aspect| {
                let angle = aspect.angle()?;
                let tolerance = self.tables.aspect_tolerance(aspect, pair_orb);
                let orb = (separation - angle).abs();
                (orb < tolerance).then_some((aspect, orb))
            })
            .collect()
    }

    /// Aspects between two absolute positions of the given bodies, if the
    /// pair has an orb at all.
    pub fn between(
        &self,
        a: BodyId,
        a_abs: f64,
        b: BodyId,
        b_abs: f64,
    ) -> Option<Vec<(Aspect, f64)>> {
        let pair_orb = self.tables.orb_between(a, b)?;
        Some(self.classify(shortest_arc(a_abs, b_abs), pair_orb))
    }

    /// Detects aspects for every ordered pair of distinct bodies and applies
    /// the aspect bonuses of body 1. Hits are appended to the chart.
    pub fn detect(&self, chart: &mut ChartModel) -> usize {
        let positions: Vec<(BodyId, f64)> = chart
            .bodies()
            .map(|body| (body.id(), body.abs_degree()))
            .collect();

        let mut found = 0;
        for &(p1, abs1) in &positions {
            for &(p2, abs2) in &positions {
                if p1 == p2 {
                    continue;
                }
                let separation = shortest_arc(abs1, abs2);
                let Some(hits) = self.between(p1, abs1, p2, abs2) else {
                    log::debug!("no orb for {p1} / {p2}, pair skipped");
                    continue;
                };
                for (aspect, orb) in hits {
                    log::debug!(
                        "aspect {p1} {} {p2}: arc {separation:.3}, orb {orb:.3}",
                        aspect.name()
                    );
                    chart.push_aspect(AspectHit {
                        from: p1,
                        to: p2,
                        aspect,
                        separation,
                        orb,
                    });
                    apply_aspect_bonuses(chart, self.tables, p1, p2, aspect, orb);
                    found += 1;
                }
            }
        }
        found
    }
}
