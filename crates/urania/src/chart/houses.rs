//! House assignment.
//!
//! A point lies between two cuspids on the circle exactly when its arcs to
//! the two of them add up to the arc between the cuspids, so membership
//! needs no knowledge of direction or wrap-around.

use crate::body::BodyId;
use crate::chart::ChartModel;
use crate::diagnostics::Notice;
use crate::geometry::shortest_arc;
use serde::Serialize;

const ARC_EPSILON: f64 = 1e-9;

/// Size and bounds of one house.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseSpan {
    pub house: u8,
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

impl HouseSpan {
    /// Membership from the point's arcs to the start and end cuspids.
    ///
    /// The point must lie on the arc between the cuspids (its two arcs add
    /// up to the house size). The start cuspid is inside, the end cuspid
    /// is not.
    pub fn contains(&self, start_arc: f64, end_arc: f64) -> bool {
        end_arc > 0.0 && (start_arc + end_arc - self.size).abs() < ARC_EPSILON
    }

    /// Third (1..=3) of a point known to be inside the house.
    pub fn third_of(&self, start_arc: f64, end_arc: f64) -> u8 {
        let third = self.size / 3.0;
        if start_arc < third {
            1
        } else if end_arc < third {
            3
        } else {
            2
        }
    }
}

/// The successor of house `house` in cyclic order.
pub fn next_house(house: u8) -> u8 {
    house % 12 + 1
}

/// Spans of every house whose two cuspids are present.
pub fn house_spans(chart: &ChartModel) -> Vec<HouseSpan> {
    (1..=12u8)
        .filter_map(|house| {
            let start = chart.cusp(house)?.abs_degree();
            let end = chart.cusp(next_house(house))?.abs_degree();
            Some(HouseSpan {
                house,
                start,
                end,
                size: shortest_arc(start, end),
            })
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HouseAssigner;

impl HouseAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Assigns every non-cuspid body to one house and one third.
    ///
    /// Houses are visited from the ascendant on; a body placed in an earlier
    /// house is never reconsidered.
    pub fn assign(&self, chart: &mut ChartModel) {
        let spans = house_spans(chart);
        for house in 1..=12u8 {
            if !spans.iter().any(|s| s.house == house) {
                chart.notice(Notice::MissingCusp { house });
            }
        }

        let mut pending: Vec<(BodyId, f64)> = chart
            .planets()
            .map(|body| (body.id(), body.abs_degree()))
            .collect();

        for span in &spans {
            log::debug!(
                "house {} size {:.2} ({:.2} -> {:.2})",
                span.house,
                span.size,
                span.start,
                span.end
            );
            let mut placed = Vec::new();
            pending.retain(|&(id, abs)| {
                let start_arc = shortest_arc(abs, span.start);
                let end_arc = shortest_arc(abs, span.end);
                // A body on the start cuspid is inside; one on the end cuspid
                // belongs to the next house.
                if span.contains(start_arc, end_arc) {
                    placed.push((id, span.third_of(start_arc, end_arc)));
                    false
                } else {
                    true
                }
            });
            for (id, third) in placed {
                if let Some(body) = chart.body_mut(id) {
                    body.place(span.house, third);
                }
            }
        }

        for (id, _) in pending {
            chart.notice(Notice::Unhoused { body: id });
        }
    }
}
