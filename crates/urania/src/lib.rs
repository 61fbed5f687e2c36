//! Urania: scored natal-chart analysis.
//!
//! A chart of body positions and twelve house cuspids is run through house
//! assignment, rule-table scoring and aspect detection. Each stage mutates the
//! [`ChartModel`] in place; [`analyze`] runs them in order.
//!
//! ```no_run
//! use urania::{analyze, input::parse_chart, rules::load_rules_file};
//!
//! let rules = load_rules_file("configs/rules.toml")?;
//! let mut chart = parse_chart("sun leo 10°", &rules.names).into_chart();
//! analyze(&mut chart, &rules.tables);
//! # Ok::<(), urania::RulesError>(())
//! ```

pub mod aspects;
pub mod body;
pub mod chart;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod input;
pub mod natal;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod zodiac;

pub use aspects::{Aspect, AspectDetector, AspectHit};
pub use body::BodyId;
pub use chart::{CelestialBody, ChartModel, HouseAssigner, PositionRecord};
pub use diagnostics::{Diagnostic, Notice};
pub use error::{DegreeError, RulesError};
pub use natal::{NatalMoment, PlanetaryHour};
pub use rules::{RuleSet, RuleTables};
pub use scoring::{BonusKind, BonusScorer, Bonuses};
pub use zodiac::Sign;

/// Runs the full analysis: houses, then bonuses, then aspects.
///
/// Results of a previous run are cleared first, so analysing the same chart
/// twice gives the same bonuses and aspects.
pub fn analyze(chart: &mut ChartModel, tables: &RuleTables) {
    chart.reset_analysis();

    HouseAssigner::new().assign(chart);
    BonusScorer::new(tables).score(chart);
    let found = AspectDetector::new(tables).detect(chart);

    log::info!(
        "chart analysed: {} bodies, {} aspects, {} notices",
        chart.bodies().count(),
        found,
        chart.notices().len()
    );
}
