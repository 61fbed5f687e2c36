//! Text report and JSON export of a scored chart.

use crate::aspects::Aspect;
use crate::body::BodyId;
use crate::chart::{CelestialBody, ChartModel};
use crate::diagnostics::{Diagnostic, Notice};
use crate::rules::RuleSet;
use crate::scoring::Bonuses;
use crate::zodiac::Sign;
use serde::Serialize;
use std::fmt::Write;

/// `D°MM'SS"`, seconds rounded.
pub fn format_degree(degree: f64) -> String {
    let total = (degree * 3600.0).round() as i64;
    let (d, rest) = (total / 3600, total % 3600);
    format!("{d}°{:02}'{:02}\"", rest / 60, rest % 60)
}

pub fn to_roman(mut n: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

fn body_line(body: &CelestialBody, rules: &RuleSet) -> String {
    let names = &rules.names;
    let mut line = format!(
        "{}; {} {}",
        names.body_name(body.id()),
        names.sign_name(body.sign()),
        format_degree(body.degree())
    );
    if let Some(role) = rules.tables.dignity(body.sign(), body.id()) {
        let _ = write!(line, " {{{}}}", role.bonus_kind());
    }
    match (body.house(), body.third()) {
        (Some(house), Some(third)) => {
            let _ = write!(line, "; {}; {third}/3", to_roman(u32::from(house)));
        }
        _ => line.push_str("; -; -"),
    }
    let bonuses: Vec<String> = body
        .bonuses()
        .iter()
        .map(|(kind, points)| format!("{kind} {points:+}"))
        .collect();
    let _ = write!(line, "; {}; total {}", bonuses.join(", "), body.total());
    line
}

/// Human-readable report: bodies, cuspids, aspects, then notices.
pub fn render_text(chart: &ChartModel, rules: &RuleSet) -> String {
    let names = &rules.names;
    let mut out = String::new();
    for body in chart.planets() {
        let _ = writeln!(out, "{}", body_line(body, rules));
    }

    let _ = writeln!(out, "\ncusps:");
    for house in 1..=12u8 {
        if let Some(cusp) = chart.cusp(house) {
            let _ = writeln!(
                out,
                "{}: {} {}",
                to_roman(u32::from(house)),
                names.sign_name(cusp.sign()),
                format_degree(cusp.degree())
            );
        }
    }

    let _ = writeln!(out, "\naspects:");
    for hit in chart.aspects() {
        let _ = writeln!(
            out,
            "{} {} {} (orb {})",
            names.body_name(hit.from),
            hit.aspect.name(),
            names.body_name(hit.to),
            format_degree(hit.orb)
        );
    }

    if !chart.notices().is_empty() || !chart.diagnostics().is_empty() {
        let _ = writeln!(out, "\nnotices:");
        for diagnostic in chart.diagnostics() {
            let _ = writeln!(out, "{diagnostic:?}");
        }
        for notice in chart.notices() {
            let _ = writeln!(out, "{notice:?}");
        }
    }
    out
}

#[derive(Debug, Serialize)]
pub struct BodyReport<'a> {
    pub id: BodyId,
    pub name: String,
    pub sign: Sign,
    pub degree: f64,
    pub abs_degree: f64,
    pub house: Option<u8>,
    pub third: Option<u8>,
    pub bonuses: &'a Bonuses,
    pub total: i32,
}

#[derive(Debug, Serialize)]
pub struct AspectReport {
    pub from: String,
    pub to: String,
    pub aspect: Aspect,
    pub orb: f64,
}

/// Serializable view of a scored chart with display names resolved.
#[derive(Debug, Serialize)]
pub struct ChartReport<'a> {
    pub bodies: Vec<BodyReport<'a>>,
    pub aspects: Vec<AspectReport>,
    pub diagnostics: &'a [Diagnostic],
    pub notices: &'a [Notice],
}

impl<'a> ChartReport<'a> {
    pub fn new(chart: &'a ChartModel, rules: &RuleSet) -> Self {
        let names = &rules.names;
        let bodies = chart
            .bodies()
            .map(|body| BodyReport {
                id: body.id(),
                name: names.body_name(body.id()),
                sign: body.sign(),
                degree: body.degree(),
                abs_degree: body.abs_degree(),
                house: body.house(),
                third: body.third(),
                bonuses: body.bonuses(),
                total: body.total(),
            })
            .collect();
        let aspects = chart
            .aspects()
            .iter()
            .map(|hit| AspectReport {
                from: names.body_name(hit.from),
                to: names.body_name(hit.to),
                aspect: hit.aspect,
                orb: hit.orb,
            })
            .collect();
        Self {
            bodies,
            aspects,
            diagnostics: chart.diagnostics(),
            notices: chart.notices(),
        }
    }
}

pub fn render_json(chart: &ChartModel, rules: &RuleSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ChartReport::new(chart, rules))
}
