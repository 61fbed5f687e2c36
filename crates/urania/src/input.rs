//! Chart text input.
//!
//! One record per line. Comments start with `//` or `#`. A line is a
//! position when one of its tokens carries `°` or `*`; `PREV` marks a
//! previous-day position; lines opening with a natal tag carry the birth
//! date and clock times.

use crate::body::BodyId;
use crate::chart::{ChartModel, PositionRecord};
use crate::diagnostics::Diagnostic;
use crate::error::DegreeError;
use crate::natal::NatalMoment;
use crate::rules::{NatalTag, Registry};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

lazy_static::lazy_static! {
    static ref DEGREE_RE: Option<Regex> = Regex::new(
        r#"^(\d+(?:\.\d+)?)(?:[°*](?:(\d+(?:\.\d+)?)')?(?:(\d+(?:\.\d+)?)")?)?$"#
    )
    .ok();
}

const PREV_TAG: &str = "PREV";
const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Parses `12°30'15"`, `12*30'`, `7.5°` or a bare number into decimal degrees.
pub fn parse_degree(text: &str) -> Result<f64, DegreeError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = DEGREE_RE
        .as_ref()
        .and_then(|re| re.captures(&compact))
        .ok_or_else(|| DegreeError::Malformed(text.to_string()))?;

    let part = |index: usize| -> Result<f64, DegreeError> {
        caps.get(index).map_or(Ok(0.0), |m| {
            m.as_str()
                .parse::<f64>()
                .map_err(|_| DegreeError::Malformed(text.to_string()))
        })
    };
    let degrees = part(1)?;
    let minutes = part(2)?;
    let seconds = part(3)?;
    for value in [minutes, seconds] {
        if value >= 60.0 {
            return Err(DegreeError::OutOfRange {
                value,
                min: 0.0,
                max: 60.0,
            });
        }
    }
    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}

/// Clock inputs collected from natal lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NatalInputs {
    pub date: Option<NaiveDate>,
    pub birth: Option<NaiveTime>,
    pub sunrise: Option<NaiveTime>,
    pub sunset: Option<NaiveTime>,
}

impl NatalInputs {
    fn is_empty(&self) -> bool {
        self == &NatalInputs::default()
    }

    /// Birth moment, or the reason it cannot be derived.
    pub fn resolve(&self) -> Result<NatalMoment, String> {
        let missing: Vec<&str> = [
            ("date", self.date.is_none()),
            ("birth time", self.birth.is_none()),
            ("sunrise", self.sunrise.is_none()),
            ("sunset", self.sunset.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (self.date, self.birth, self.sunrise, self.sunset) {
            (Some(date), Some(birth), Some(sunrise), Some(sunset)) => {
                NatalMoment::from_clock(date, birth, sunrise, sunset)
                    .ok_or_else(|| format!("sunrise {sunrise} is not before sunset {sunset}"))
            }
            _ => Err(format!("missing {}", missing.join(", "))),
        }
    }
}

/// Resolved records of one chart file.
#[derive(Debug, Clone, Default)]
pub struct ParsedChart {
    pub positions: Vec<PositionRecord>,
    pub previous: Vec<PositionRecord>,
    pub natal: NatalInputs,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedChart {
    /// Builds the chart model; invalid records and an incomplete natal
    /// moment become diagnostics.
    pub fn into_chart(self) -> ChartModel {
        let mut chart = ChartModel::new();
        for diagnostic in self.diagnostics {
            chart.push_diagnostic(diagnostic);
        }
        for record in self.positions {
            chart.add_position(record);
        }
        for record in self.previous {
            chart.add_previous(record);
        }
        if !self.natal.is_empty() {
            match self.natal.resolve() {
                Ok(natal) => chart.set_natal(natal),
                Err(reason) => {
                    log::warn!("natal moment unavailable: {reason}");
                    chart.push_diagnostic(Diagnostic::IncompleteNatal { reason });
                }
            }
        }
        chart
    }
}

enum Line {
    Position(PositionRecord),
    Previous(PositionRecord),
    Natal(NatalTag, Option<NaiveDate>, NaiveTime),
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with('#')
}

fn is_degree_token(token: &str) -> bool {
    token.contains('°') || token.contains('*')
}

/// `<body…> <sign> <degree>` in any order; the body name may span tokens.
fn parse_position(tokens: &[&str], registry: &Registry) -> Result<PositionRecord, String> {
    let degree_at = tokens
        .iter()
        .position(|t| is_degree_token(t))
        .ok_or("no degree token")?;
    let degree = parse_degree(tokens[degree_at]).map_err(|e| e.to_string())?;

    let rest: Vec<&str> = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != degree_at)
        .map(|(_, t)| *t)
        .collect();
    let sign_at = rest
        .iter()
        .position(|t| registry.sign(t).is_some())
        .ok_or("no known sign")?;
    let sign = registry.sign(rest[sign_at]).ok_or("no known sign")?;

    let name = rest
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != sign_at)
        .map(|(_, t)| *t)
        .collect::<Vec<_>>()
        .join(" ");
    let body: BodyId = registry
        .body(&name)
        .ok_or_else(|| format!("unknown body {name:?}"))?;
    Ok(PositionRecord::new(body, sign, degree))
}

fn parse_natal(tag: NatalTag, tokens: &[&str]) -> Result<Line, String> {
    let mut date = None;
    let mut time = None;
    for token in tokens {
        if let Ok(d) = NaiveDate::parse_from_str(token, DATE_FORMAT) {
            date = Some(d);
        } else if let Ok(t) = NaiveTime::parse_from_str(token, TIME_FORMAT) {
            time = Some(t);
        } else {
            return Err(format!("unexpected token {token:?}"));
        }
    }
    let time = time.ok_or("no HH:MM time")?;
    Ok(Line::Natal(tag, date, time))
}

fn parse_line(line: &str, registry: &Registry) -> Result<Line, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if let [first, rest @ ..] = tokens.as_slice() {
        if *first == PREV_TAG {
            return parse_position(rest, registry).map(Line::Previous);
        }
        if let Some(tag) = registry.natal_tag(first) {
            return parse_natal(tag, rest);
        }
    }
    if tokens.iter().any(|t| is_degree_token(t)) {
        parse_position(&tokens, registry).map(Line::Position)
    } else {
        Err("not a position or natal line".to_string())
    }
}

/// Parses chart text. Unresolvable lines are kept as diagnostics.
pub fn parse_chart(text: &str, registry: &Registry) -> ParsedChart {
    let mut parsed = ParsedChart::default();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        match parse_line(line, registry) {
            Ok(Line::Position(record)) => parsed.positions.push(record),
            Ok(Line::Previous(record)) => parsed.previous.push(record),
            Ok(Line::Natal(tag, date, time)) => {
                if date.is_some() {
                    parsed.natal.date = date;
                }
                match tag {
                    NatalTag::Birth => parsed.natal.birth = Some(time),
                    NatalTag::Sunrise => parsed.natal.sunrise = Some(time),
                    NatalTag::Sunset => parsed.natal.sunset = Some(time),
                }
            }
            Err(reason) => {
                log::debug!("line {}: {reason}", index + 1);
                parsed.diagnostics.push(Diagnostic::UnresolvedLine {
                    line: index + 1,
                    text: line.to_string(),
                    reason,
                });
            }
        }
    }
    parsed
}
