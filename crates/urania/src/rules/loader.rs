//! Rule-file loading.
//!
//! The TOML file is read into private `*Toml` structs first, then every name
//! is resolved through the [`Registry`] into a [`RuleTables`] value. Aliases
//! are registered before anything else so the rest of the file may use them.
//!
//! Term and modality-range bounds are written relative to their sign and
//! stored as absolute degrees. Degree bands and exaltation tables use
//! absolute degrees and `sign` + degree respectively.

use crate::aspects::Aspect;
use crate::body::BodyId;
use crate::error::RulesError;
use crate::geometry::absolute_degree;
use crate::input::parse_degree;
use crate::rules::names::{NatalTag, Registry};
use crate::rules::tables::{
    AspectBonusRule, BodyAttributes, DegreeBand, DegreeBonusTable, DegreeRange, DignityRole,
    HourRulers, RuleTables, Term, DEFAULT_EXALTATION_ORB, DEFAULT_LESSER_CUSP_ORB,
    DEFAULT_MINOR_ORB,
};
use crate::scoring::BonusKind;
use crate::zodiac::{Element, Gender, Modality, Sign};
use chrono::Weekday;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

const MALEFIC_GROUP: &str = "malefic";
const BENEFIC_GROUP: &str = "benefic";

/// Name registry and resolved tables loaded from one rule file.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub names: Registry,
    pub tables: RuleTables,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            names: Registry::new(),
            tables: RuleTables::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DegreeToml {
    Number(f64),
    Text(String),
}

impl DegreeToml {
    fn resolve(&self, table: &'static str) -> Result<f64, RulesError> {
        match self {
            DegreeToml::Number(value) => Ok(*value),
            DegreeToml::Text(text) => {
                parse_degree(text).map_err(|source| RulesError::Degree { table, source })
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RulesToml {
    general: GeneralToml,
    aliases: AliasesToml,
    orbs: IndexMap<String, IndexMap<String, f64>>,
    speeds: IndexMap<String, DegreeToml>,
    modality_ranges: Vec<ModalityRangeToml>,
    dignities: IndexMap<String, IndexMap<String, DignityRole>>,
    bodies: IndexMap<String, BodyToml>,
    points: IndexMap<String, i32>,
    rulers: RulersToml,
    degree_bands: Vec<DegreeBandToml>,
    house_thirds: IndexMap<String, Vec<Vec<i32>>>,
    terms: Vec<TermToml>,
    degree_owners: IndexMap<String, Vec<Vec<String>>>,
    degree_bonuses: IndexMap<String, IndexMap<String, Vec<i32>>>,
    degree_bonus_aliases: IndexMap<String, String>,
    aspect_bonuses: Vec<AspectBonusToml>,
}

#[derive(Debug, Deserialize)]
struct GeneralToml {
    #[serde(default)]
    aspects: Option<Vec<String>>,
    #[serde(default = "default_minor_orb")]
    minor_orb: f64,
    #[serde(default = "default_lesser_cusp_orb")]
    lesser_cusp_orb: f64,
    #[serde(default = "default_exaltation_orb")]
    exaltation_orb: f64,
    #[serde(default)]
    real_planets: Option<Vec<String>>,
}

fn default_minor_orb() -> f64 {
    DEFAULT_MINOR_ORB
}

fn default_lesser_cusp_orb() -> f64 {
    DEFAULT_LESSER_CUSP_ORB
}

fn default_exaltation_orb() -> f64 {
    DEFAULT_EXALTATION_ORB
}

impl Default for GeneralToml {
    fn default() -> Self {
        Self {
            aspects: None,
            minor_orb: default_minor_orb(),
            lesser_cusp_orb: default_lesser_cusp_orb(),
            exaltation_orb: default_exaltation_orb(),
            real_planets: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AliasesToml {
    bodies: IndexMap<String, String>,
    signs: IndexMap<String, String>,
    aspects: IndexMap<String, String>,
    natal: IndexMap<String, String>,
}

/// Either `sign` or `modality` (every sign of it) selects the signs.
#[derive(Debug, Deserialize)]
struct ModalityRangeToml {
    #[serde(default)]
    sign: Option<String>,
    #[serde(default)]
    modality: Option<Modality>,
    from: DegreeToml,
    to: DegreeToml,
}

#[derive(Debug, Deserialize)]
struct ExaltationToml {
    sign: String,
    degree: DegreeToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BodyToml {
    gender: Option<Gender>,
    element: Option<Element>,
    malefic: bool,
    exaltation: Option<ExaltationToml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RulersToml {
    weekdays: IndexMap<String, String>,
    years: Vec<String>,
    hours: IndexMap<String, HourRulersToml>,
}

#[derive(Debug, Deserialize)]
struct HourRulersToml {
    day: Vec<String>,
    night: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DegreeBandToml {
    kind: String,
    from: DegreeToml,
    to: DegreeToml,
    points: i32,
}

#[derive(Debug, Deserialize)]
struct TermToml {
    body: String,
    sign: String,
    from: DegreeToml,
    to: DegreeToml,
    points: i32,
}

#[derive(Debug, Deserialize)]
struct AspectBonusToml {
    kind: String,
    bodies: Vec<String>,
    aspect: String,
    target: String,
    #[serde(default)]
    orb: Option<(DegreeToml, DegreeToml)>,
    points: i32,
}

/// Name lookups that fail with the table they came from.
struct Resolver<'a> {
    names: &'a Registry,
}

impl Resolver<'_> {
    fn body(&self, table: &'static str, name: &str) -> Result<BodyId, RulesError> {
        self.names.body(name).ok_or_else(|| RulesError::UnknownBody {
            table,
            name: name.to_string(),
        })
    }

    fn sign(&self, table: &'static str, name: &str) -> Result<Sign, RulesError> {
        self.names.sign(name).ok_or_else(|| RulesError::UnknownSign {
            table,
            name: name.to_string(),
        })
    }

    fn aspect(&self, table: &'static str, name: &str) -> Result<Aspect, RulesError> {
        self.names.aspect(name).ok_or_else(|| RulesError::UnknownAspect {
            table,
            name: name.to_string(),
        })
    }

    fn weekday(&self, table: &'static str, name: &str) -> Result<Weekday, RulesError> {
        name.parse::<Weekday>()
            .map_err(|_| RulesError::UnknownWeekday {
                table,
                name: name.to_string(),
            })
    }

    fn bodies(&self, table: &'static str, names: &[String]) -> Result<Vec<BodyId>, RulesError> {
        names.iter().map(|name| self.body(table, name)).collect()
    }
}

fn shape(table: &'static str, message: String) -> RulesError {
    RulesError::Shape { table, message }
}

fn fixed_array<T: Copy, const N: usize>(
    table: &'static str,
    what: &str,
    values: &[T],
) -> Result<[T; N], RulesError> {
    <[T; N]>::try_from(values)
        .map_err(|_| shape(table, format!("{what}: expected {N} entries, got {}", values.len())))
}

fn build_registry(aliases: &AliasesToml) -> Result<Registry, RulesError> {
    let mut names = Registry::new();
    for (alias, target) in &aliases.bodies {
        let id = Resolver { names: &names }.body("aliases.bodies", target)?;
        names.alias_body(alias, id);
    }
    for (alias, target) in &aliases.signs {
        let sign = Resolver { names: &names }.sign("aliases.signs", target)?;
        names.alias_sign(alias, sign);
    }
    for (alias, target) in &aliases.aspects {
        let aspect = Resolver { names: &names }.aspect("aliases.aspects", target)?;
        names.alias_aspect(alias, aspect);
    }
    for (alias, target) in &aliases.natal {
        let tag: NatalTag = names.natal_tag(target).ok_or_else(|| {
            shape("aliases.natal", format!("{target:?} is not natal, sunrise or sunset"))
        })?;
        names.alias_natal_tag(alias, tag);
    }
    Ok(names)
}

/// Degree relative to `sign`, checked against the sign arc.
fn sign_relative(
    table: &'static str,
    sign: Sign,
    degree: &DegreeToml,
) -> Result<f64, RulesError> {
    let value = degree.resolve(table)?;
    if !(0.0..=30.0).contains(&value) {
        return Err(shape(table, format!("{value} is outside 0..=30 within {sign}")));
    }
    Ok(absolute_degree(sign.index(), value))
}

fn resolve_general(
    r: &Resolver<'_>,
    general: &GeneralToml,
    tables: &mut RuleTables,
) -> Result<(), RulesError> {
    if let Some(names) = &general.aspects {
        tables.aspects = names
            .iter()
            .map(|name| r.aspect("general.aspects", name))
            .collect::<Result<_, _>>()?;
    }
    if let Some(names) = &general.real_planets {
        tables.real_planets = r
            .bodies("general.real_planets", names)?
            .into_iter()
            .map(BodyId::direct)
            .collect();
    }
    tables.minor_orb = general.minor_orb;
    tables.lesser_cusp_orb = general.lesser_cusp_orb;
    tables.exaltation_orb = general.exaltation_orb;
    Ok(())
}

fn resolve_rulers(
    r: &Resolver<'_>,
    rulers: &RulersToml,
    tables: &mut RuleTables,
) -> Result<(), RulesError> {
    for (day, body) in &rulers.weekdays {
        let weekday = r.weekday("rulers.weekdays", day)?;
        tables
            .weekday_rulers
            .insert(weekday, r.body("rulers.weekdays", body)?);
    }

    if !rulers.years.is_empty() {
        let years = r.bodies("rulers.years", &rulers.years)?;
        let years: [BodyId; 7] = fixed_array("rulers.years", "year rulers", &years)?;
        tables.year_rulers = years.to_vec();
    }

    for (day, sequences) in &rulers.hours {
        let weekday = r.weekday("rulers.hours", day)?;
        let day_seq = r.bodies("rulers.hours", &sequences.day)?;
        let night_seq = r.bodies("rulers.hours", &sequences.night)?;
        tables.hour_rulers.insert(
            weekday,
            HourRulers {
                day: fixed_array("rulers.hours", &format!("{day} day"), &day_seq)?,
                night: fixed_array("rulers.hours", &format!("{day} night"), &night_seq)?,
            },
        );
    }
    Ok(())
}

/// Expands `malefic` / `benefic` to every body carrying that attribute, in
/// both retrograde polarities.
fn resolve_mask(
    r: &Resolver<'_>,
    attributes: &HashMap<BodyId, BodyAttributes>,
    names: &[String],
) -> Result<HashSet<BodyId>, RulesError> {
    let mut mask = HashSet::new();
    for name in names {
        let group = match name.as_str() {
            MALEFIC_GROUP => Some(true),
            BENEFIC_GROUP => Some(false),
            _ => None,
        };
        match group {
            Some(malefic) => {
                for (id, attrs) in attributes {
                    if attrs.malefic == malefic {
                        mask.insert(*id);
                        mask.insert(id.retro());
                    }
                }
            }
            None => {
                mask.insert(r.body("aspect_bonuses", name)?);
            }
        }
    }
    Ok(mask)
}

fn resolve(raw: RulesToml) -> Result<RuleSet, RulesError> {
    let names = build_registry(&raw.aliases)?;
    let r = Resolver { names: &names };
    let mut tables = RuleTables::default();

    resolve_general(&r, &raw.general, &mut tables)?;

    for (a, row) in &raw.orbs {
        let a = r.body("orbs", a)?.direct();
        for (b, orb) in row {
            let b = r.body("orbs", b)?.direct();
            tables.major_orbs.entry(a).or_default().insert(b, *orb);
        }
    }

    for (body, speed) in &raw.speeds {
        tables
            .avg_speeds
            .insert(r.body("speeds", body)?.direct(), speed.resolve("speeds")?);
    }

    for range in &raw.modality_ranges {
        let signs: Vec<Sign> = match (&range.sign, range.modality) {
            (Some(sign), None) => vec![r.sign("modality_ranges", sign)?],
            (None, Some(modality)) => Sign::with_modality(modality).collect(),
            _ => {
                return Err(shape(
                    "modality_ranges",
                    "each range needs exactly one of `sign` or `modality`".to_string(),
                ))
            }
        };
        for sign in signs {
            let resolved = DegreeRange {
                from: sign_relative("modality_ranges", sign, &range.from)?,
                to: sign_relative("modality_ranges", sign, &range.to)?,
            };
            tables.modality_ranges.entry(sign).or_default().push(resolved);
        }
    }

    for (sign, roles) in &raw.dignities {
        let sign = r.sign("dignities", sign)?;
        let entry = tables.dignities.entry(sign).or_default();
        for (body, role) in roles {
            entry.insert(r.body("dignities", body)?, *role);
        }
    }

    for (body, attrs) in &raw.bodies {
        let id = r.body("bodies", body)?.direct();
        let exaltation = match &attrs.exaltation {
            Some(ex) => {
                let sign = r.sign("bodies", &ex.sign)?;
                Some(sign_relative("bodies", sign, &ex.degree)?)
            }
            None => None,
        };
        tables.attributes.insert(
            id,
            BodyAttributes {
                gender: attrs.gender,
                element: attrs.element,
                malefic: attrs.malefic,
                exaltation,
            },
        );
    }

    for (kind, points) in &raw.points {
        tables.points.insert(BonusKind::from_name(kind), *points);
    }

    resolve_rulers(&r, &raw.rulers, &mut tables)?;

    for band in &raw.degree_bands {
        let range = DegreeRange {
            from: band.from.resolve("degree_bands")?,
            to: band.to.resolve("degree_bands")?,
        };
        if range.from > range.to {
            return Err(shape(
                "degree_bands",
                format!("{}: start {} after end {}", band.kind, range.from, range.to),
            ));
        }
        tables.degree_bands.push(DegreeBand {
            kind: BonusKind::from_name(&band.kind),
            range,
            points: band.points,
        });
    }

    for (body, rows) in &raw.house_thirds {
        let id = r.body("house_thirds", body)?.direct();
        let mut grid = [[0; 3]; 12];
        if rows.len() != 12 {
            return Err(shape(
                "house_thirds",
                format!("{body}: expected 12 houses, got {}", rows.len()),
            ));
        }
        for (slot, row) in grid.iter_mut().zip(rows) {
            *slot = fixed_array("house_thirds", body, row)?;
        }
        tables.house_thirds.insert(id, grid);
    }

    for term in &raw.terms {
        let id = r.body("terms", &term.body)?.direct();
        let sign = r.sign("terms", &term.sign)?;
        let resolved = Term {
            from: sign_relative("terms", sign, &term.from)?,
            to: sign_relative("terms", sign, &term.to)?,
            points: term.points,
        };
        tables
            .terms
            .entry(id)
            .or_default()
            .entry(sign)
            .or_default()
            .push(resolved);
    }

    for (sign, slots) in &raw.degree_owners {
        let sign = r.sign("degree_owners", sign)?;
        if slots.len() != 7 {
            return Err(shape(
                "degree_owners",
                format!("{sign}: expected 7 slots, got {}", slots.len()),
            ));
        }
        let mut owners: [HashSet<BodyId>; 7] = Default::default();
        for (slot, bodies) in owners.iter_mut().zip(slots) {
            *slot = r
                .bodies("degree_owners", bodies)?
                .into_iter()
                .map(BodyId::direct)
                .collect();
        }
        tables.degree_owners.insert(sign, owners);
    }

    let mut degree_base = HashMap::new();
    for (body, per_sign) in &raw.degree_bonuses {
        let id = r.body("degree_bonuses", body)?;
        let entry: &mut HashMap<Sign, [i32; 30]> = degree_base.entry(id).or_default();
        for (sign, values) in per_sign {
            let sign = r.sign("degree_bonuses", sign)?;
            entry.insert(sign, fixed_array("degree_bonuses", body, values)?);
        }
    }
    let aliases = raw
        .degree_bonus_aliases
        .iter()
        .map(|(body, source)| {
            Ok((
                r.body("degree_bonus_aliases", body)?,
                r.body("degree_bonus_aliases", source)?,
            ))
        })
        .collect::<Result<Vec<_>, RulesError>>()?;
    tables.degree_bonuses = DegreeBonusTable::build(degree_base, &aliases);

    for rule in &raw.aspect_bonuses {
        let orb_band = match &rule.orb {
            Some((from, to)) => Some((
                from.resolve("aspect_bonuses")?,
                to.resolve("aspect_bonuses")?,
            )),
            None => None,
        };
        tables.aspect_bonuses.push(AspectBonusRule {
            kind: BonusKind::from_name(&rule.kind),
            bodies: resolve_mask(&r, &tables.attributes, &rule.bodies)?,
            aspect: r.aspect("aspect_bonuses", &rule.aspect)?,
            target: r.body("aspect_bonuses", &rule.target)?,
            orb_band,
            points: rule.points,
        });
    }

    log::info!(
        "rule tables loaded: {} aspects, {} orb rows, {} aspect bonus rules",
        tables.aspects.len(),
        tables.major_orbs.len(),
        tables.aspect_bonuses.len()
    );
    Ok(RuleSet { names, tables })
}

/// Parses and resolves a rule file held in memory.
pub fn load_rules_from_toml(text: &str) -> Result<RuleSet, RulesError> {
    let raw: RulesToml = toml::from_str(text)?;
    resolve(raw)
}

pub fn load_rules_file(path: impl AsRef<Path>) -> Result<RuleSet, RulesError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_rules_from_toml(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let set = load_rules_from_toml("").unwrap();
        assert_eq!(set.tables, RuleTables::default());
    }

    #[test]
    fn aliases_apply_to_later_sections() {
        let text = r#"
[aliases.bodies]
"Марс" = "mars"

[aliases.signs]
"Овен" = "aries"

[dignities."Овен"]
"Марс" = "domicile"

[[terms]]
body = "Марс"
sign = "Овен"
from = "0°"
to = "6°"
points = 2
"#;
        let set = load_rules_from_toml(text).unwrap();
        assert_eq!(
            set.tables.dignity(Sign::Aries, BodyId::MARS),
            Some(DignityRole::Domicile)
        );
        assert_eq!(set.tables.term_at(BodyId::MARS, Sign::Aries, 5.9).map(|t| t.points), Some(2));
        assert_eq!(set.names.body_name(BodyId::MARS), "Марс");
    }

    #[test]
    fn sign_relative_bounds_become_absolute() {
        let text = r#"
[[modality_ranges]]
sign = "taurus"
from = 10
to = "15°30'"

[[modality_ranges]]
modality = "cardinal"
from = 0
to = "12°30'"

[bodies.sun]
exaltation = { sign = "aries", degree = 19 }
"#;
        let set = load_rules_from_toml(text).unwrap();
        let range = set.tables.modality_ranges[&Sign::Taurus][0];
        assert_eq!(range, DegreeRange { from: 40.0, to: 45.5 });
        assert_eq!(set.tables.modality_ranges[&Sign::Capricorn].len(), 1);
        assert_eq!(
            set.tables.modality_ranges[&Sign::Capricorn][0],
            DegreeRange { from: 270.0, to: 282.5 }
        );
        assert!(!set.tables.modality_ranges.contains_key(&Sign::Gemini));
        assert_eq!(set.tables.attributes(BodyId::SUN).unwrap().exaltation, Some(19.0));
    }

    #[test]
    fn unknown_names_and_bad_shapes_fail() {
        let err = load_rules_from_toml("[speeds]\nvulcan = 1.0").unwrap_err();
        assert!(matches!(err, RulesError::UnknownBody { table: "speeds", .. }));

        let err = load_rules_from_toml("[rulers]\nyears = [\"sun\"]").unwrap_err();
        assert!(matches!(err, RulesError::Shape { table: "rulers.years", .. }));

        let err = load_rules_from_toml("[rulers.weekdays]\nfunday = \"sun\"").unwrap_err();
        assert!(matches!(err, RulesError::UnknownWeekday { .. }));

        let text = "[[degree_bands]]\nkind = \"x\"\nfrom = \"1°99'\"\nto = 2\npoints = 1";
        let err = load_rules_from_toml(text).unwrap_err();
        assert!(matches!(err, RulesError::Degree { table: "degree_bands", .. }));

        assert!(matches!(
            load_rules_from_toml("[general\n"),
            Err(RulesError::Toml(_))
        ));
    }

    #[test]
    fn malefic_group_expands_from_attributes() {
        let text = r#"
[bodies.mars]
malefic = true
[bodies.saturn]
malefic = true
[bodies.venus]

[[aspect_bonuses]]
kind = "hard_malefic"
bodies = ["malefic", "sun"]
aspect = "square"
target = "moon"
orb = [0, "2°30'"]
points = -3
"#;
        let set = load_rules_from_toml(text).unwrap();
        let rule = &set.tables.aspect_bonuses[0];
        assert!(rule.bodies.contains(&BodyId::MARS));
        assert!(rule.bodies.contains(&BodyId::SATURN.retro()));
        assert!(rule.bodies.contains(&BodyId::SUN));
        assert!(!rule.bodies.contains(&BodyId::VENUS));
        assert_eq!(rule.orb_band, Some((0.0, 2.5)));
        assert_eq!(rule.kind, BonusKind::Named("hard_malefic".to_string()));
    }
}
