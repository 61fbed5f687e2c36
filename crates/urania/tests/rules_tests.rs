use chrono::Weekday;
use urania::rules::{load_rules_from_toml, DignityRole};
use urania::{Aspect, BodyId, BonusKind, Sign};

const SAMPLE_RULES: &str = include_str!("../../../configs/rules.toml");

#[test]
fn test_sample_rules_load() {
    let set = load_rules_from_toml(SAMPLE_RULES).unwrap();
    let tables = &set.tables;

    assert_eq!(tables.aspects.len(), 7);
    assert_eq!(tables.minor_orb, 3.0);
    assert_eq!(tables.real_planets.len(), 10);
    assert_eq!(tables.orb_between(BodyId::MOON, BodyId::SUN), Some(12.0));
    assert_eq!(tables.orb_between(BodyId::PLUTO.retro(), BodyId::NEPTUNE), Some(5.0));
    assert_eq!(tables.orb_between(BodyId::SUN, BodyId::MC), Some(2.0));
    assert_eq!(tables.orb_between(BodyId::LILITH, BodyId::SUN), None);
}

#[test]
fn test_sample_rule_tables_resolve_names() {
    let set = load_rules_from_toml(SAMPLE_RULES).unwrap();
    let tables = &set.tables;

    assert_eq!(tables.dignity(Sign::Scorpio, BodyId::PLUTO.retro()), Some(DignityRole::Domicile));
    assert_eq!(tables.points_for(&BonusKind::Domicile), Some(5));
    assert_eq!(tables.weekday_ruler(Weekday::Wed), Some(BodyId::MERCURY));
    assert_eq!(tables.hour_ruler(Weekday::Sun, 1, true), Some(BodyId::SUN));
    assert_eq!(tables.hour_ruler(Weekday::Sun, 1, false), Some(BodyId::JUPITER));
    assert_eq!(tables.hour_ruler(Weekday::Wed, 9, true), Some(BodyId::MOON));
    assert_eq!(tables.year_ruler(1990), Some(BodyId::MARS));

    let speed = tables.avg_speed(BodyId::SUN).unwrap();
    assert!((speed - 0.985_555).abs() < 1e-5);

    let sun = tables.attributes(BodyId::SUN).unwrap();
    assert_eq!(sun.exaltation, Some(19.0));
    assert!(tables.attributes(BodyId::MARS).unwrap().malefic);

    assert_eq!(tables.modality_ranges[&Sign::Aries].len(), 2);
    assert_eq!(tables.modality_ranges[&Sign::Leo].len(), 1);
    assert_eq!(tables.modality_ranges[&Sign::Pisces].len(), 2);

    assert_eq!(tables.term_at(BodyId::MERCURY, Sign::Aries, 15.0).map(|t| t.points), Some(2));
    assert!(tables.owns_degree(BodyId::SUN, Sign::Aries, 3.5));
    assert_eq!(tables.degree_bonuses.lookup(BodyId::SUN, Sign::Aries, 19.2), Some(3));
    assert_eq!(tables.degree_bonuses.lookup(BodyId::SOUTH_NODE, Sign::Gemini, 3.0), Some(3));
    assert_eq!(tables.house_third_points(BodyId::MOON, 10, 1), Some(3));
}

#[test]
fn test_sample_aliases_and_groups() {
    let set = load_rules_from_toml(SAMPLE_RULES).unwrap();

    assert_eq!(set.names.body("North Node"), Some(BodyId::NORTH_NODE));
    assert_eq!(set.names.body_name(BodyId::SUN), "Sun");
    assert_eq!(set.names.sign("Pisces"), Some(Sign::Pisces));

    let proximity = set
        .tables
        .aspect_bonuses
        .iter()
        .find(|rule| rule.aspect == Aspect::MidheavenProximity)
        .unwrap();
    assert_eq!(proximity.target, BodyId::MC);
    assert!(proximity.bodies.contains(&BodyId::SUN));
    assert!(proximity.bodies.contains(&BodyId::SATURN.retro()));
    assert!(!proximity.bodies.contains(&BodyId::CHIRON));
}
