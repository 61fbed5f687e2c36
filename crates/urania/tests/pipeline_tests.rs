use urania::input::parse_chart;
use urania::report::{render_json, render_text};
use urania::rules::{load_rules_from_toml, RuleSet};
use urania::{analyze, Aspect, BodyId, BonusKind, ChartModel};

const SAMPLE_RULES: &str = include_str!("../../../configs/rules.toml");
const SAMPLE_CHART: &str = include_str!("../../../configs/sample_chart.txt");

fn sample() -> (RuleSet, ChartModel) {
    let rules = load_rules_from_toml(SAMPLE_RULES).unwrap();
    let mut chart = parse_chart(SAMPLE_CHART, &rules.names).into_chart();
    analyze(&mut chart, &rules.tables);
    (rules, chart)
}

#[test]
fn test_sample_chart_parses_cleanly() {
    let (_, chart) = sample();
    assert!(chart.diagnostics().is_empty(), "{:?}", chart.diagnostics());
    assert_eq!(chart.planets().count(), 11);
    assert_eq!(chart.bodies().count(), 23);
    assert!(chart.planets().all(|b| b.house().is_some()));
}

#[test]
fn test_sample_chart_houses() {
    let (_, chart) = sample();
    let house = |id| chart.body(id).unwrap().house();
    assert_eq!(house(BodyId::SUN), Some(9));
    assert_eq!(house(BodyId::MOON), Some(5));
    assert_eq!(house(BodyId::MARS), Some(7));
    assert_eq!(house(BodyId::JUPITER), Some(12));
    assert_eq!(house(BodyId::URANUS), Some(6));
}

#[test]
fn test_sample_chart_rulers_and_dominants() {
    let (_, chart) = sample();
    let get = |id, kind: BonusKind| chart.body(id).unwrap().bonuses().get(&kind);

    assert_eq!(get(BodyId::MOON, BonusKind::HourRuler), Some(3));
    assert_eq!(get(BodyId::MERCURY, BonusKind::DayRuler), Some(2));
    assert_eq!(get(BodyId::MARS, BonusKind::YearRuler), Some(1));
    assert_eq!(get(BodyId::MOON, BonusKind::AscendantDominant), Some(3));
    assert_eq!(get(BodyId::JUPITER, BonusKind::MidheavenDominant), Some(3));
    assert_eq!(get(BodyId::NEPTUNE, BonusKind::MidheavenDominant), Some(3));
    assert_eq!(get(BodyId::PLUTO.retro(), BonusKind::Domicile), Some(5));
    assert_eq!(get(BodyId::PLUTO.retro(), BonusKind::Retrograde), Some(-3));
    assert_eq!(get(BodyId::SUN, BonusKind::Fast), Some(2));
    assert_eq!(get(BodyId::MOON, BonusKind::Slow), Some(-2));
    assert_eq!(
        get(BodyId::SUN, BonusKind::Named("closest_to_mc".to_string())),
        Some(3)
    );
}

#[test]
fn test_sample_chart_aspects() {
    let (_, chart) = sample();
    let has = |from, to, aspect| {
        chart
            .aspects()
            .iter()
            .any(|h| h.from == from && h.to == to && h.aspect == aspect)
    };
    assert!(has(BodyId::MOON, BodyId::JUPITER, Aspect::Trine));
    assert!(has(BodyId::JUPITER, BodyId::MOON, Aspect::Trine));
    assert!(has(BodyId::VENUS, BodyId::SATURN, Aspect::Conjunction));
    assert!(!has(BodyId::SUN, BodyId::MOON, Aspect::Trine));

    let trine_jupiter = BonusKind::Named("trine_jupiter".to_string());
    assert_eq!(chart.body(BodyId::MOON).unwrap().bonuses().get(&trine_jupiter), Some(2));

    for hit in chart.aspects() {
        let mirrored = chart.aspects().iter().any(|h| {
            h.from == hit.to && h.to == hit.from && h.aspect == hit.aspect && h.orb == hit.orb
        });
        assert!(mirrored, "{hit:?} has no mirror");
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let (rules, chart) = sample();
    let mut again = chart.clone();
    analyze(&mut again, &rules.tables);

    assert_eq!(chart.aspects(), again.aspects());
    assert_eq!(chart.notices(), again.notices());
    for (first, second) in chart.bodies().zip(again.bodies()) {
        assert_eq!(first, second);
    }
}

#[test]
fn test_reports_render() {
    let (rules, chart) = sample();

    let text = render_text(&chart, &rules);
    assert!(text.starts_with("Sun; Pisces 16°22'00\"; IX; 3/3; "));
    assert!(text.contains("X: Pisces 21°00'00\""));
    assert!(text.contains("Moon trine Jupiter"));

    let json = render_json(&chart, &rules).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["bodies"][0]["name"], "Sun");
    assert_eq!(value["bodies"][0]["house"], 9);
    assert!(value["aspects"].as_array().unwrap().len() >= 2);
}
