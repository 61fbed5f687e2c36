use urania::rules::AspectBonusRule;
use urania::{
    Aspect, AspectDetector, BodyId, BonusKind, ChartModel, PositionRecord, RuleTables, Sign,
};

fn place(chart: &mut ChartModel, id: BodyId, abs: f64) {
    let sign = Sign::from_index((abs / 30.0).floor() as u8).unwrap();
    let degree = abs - f64::from(sign.index()) * 30.0;
    assert!(chart.add_position(PositionRecord::new(id, sign, degree)));
}

fn tables_with_orbs(orbs: &[(BodyId, BodyId, f64)]) -> RuleTables {
    let mut tables = RuleTables::default();
    for &(a, b, orb) in orbs {
        tables.major_orbs.entry(a).or_default().insert(b, orb);
    }
    tables
}

#[test]
fn test_conjunction_within_orb() {
    let tables = tables_with_orbs(&[(BodyId::SUN, BodyId::MOON, 8.0)]);
    let mut chart = ChartModel::new();
    place(&mut chart, BodyId::SUN, 100.0);
    place(&mut chart, BodyId::MOON, 102.0);

    let found = AspectDetector::new(&tables).detect(&mut chart);

    assert_eq!(found, 2);
    let hit = &chart.aspects()[0];
    assert_eq!((hit.from, hit.to, hit.aspect), (BodyId::SUN, BodyId::MOON, Aspect::Conjunction));
    assert!((hit.orb - 2.0).abs() < 1e-9);
    let back = &chart.aspects()[1];
    assert_eq!((back.from, back.to), (BodyId::MOON, BodyId::SUN));
}

#[test]
fn test_orb_limit_is_exclusive() {
    let tables = tables_with_orbs(&[(BodyId::SUN, BodyId::MOON, 8.0)]);
    let mut chart = ChartModel::new();
    place(&mut chart, BodyId::SUN, 100.0);
    place(&mut chart, BodyId::MOON, 108.0);

    assert_eq!(AspectDetector::new(&tables).detect(&mut chart), 0);
}

#[test]
fn test_opposition_across_aries_point() {
    let tables = tables_with_orbs(&[(BodyId::MARS, BodyId::SATURN, 7.0)]);
    let mut chart = ChartModel::new();
    place(&mut chart, BodyId::MARS, 355.0);
    place(&mut chart, BodyId::SATURN, 178.0);

    AspectDetector::new(&tables).detect(&mut chart);

    let hit = &chart.aspects()[0];
    assert_eq!(hit.aspect, Aspect::Opposition);
    assert!((hit.separation - 177.0).abs() < 1e-9);
    assert!((hit.orb - 3.0).abs() < 1e-9);
}

#[test]
fn test_minor_aspects_capped_at_minor_orb() {
    let detector_tables = tables_with_orbs(&[(BodyId::SUN, BodyId::VENUS, 8.0)]);
    let detector = AspectDetector::new(&detector_tables);

    let semi_sextile = |separation| {
        detector
            .classify(separation, 8.0)
            .into_iter()
            .any(|(aspect, _)| aspect == Aspect::SemiSextile)
    };
    assert!(semi_sextile(32.9));
    assert!(!semi_sextile(33.0));
    assert!(detector
        .classify(67.5, 8.0)
        .iter()
        .any(|(aspect, _)| *aspect == Aspect::Sextile));
}

#[test]
fn test_retrograde_variant_uses_direct_orb() {
    let tables = tables_with_orbs(&[(BodyId::SUN, BodyId::MERCURY, 9.0)]);
    let mut chart = ChartModel::new();
    place(&mut chart, BodyId::SUN, 10.0);
    place(&mut chart, BodyId::MERCURY.retro(), 15.0);

    AspectDetector::new(&tables).detect(&mut chart);
    assert_eq!(chart.aspects().len(), 2);
    assert_eq!(chart.aspects()[0].to, BodyId::MERCURY.retro());
}

#[test]
fn test_pair_without_orb_is_skipped() {
    let tables = tables_with_orbs(&[]);
    let mut chart = ChartModel::new();
    place(&mut chart, BodyId::VENUS, 10.0);
    place(&mut chart, BodyId::URANUS, 10.5);

    assert_eq!(AspectDetector::new(&tables).detect(&mut chart), 0);
}

#[test]
fn test_cuspid_pairs_use_lesser_orb() {
    let tables = tables_with_orbs(&[]);
    let mut chart = ChartModel::new();
    place(&mut chart, BodyId::ASC, 100.0);
    place(&mut chart, BodyId::MC, 10.0);
    place(&mut chart, BodyId::SUN, 101.5);
    place(&mut chart, BodyId::MOON, 12.5);

    AspectDetector::new(&tables).detect(&mut chart);

    let pairs: Vec<(BodyId, BodyId)> = chart.aspects().iter().map(|h| (h.from, h.to)).collect();
    assert!(pairs.contains(&(BodyId::SUN, BodyId::ASC)));
    assert!(pairs.contains(&(BodyId::ASC, BodyId::SUN)));
    assert!(!pairs.contains(&(BodyId::MOON, BodyId::MC)));
    // Two cuspids have no orb at all, even when square.
    assert!(!pairs.contains(&(BodyId::ASC, BodyId::MC)));
}

#[test]
fn test_aspect_list_is_symmetric() {
    let bodies = [
        BodyId::SUN,
        BodyId::MOON,
        BodyId::MERCURY,
        BodyId::VENUS,
        BodyId::MARS,
        BodyId::JUPITER,
    ];
    let mut orbs = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            orbs.push((*a, *b, 8.0));
        }
    }
    let tables = tables_with_orbs(&orbs);
    let mut chart = ChartModel::new();
    for (id, abs) in bodies.into_iter().zip([3.0, 61.0, 95.0, 124.5, 183.0, 299.0]) {
        place(&mut chart, id, abs);
    }

    AspectDetector::new(&tables).detect(&mut chart);

    assert!(!chart.aspects().is_empty());
    for hit in chart.aspects() {
        let mirrored = chart
            .aspects()
            .iter()
            .find(|h| h.from == hit.to && h.to == hit.from && h.aspect == hit.aspect)
            .unwrap();
        assert_eq!(mirrored.orb, hit.orb);
    }
}

#[test]
fn test_detected_aspect_awards_bonus_to_first_body() {
    let mut tables = tables_with_orbs(&[(BodyId::SUN, BodyId::JUPITER, 9.0)]);
    tables.aspect_bonuses.push(AspectBonusRule {
        kind: BonusKind::Named("trine_jupiter".to_string()),
        bodies: [BodyId::SUN].into_iter().collect(),
        aspect: Aspect::Trine,
        target: BodyId::JUPITER,
        orb_band: Some((0.0, 3.0)),
        points: 2,
    });
    let mut chart = ChartModel::new();
    place(&mut chart, BodyId::SUN, 0.0);
    place(&mut chart, BodyId::JUPITER, 122.0);

    AspectDetector::new(&tables).detect(&mut chart);

    let kind = BonusKind::Named("trine_jupiter".to_string());
    assert_eq!(chart.body(BodyId::SUN).unwrap().bonuses().get(&kind), Some(2));
    assert!(chart.body(BodyId::JUPITER).unwrap().bonuses().is_empty());
}
