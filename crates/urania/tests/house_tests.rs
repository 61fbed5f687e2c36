use urania::chart::{house_spans, HouseAssigner};
use urania::{BodyId, ChartModel, Notice, PositionRecord, Sign};

fn place(chart: &mut ChartModel, id: BodyId, abs: f64) {
    let sign = Sign::from_index((abs / 30.0).floor() as u8).unwrap();
    let degree = abs - f64::from(sign.index()) * 30.0;
    assert!(chart.add_position(PositionRecord::new(id, sign, degree)));
}

fn equal_houses(chart: &mut ChartModel, asc: f64) {
    for house in 1..=12u8 {
        place(chart, BodyId::cusp(house), (asc + 30.0 * f64::from(house - 1)) % 360.0);
    }
}

#[test]
fn test_every_body_gets_exactly_one_house() {
    let mut chart = ChartModel::new();
    equal_houses(&mut chart, 0.0);
    let bodies = [
        (BodyId::SUN, 0.0),
        (BodyId::MOON, 15.0),
        (BodyId::MERCURY, 30.0),
        (BodyId::VENUS, 95.5),
        (BodyId::MARS, 200.0),
        (BodyId::JUPITER, 359.9),
        (BodyId::SATURN, 330.0),
    ];
    for (id, abs) in bodies {
        place(&mut chart, id, abs);
    }

    HouseAssigner::new().assign(&mut chart);

    let house = |id| chart.body(id).unwrap().house().unwrap();
    assert_eq!(house(BodyId::SUN), 1);
    assert_eq!(house(BodyId::MOON), 1);
    assert_eq!(house(BodyId::MERCURY), 2);
    assert_eq!(house(BodyId::VENUS), 4);
    assert_eq!(house(BodyId::MARS), 7);
    assert_eq!(house(BodyId::JUPITER), 12);
    assert_eq!(house(BodyId::SATURN), 12);
    assert!(chart.notices().is_empty());
}

#[test]
fn test_body_on_start_cusp_is_first_third() {
    let mut chart = ChartModel::new();
    equal_houses(&mut chart, 0.0);
    place(&mut chart, BodyId::SUN, 60.0);
    place(&mut chart, BodyId::MOON, 75.0);
    place(&mut chart, BodyId::MARS, 81.0);
    place(&mut chart, BodyId::VENUS, 69.9);

    HouseAssigner::new().assign(&mut chart);

    let sun = chart.body(BodyId::SUN).unwrap();
    assert_eq!((sun.house(), sun.third()), (Some(3), Some(1)));
    let moon = chart.body(BodyId::MOON).unwrap();
    assert_eq!((moon.house(), moon.third()), (Some(3), Some(2)));
    let mars = chart.body(BodyId::MARS).unwrap();
    assert_eq!((mars.house(), mars.third()), (Some(3), Some(3)));
    let venus = chart.body(BodyId::VENUS).unwrap();
    assert_eq!(venus.third(), Some(1));
}

#[test]
fn test_houses_wrap_through_aries_point() {
    let mut chart = ChartModel::new();
    equal_houses(&mut chart, 350.0);
    place(&mut chart, BodyId::SUN, 5.0);
    place(&mut chart, BodyId::MOON, 345.0);

    HouseAssigner::new().assign(&mut chart);

    let sun = chart.body(BodyId::SUN).unwrap();
    assert_eq!((sun.house(), sun.third()), (Some(1), Some(2)));
    assert_eq!(chart.body(BodyId::MOON).unwrap().house(), Some(12));
}

#[test]
fn test_unequal_house_sizes() {
    let mut chart = ChartModel::new();
    let cusps = [
        100.0, 122.0, 145.0, 171.0, 205.0, 243.0, 280.0, 302.0, 325.0, 351.0, 25.0, 63.0,
    ];
    for (house, abs) in (1..=12u8).zip(cusps) {
        place(&mut chart, BodyId::cusp(house), abs);
    }
    place(&mut chart, BodyId::SUN, 346.0);
    place(&mut chart, BodyId::MOON, 10.0);
    place(&mut chart, BodyId::JUPITER, 91.0);

    let spans = house_spans(&chart);
    assert_eq!(spans.len(), 12);
    assert_eq!(spans[9].size, 34.0);

    HouseAssigner::new().assign(&mut chart);
    assert_eq!(chart.body(BodyId::SUN).unwrap().house(), Some(9));
    assert_eq!(chart.body(BodyId::MOON).unwrap().house(), Some(10));
    assert_eq!(chart.body(BodyId::JUPITER).unwrap().house(), Some(12));
    assert_eq!(chart.body(BodyId::JUPITER).unwrap().third(), Some(3));
}

#[test]
fn test_cusps_are_not_housed() {
    let mut chart = ChartModel::new();
    equal_houses(&mut chart, 0.0);
    HouseAssigner::new().assign(&mut chart);
    assert!(chart.bodies().all(|b| b.house().is_none()));
}

#[test]
fn test_missing_cusp_skips_adjacent_houses() {
    let mut chart = ChartModel::new();
    for house in (1..=12u8).filter(|h| *h != 5) {
        place(&mut chart, BodyId::cusp(house), 30.0 * f64::from(house - 1));
    }
    place(&mut chart, BodyId::SUN, 125.0);
    place(&mut chart, BodyId::MOON, 10.0);

    HouseAssigner::new().assign(&mut chart);

    assert!(chart.notices().contains(&Notice::MissingCusp { house: 4 }));
    assert!(chart.notices().contains(&Notice::MissingCusp { house: 5 }));
    assert!(chart.notices().contains(&Notice::Unhoused { body: BodyId::SUN }));
    assert_eq!(chart.body(BodyId::MOON).unwrap().house(), Some(1));
}

#[test]
fn test_wide_house_does_not_claim_bodies_beyond_its_end() {
    let mut chart = ChartModel::new();
    let cusps = [
        0.0, 150.0, 170.0, 190.0, 210.0, 230.0, 250.0, 270.0, 290.0, 310.0, 330.0, 345.0,
    ];
    for (house, abs) in (1..=12u8).zip(cusps) {
        place(&mut chart, BodyId::cusp(house), abs);
    }
    place(&mut chart, BodyId::SUN, 300.0);
    place(&mut chart, BodyId::MOON, 295.0);
    place(&mut chart, BodyId::MARS, 110.0);
    place(&mut chart, BodyId::VENUS, 150.0);

    HouseAssigner::new().assign(&mut chart);

    let house = |id| chart.body(id).unwrap().house();
    assert_eq!(house(BodyId::SUN), Some(9));
    assert_eq!(house(BodyId::MOON), Some(9));
    assert_eq!(house(BodyId::MARS), Some(1));
    assert_eq!(house(BodyId::VENUS), Some(2));
    assert_eq!(chart.body(BodyId::MARS).unwrap().third(), Some(3));
    assert!(chart.notices().is_empty());
}
