pub mod houses;
pub mod model;

pub use houses::{house_spans, next_house, HouseAssigner, HouseSpan};
pub use model::{CelestialBody, ChartModel, PositionRecord};
