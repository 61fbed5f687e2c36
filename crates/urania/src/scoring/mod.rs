pub mod aspect_bonus;
pub mod bonus;
pub mod dignities;
pub mod rulers;
pub mod scorer;

pub use bonus::{BonusKind, Bonuses};
pub use scorer::BonusScorer;
