//! Rule tables, the name registry and the TOML loader that builds both.

pub mod loader;
pub mod names;
pub mod tables;

pub use loader::{load_rules_file, load_rules_from_toml, RuleSet};
pub use names::{NatalTag, Registry};
pub use tables::{
    AspectBonusRule, BodyAttributes, DegreeBand, DegreeBonusTable, DegreeRange, DignityRole,
    HourRulers, RuleTables, Term,
};
