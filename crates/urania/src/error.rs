use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing a degree string such as `12°30'15"`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegreeError {
    #[error("not a degree value: {0:?}")]
    Malformed(String),
    #[error("degree value out of range: {value} (expected {min}..{max})")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// Errors that can occur when loading rule tables.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown body name in {table}: {name}")]
    UnknownBody { table: &'static str, name: String },
    #[error("unknown sign name in {table}: {name}")]
    UnknownSign { table: &'static str, name: String },
    #[error("unknown aspect name in {table}: {name}")]
    UnknownAspect { table: &'static str, name: String },
    #[error("unknown weekday in {table}: {name}")]
    UnknownWeekday { table: &'static str, name: String },
    #[error("invalid degree in {table}: {source}")]
    Degree {
        table: &'static str,
        #[source]
        source: DegreeError,
    },
    #[error("malformed {table} table: {message}")]
    Shape { table: &'static str, message: String },
}
