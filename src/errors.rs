// src/errors.rs

//! Crate-wide error types.
//!
//! - [`ValidationError`] is what the planning engine returns. It is cheap to
//!   clone and compare so callers driving a regeneration loop can inspect it.
//! - [`PhaseplanError`] wraps the file-loading surface (I/O, TOML, JSON) on
//!   top of validation failures.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("step list is empty")]
    EmptyInput,

    #[error("duplicate step id '{id}' at indices {first_index} and {second_index}")]
    DuplicateId {
        id: String,
        first_index: usize,
        second_index: usize,
    },

    #[error("step '{step}' depends on unknown step '{missing}'")]
    UnknownDependency { step: String, missing: String },

    #[error("cycle detected: {}", .cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    #[error("step '{step}' has invalid {field}: {value}")]
    InvalidEstimate {
        step: String,
        field: &'static str,
        value: f64,
    },

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl ValidationError {
    /// `true` for errors that signal a defect in the engine rather than bad
    /// input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ValidationError::InternalInvariantViolation(_))
    }
}

#[derive(Error, Debug)]
pub enum PhaseplanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("invalid step graph: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, PhaseplanError>;
