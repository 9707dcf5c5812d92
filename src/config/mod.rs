// src/config/mod.rs

//! Step-file loading for the `phaseplan` binary.
//!
//! - `model.rs` defines the TOML/JSON-backed data model.
//! - `loader.rs` reads a step file from disk.
//! - `validate.rs` checks the `[defaults]` table.
//!
//! This is the only place that touches the filesystem; the planner itself
//! works on in-memory step lists.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    default_config_path, load_and_plan, load_and_render, load_and_validate, load_from_path,
};
pub use model::{RawStepFile, StepFile};
