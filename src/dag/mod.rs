// src/dag/mod.rs

//! Dependency graph construction, validation and analysis.
//!
//! - [`graph`] assembles a [`DependencyGraph`] from a flat step list.
//! - [`validate`] checks structural invariants and produces a [`ValidGraph`].
//! - [`phases`] levels a valid graph into parallel phases.
//! - [`critical_path`] finds the longest duration-weighted chain.

pub mod critical_path;
pub mod graph;
pub mod phases;
pub mod validate;

pub use critical_path::{CriticalPath, compute_critical_path};
pub use graph::DependencyGraph;
pub use petgraph::graph::NodeIndex;
pub use phases::compute_phases;
pub use validate::{ValidGraph, validate};
