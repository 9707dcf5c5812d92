// src/estimate.rs

//! Duration and cost estimates.
//!
//! Steps may omit their estimates; [`Estimator`] fills the gaps from
//! [`EstimateDefaults`]. [`aggregate`] turns phases plus the critical path into
//! plan totals.

use serde::{Deserialize, Serialize};

use crate::dag::critical_path::CriticalPath;
use crate::types::{Phase, PhaseEstimate, Step};

pub const DEFAULT_DURATION_SECONDS: f64 = 30.0;
pub const DEFAULT_COST: f64 = 0.05;

/// Fallback estimates for steps that do not carry their own.
///
/// Read from the `[defaults]` table of a step file:
///
/// ```toml
/// [defaults]
/// duration_seconds = 30
/// cost = 0.05
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateDefaults {
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,

    #[serde(default = "default_cost")]
    pub cost: f64,
}

fn default_duration_seconds() -> f64 {
    DEFAULT_DURATION_SECONDS
}

fn default_cost() -> f64 {
    DEFAULT_COST
}

impl Default for EstimateDefaults {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration_seconds(),
            cost: default_cost(),
        }
    }
}

/// Resolves the effective estimates of a step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Estimator {
    defaults: EstimateDefaults,
}

impl Estimator {
    pub fn new(defaults: EstimateDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &EstimateDefaults {
        &self.defaults
    }

    pub fn duration_of(&self, step: &Step) -> f64 {
        step.estimated_duration_seconds
            .unwrap_or(self.defaults.duration_seconds)
    }

    pub fn cost_of(&self, step: &Step) -> f64 {
        step.estimated_cost.unwrap_or(self.defaults.cost)
    }
}

/// Plan-level figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// Duration of the critical path.
    pub total_duration_seconds: f64,
    /// Cost of every step; running in parallel does not make a step cheaper.
    pub total_cost: f64,
    pub phases: Vec<PhaseEstimate>,
}

/// Combine per-step estimates into per-phase and total figures.
///
/// Total duration is taken from the critical path. Summing per-phase maxima
/// would over-estimate whenever the critical path skips a phase's slowest step.
pub fn aggregate(phases: &[Phase], critical_path: &CriticalPath, estimator: &Estimator) -> Totals {
    let per_phase: Vec<PhaseEstimate> = phases
        .iter()
        .map(|phase| PhaseEstimate {
            index: phase.index,
            duration_seconds: phase
                .steps
                .iter()
                .map(|step| estimator.duration_of(step))
                .fold(0.0, f64::max),
            cost: phase.steps.iter().map(|step| estimator.cost_of(step)).sum(),
        })
        .collect();

    let total_cost: f64 = phases
        .iter()
        .flat_map(|phase| phase.steps.iter())
        .map(|step| estimator.cost_of(step))
        .sum();

    Totals {
        total_duration_seconds: critical_path.duration_seconds,
        total_cost,
        phases: per_phase,
    }
}
