// src/config/model.rs

use serde::Deserialize;

use crate::estimate::EstimateDefaults;
use crate::types::Step;

/// Step file as read from disk, before semantic checks.
///
/// TOML layout:
///
/// ```toml
/// [defaults]
/// duration_seconds = 30
/// cost = 0.05
///
/// [[step]]
/// id = "fetch"
/// name = "Fetch data"
/// agent = "http"
/// action = "get"
///
/// [[step]]
/// id = "report"
/// name = "Write report"
/// agent = "writer"
/// action = "summarize"
/// depends_on = ["fetch"]
/// estimated_duration_seconds = 45
/// ```
///
/// JSON documents use the same shape with a `steps` array; a JSON file may
/// also be a bare array of steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawStepFile {
    /// Fallback estimates from `[defaults]`.
    #[serde(default)]
    pub defaults: EstimateDefaults,

    /// All steps from `[[step]]` (or a JSON `steps` array), in file order.
    #[serde(default, alias = "steps")]
    pub step: Vec<Step>,
}

impl RawStepFile {
    /// Wrap a bare step list (JSON array input) with default estimates.
    pub fn from_steps(step: Vec<Step>) -> Self {
        Self {
            defaults: EstimateDefaults::default(),
            step,
        }
    }
}

/// A step file whose `[defaults]` passed validation.
///
/// Graph-level checks (ids, dependencies, cycles) belong to the planner and
/// run when the steps are planned or rendered.
#[derive(Debug, Clone)]
pub struct StepFile {
    defaults: EstimateDefaults,
    steps: Vec<Step>,
}

impl StepFile {
    pub(crate) fn new_unchecked(defaults: EstimateDefaults, steps: Vec<Step>) -> Self {
        Self { defaults, steps }
    }

    pub fn defaults(&self) -> &EstimateDefaults {
        &self.defaults
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
