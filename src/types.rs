// src/types.rs

//! Records shared by the planner, the loader and the renderers.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single workflow step as handed over by the step-list producer.
///
/// Both snake_case and the producer's camelCase spellings are accepted for
/// the multi-word fields. Unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub id: String,
    pub name: String,
    pub agent: String,
    pub action: String,

    /// Ids of the steps that must finish before this one starts.
    ///
    /// Treated as an ordered set: a repeated id only yields one edge.
    #[serde(default, alias = "dependsOn")]
    pub depends_on: Vec<String>,

    /// If `None`, the planner falls back to `EstimateDefaults::duration_seconds`.
    #[serde(
        default,
        alias = "estimatedDurationSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_duration_seconds: Option<f64>,

    /// If `None`, the planner falls back to `EstimateDefaults::cost`.
    #[serde(
        default,
        alias = "estimatedCost",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_cost: Option<f64>,
}

/// Directed relation `from` (dependency) -> `to` (dependent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// A group of steps that may all run in parallel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub index: usize,
    /// Steps in original input order.
    pub steps: Vec<Step>,
}

impl Phase {
    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.id.as_str())
    }
}

/// Per-phase figures, reported for display next to the plan totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseEstimate {
    pub index: usize,
    /// Slowest step in the phase. The plan total comes from the critical
    /// path, not from summing these.
    pub duration_seconds: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
    pub phases: Vec<Phase>,
    pub phase_estimates: Vec<PhaseEstimate>,
    pub total_duration_seconds: f64,
    pub total_cost: f64,
    pub critical_path: Vec<String>,
}

impl ExecutionPlan {
    /// Index of the phase containing `step_id`, if any.
    pub fn phase_of(&self, step_id: &str) -> Option<usize> {
        self.phases
            .iter()
            .find(|phase| phase.step_ids().any(|id| id == step_id))
            .map(|phase| phase.index)
    }

    pub fn step_count(&self) -> usize {
        self.phases.iter().map(|p| p.steps.len()).sum()
    }
}

/// Output format for the graph renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Indented tree with box-drawing connectors.
    Tree,
    /// Graphviz DOT.
    Dot,
    /// Mermaid flowchart.
    Mermaid,
}

impl Default for RenderFormat {
    fn default() -> Self {
        RenderFormat::Tree
    }
}

impl RenderFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderFormat::Tree => "tree",
            RenderFormat::Dot => "dot",
            RenderFormat::Mermaid => "mermaid",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tree" => Ok(RenderFormat::Tree),
            "dot" | "graphviz" => Ok(RenderFormat::Dot),
            "mermaid" => Ok(RenderFormat::Mermaid),
            other => Err(format!(
                "invalid render format: {other} (expected \"tree\", \"dot\" or \"mermaid\")"
            )),
        }
    }
}
