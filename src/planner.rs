// src/planner.rs

//! Public entry points of the planning engine.
//!
//! Each call builds its own graph, validates it and throws it away when the
//! result is returned; nothing is shared between calls.

use tracing::{debug, info, warn};

use crate::dag::{DependencyGraph, ValidGraph, compute_critical_path, compute_phases};
use crate::errors::ValidationError;
use crate::estimate::{EstimateDefaults, Estimator, aggregate};
use crate::render::render_graph;
use crate::types::{ExecutionPlan, RenderFormat, Step};

/// Build an [`ExecutionPlan`] using the default fallback estimates
/// (30 s and 0.05 per step).
pub fn plan(steps: &[Step]) -> Result<ExecutionPlan, ValidationError> {
    plan_with(steps, &EstimateDefaults::default())
}

/// Build an [`ExecutionPlan`], filling missing step estimates from `defaults`.
pub fn plan_with(
    steps: &[Step],
    defaults: &EstimateDefaults,
) -> Result<ExecutionPlan, ValidationError> {
    let graph = build_valid_graph(steps)?;
    let estimator = Estimator::new(*defaults);

    let phases = compute_phases(&graph)?;
    let critical_path = compute_critical_path(&graph, &estimator)?;
    let totals = aggregate(&phases, &critical_path, &estimator);

    info!(
        steps = graph.len(),
        phases = phases.len(),
        total_duration_seconds = totals.total_duration_seconds,
        total_cost = totals.total_cost,
        "execution plan ready"
    );

    Ok(ExecutionPlan {
        phases,
        phase_estimates: totals.phases,
        total_duration_seconds: totals.total_duration_seconds,
        total_cost: totals.total_cost,
        critical_path: critical_path.step_ids,
    })
}

/// Validate `steps` and render the graph in the requested format.
pub fn render(steps: &[Step], format: RenderFormat) -> Result<String, ValidationError> {
    let graph = build_valid_graph(steps)?;
    let rendered = render_graph(&graph, format);
    debug!(%format, bytes = rendered.len(), "graph rendered");
    Ok(rendered)
}

fn build_valid_graph(steps: &[Step]) -> Result<ValidGraph, ValidationError> {
    let graph = DependencyGraph::build(steps);
    debug!(
        steps = graph.len(),
        edges = graph.edge_count(),
        "dependency graph built"
    );

    ValidGraph::try_from(graph).inspect_err(|err| {
        warn!(error = %err, "step list rejected");
    })
}
