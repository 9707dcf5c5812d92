// src/dag/phases.rs

//! Kahn-style topological leveling of a validated graph into phases.

use petgraph::graph::NodeIndex;
use tracing::{debug, trace};

use crate::dag::validate::ValidGraph;
use crate::errors::ValidationError;
use crate::types::Phase;

/// Group steps into ordered phases; every step in a phase can run in parallel.
///
/// Each phase holds every step whose dependencies all sit in earlier phases,
/// which gives the minimum number of phases. Within a phase steps keep their
/// input order.
pub fn compute_phases(graph: &ValidGraph) -> Result<Vec<Phase>, ValidationError> {
    let levels = level_indices(graph)?;

    let phases: Vec<Phase> = levels
        .into_iter()
        .enumerate()
        .map(|(index, nodes)| Phase {
            index,
            steps: nodes.iter().map(|&node| graph.step(node).clone()).collect(),
        })
        .collect();

    debug!(phases = phases.len(), steps = graph.len(), "phases computed");
    Ok(phases)
}

/// Leveling on node indices. Flattening the result yields a topological order.
pub(crate) fn level_indices(graph: &ValidGraph) -> Result<Vec<Vec<NodeIndex>>, ValidationError> {
    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.in_degree(node))
        .collect();

    let mut current: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|node| in_degree[node.index()] == 0)
        .collect();

    let mut levels: Vec<Vec<NodeIndex>> = Vec::new();
    let mut assigned = 0usize;

    while assigned < graph.len() {
        if current.is_empty() {
            return Err(ValidationError::InternalInvariantViolation(format!(
                "phase {} is empty with {} of {} steps unassigned",
                levels.len(),
                graph.len() - assigned,
                graph.len()
            )));
        }

        let mut next: Vec<NodeIndex> = Vec::new();
        for &node in current.iter() {
            for dependent in graph.dependents_of(node) {
                let degree = &mut in_degree[dependent.index()];
                *degree = degree.checked_sub(1).ok_or_else(|| {
                    ValidationError::InternalInvariantViolation(format!(
                        "in-degree of step '{}' dropped below zero",
                        graph.step(dependent).id
                    ))
                })?;
                if *degree == 0 {
                    next.push(dependent);
                }
            }
        }
        next.sort_unstable();

        trace!(phase = levels.len(), size = current.len(), "phase leveled");
        assigned += current.len();
        levels.push(std::mem::replace(&mut current, next));
    }

    Ok(levels)
}
