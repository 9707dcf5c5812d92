// src/dag/critical_path.rs

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::dag::phases::level_indices;
use crate::dag::validate::ValidGraph;
use crate::errors::ValidationError;
use crate::estimate::Estimator;

/// Longest duration-weighted chain of steps through the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPath {
    /// Step ids from the first step to run to the last.
    pub step_ids: Vec<String>,
    /// Earliest possible finish time of the last step on the path.
    pub duration_seconds: f64,
}

/// Forward pass over a topological order computing
/// `earliest_finish(n) = duration(n) + max(earliest_finish(dep))`, then a
/// backtrack from the step that finishes last.
///
/// Ties go to input order: the first-declared dependency wins while
/// backtracking, and the earliest step in the input wins as end point.
pub fn compute_critical_path(
    graph: &ValidGraph,
    estimator: &Estimator,
) -> Result<CriticalPath, ValidationError> {
    let levels = level_indices(graph)?;

    let mut earliest_finish = vec![0.0_f64; graph.len()];
    let mut via: Vec<Option<NodeIndex>> = vec![None; graph.len()];

    for &node in levels.iter().flatten() {
        let mut best: Option<(NodeIndex, f64)> = None;
        for &dep in graph.dependencies_of(node) {
            let finish = earliest_finish[dep.index()];
            if best.is_none_or(|(_, best_finish)| finish > best_finish) {
                best = Some((dep, finish));
            }
        }

        let start = best.map_or(0.0, |(_, finish)| finish);
        earliest_finish[node.index()] = start + estimator.duration_of(graph.step(node));
        via[node.index()] = best.map(|(dep, _)| dep);
    }

    let mut end: Option<NodeIndex> = None;
    for node in graph.node_indices() {
        if end.is_none_or(|current| earliest_finish[node.index()] > earliest_finish[current.index()]) {
            end = Some(node);
        }
    }
    let end = end.ok_or_else(|| {
        ValidationError::InternalInvariantViolation(
            "critical path requested for an empty graph".to_string(),
        )
    })?;

    let mut path = vec![end];
    let mut cursor = end;
    while let Some(previous) = via[cursor.index()] {
        if path.len() > graph.len() {
            return Err(ValidationError::InternalInvariantViolation(
                "critical path backtrack did not terminate".to_string(),
            ));
        }
        path.push(previous);
        cursor = previous;
    }
    path.reverse();

    let critical = CriticalPath {
        step_ids: path
            .into_iter()
            .map(|node| graph.step(node).id.clone())
            .collect(),
        duration_seconds: earliest_finish[end.index()],
    };

    debug!(
        path = ?critical.step_ids,
        duration_seconds = critical.duration_seconds,
        "critical path computed"
    );
    Ok(critical)
}
