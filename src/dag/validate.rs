// src/dag/validate.rs

use std::collections::HashMap;
use std::ops::Deref;

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::dag::graph::DependencyGraph;
use crate::errors::ValidationError;

/// A [`DependencyGraph`] that passed [`validate`].
///
/// Phase computation, critical-path analysis and rendering only accept this
/// type, so they never see duplicate ids, dangling references or cycles.
#[derive(Debug, Clone)]
pub struct ValidGraph {
    graph: DependencyGraph,
}

impl ValidGraph {
    pub fn into_inner(self) -> DependencyGraph {
        self.graph
    }
}

impl Deref for ValidGraph {
    type Target = DependencyGraph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl TryFrom<DependencyGraph> for ValidGraph {
    type Error = ValidationError;

    fn try_from(graph: DependencyGraph) -> Result<Self, Self::Error> {
        validate(&graph)?;
        Ok(ValidGraph { graph })
    }
}

/// Check structural invariants, stopping at the first failure.
///
/// Order:
/// - the step list is not empty
/// - ids are unique
/// - every `depends_on` entry names an existing step
/// - the graph has no cycles
/// - estimates are finite and non-negative
pub fn validate(graph: &DependencyGraph) -> Result<(), ValidationError> {
    ensure_has_steps(graph)?;
    validate_unique_ids(graph)?;
    validate_dependencies(graph)?;
    validate_acyclic(graph)?;
    validate_estimates(graph)?;
    debug!(
        steps = graph.len(),
        edges = graph.edge_count(),
        "dependency graph validated"
    );
    Ok(())
}

fn ensure_has_steps(graph: &DependencyGraph) -> Result<(), ValidationError> {
    if graph.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(())
}

fn validate_unique_ids(graph: &DependencyGraph) -> Result<(), ValidationError> {
    let mut first_seen: HashMap<&str, usize> = HashMap::with_capacity(graph.len());

    for (position, step) in graph.steps().enumerate() {
        if let Some(&first_index) = first_seen.get(step.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: step.id.clone(),
                first_index,
                second_index: position,
            });
        }
        first_seen.insert(step.id.as_str(), position);
    }
    Ok(())
}

fn validate_dependencies(graph: &DependencyGraph) -> Result<(), ValidationError> {
    for step in graph.steps() {
        for dep in step.depends_on.iter() {
            if graph.index_of(dep).is_none() {
                return Err(ValidationError::UnknownDependency {
                    step: step.id.clone(),
                    missing: dep.clone(),
                });
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnStack,
    Done,
}

/// Iterative depth-first search along dependency -> dependent edges.
///
/// A back-edge to a node that is still on the stack closes a cycle; the
/// reported cycle runs from that node along the current path and back to it.
fn validate_acyclic(graph: &DependencyGraph) -> Result<(), ValidationError> {
    let dependents: Vec<Vec<NodeIndex>> = graph
        .node_indices()
        .map(|node| graph.dependents_of(node))
        .collect();
    let mut visit = vec![Visit::Unvisited; graph.len()];

    for root in graph.node_indices() {
        if visit[root.index()] != Visit::Unvisited {
            continue;
        }

        // Each frame is a node plus the position of its next unexplored dependent.
        let mut stack: Vec<(NodeIndex, usize)> = vec![(root, 0)];
        visit[root.index()] = Visit::OnStack;

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;

            let Some(&next) = dependents[node.index()].get(cursor) else {
                visit[node.index()] = Visit::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match visit[next.index()] {
                Visit::Unvisited => {
                    visit[next.index()] = Visit::OnStack;
                    stack.push((next, 0));
                }
                Visit::OnStack => return Err(cycle_error(graph, &stack, next)),
                Visit::Done => {}
            }
        }
    }
    Ok(())
}

fn cycle_error(
    graph: &DependencyGraph,
    stack: &[(NodeIndex, usize)],
    revisited: NodeIndex,
) -> ValidationError {
    let start = stack
        .iter()
        .position(|&(node, _)| node == revisited)
        .unwrap_or(0);

    let mut cycle: Vec<String> = stack[start..]
        .iter()
        .map(|&(node, _)| graph.step(node).id.clone())
        .collect();
    cycle.push(graph.step(revisited).id.clone());

    ValidationError::CycleDetected { cycle }
}

fn validate_estimates(graph: &DependencyGraph) -> Result<(), ValidationError> {
    for step in graph.steps() {
        let fields = [
            ("estimated_duration_seconds", step.estimated_duration_seconds),
            ("estimated_cost", step.estimated_cost),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidEstimate {
                        step: step.id.clone(),
                        field,
                        value,
                    });
                }
            }
        }
    }
    Ok(())
}
