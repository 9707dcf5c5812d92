// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::trace;

use crate::types::{Edge, Step};

/// In-memory dependency graph of one planning call.
///
/// Nodes are added in input order, so `NodeIndex::index()` is the step's
/// position in the input list and doubles as the deterministic tie-break key.
/// Duplicate ids are kept as separate nodes (the validator reports them);
/// `index` resolves an id to its first occurrence.
///
/// Edges point from a dependency to its dependent. References that do not
/// resolve produce no edge.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<Step, ()>,
    index: HashMap<String, NodeIndex>,
    /// Resolved, distinct dependencies of each node in declared order.
    deps: Vec<Vec<NodeIndex>>,
}

impl DependencyGraph {
    /// Assemble a graph from a flat step list. Performs no validation.
    pub fn build(steps: &[Step]) -> Self {
        let edge_hint = steps.iter().map(|s| s.depends_on.len()).sum();
        let mut graph = DiGraph::with_capacity(steps.len(), edge_hint);
        let mut index: HashMap<String, NodeIndex> = HashMap::with_capacity(steps.len());

        // First pass: one node per input step.
        for step in steps {
            let node = graph.add_node(step.clone());
            index.entry(step.id.clone()).or_insert(node);
        }

        // Second pass: one edge per distinct resolvable dependency.
        let mut deps = Vec::with_capacity(steps.len());
        for (position, step) in steps.iter().enumerate() {
            let dependent = NodeIndex::new(position);
            let mut seen: HashSet<&str> = HashSet::new();
            let mut resolved = Vec::with_capacity(step.depends_on.len());

            for dep in step.depends_on.iter() {
                if !seen.insert(dep.as_str()) {
                    trace!(step = %step.id, dep = %dep, "repeated dependency collapsed");
                    continue;
                }
                if let Some(&dependency) = index.get(dep) {
                    graph.add_edge(dependency, dependent, ());
                    resolved.push(dependency);
                    trace!(from = %dep, to = %step.id, "edge added");
                }
            }
            deps.push(resolved);
        }

        Self { graph, index, deps }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in input order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Steps in input order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.graph.node_weights()
    }

    pub fn step(&self, node: NodeIndex) -> &Step {
        &self.graph[node]
    }

    /// First node carrying `id`.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Immediate dependencies of a node, in the order the step declared them.
    pub fn dependencies_of(&self, node: NodeIndex) -> &[NodeIndex] {
        self.deps
            .get(node.index())
            .map(|d| d.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a node, in input order.
    pub fn dependents_of(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut dependents: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        dependents.sort_unstable();
        dependents
    }

    /// Number of incoming edges (resolved dependencies).
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .count()
    }

    /// Nodes without dependencies, in input order.
    pub fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|&node| self.in_degree(node) == 0)
    }

    /// All edges, grouped by dependent in input order, then declared order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for node in self.node_indices() {
            for &dep in self.dependencies_of(node) {
                edges.push(Edge {
                    from: self.step(dep).id.clone(),
                    to: self.step(node).id.clone(),
                });
            }
        }
        edges
    }
}
