// src/render/mermaid.rs

use std::fmt::Write;

use crate::dag::{NodeIndex, ValidGraph};

/// Mermaid top-down flowchart.
///
/// Step ids can contain characters Mermaid does not accept in node ids, so
/// nodes are keyed `n<input position>` and the step id goes into the label.
pub fn render_mermaid(graph: &ValidGraph) -> String {
    let mut out = String::new();
    out.push_str("flowchart TD\n");

    for node in graph.node_indices() {
        let step = graph.step(node);
        let _ = writeln!(
            out,
            "  {}[\"{} [{}]\"]",
            node_key(node),
            escape_mermaid(&step.name),
            escape_mermaid(&step.id),
        );
    }

    for node in graph.node_indices() {
        for &dep in graph.dependencies_of(node) {
            let _ = writeln!(out, "  {} --> {}", node_key(dep), node_key(node));
        }
    }

    out
}

fn node_key(node: NodeIndex) -> String {
    format!("n{}", node.index())
}

fn escape_mermaid(s: &str) -> String {
    s.replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace("\r\n", "<br/>")
        .replace(['\r', '\n'], "<br/>")
}
