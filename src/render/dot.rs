// src/render/dot.rs

use std::fmt::Write;

use crate::dag::ValidGraph;

/// Graphviz DOT: one statement per step, one `"source" -> "target";` per edge.
pub fn render_dot(graph: &ValidGraph) -> String {
    let mut out = String::new();
    out.push_str("digraph workflow {\n");
    out.push_str("  rankdir=TB;\n");
    out.push_str("  node [shape=box, fontname=\"Helvetica\"];\n");
    out.push('\n');

    for step in graph.steps() {
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\\n{}: {}\"];",
            escape_dot(&step.id),
            escape_dot(&step.name),
            escape_dot(&step.agent),
            escape_dot(&step.action),
        );
    }

    out.push('\n');

    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            escape_dot(&edge.from),
            escape_dot(&edge.to)
        );
    }

    out.push_str("}\n");
    out
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}
