// src/render/tree.rs

use std::fmt::Write;

use crate::dag::{NodeIndex, ValidGraph};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";
const REPEAT_MARKER: &str = " (*)";

/// One level of the walk: the dependents of a printed step, the next one to
/// print, and the indentation this level adds below its parent.
struct Frame {
    children: Vec<NodeIndex>,
    cursor: usize,
    indent: &'static str,
}

/// Indented tree, one root at a time in input order.
///
/// ```text
/// Fetch [fetch]
/// ├── Parse [parse]
/// │   └── Report [report]
/// └── Validate [validate]
///     └── Report [report] (*)
/// ```
///
/// A step reached through a second parent is printed again with `(*)` and
/// not expanded, so each edge appears exactly once.
pub fn render_tree(graph: &ValidGraph) -> String {
    let mut out = String::new();
    let mut expanded = vec![false; graph.len()];

    for root in graph.roots() {
        push_label(&mut out, graph, root);
        out.push('\n');
        expanded[root.index()] = true;
        render_descendants(graph, root, &mut expanded, &mut out);
    }

    out
}

/// Depth-first walk below `root` with an explicit stack, so long chains do
/// not grow the call stack.
fn render_descendants(
    graph: &ValidGraph,
    root: NodeIndex,
    expanded: &mut [bool],
    out: &mut String,
) {
    let mut stack = vec![Frame {
        children: graph.dependents_of(root),
        cursor: 0,
        indent: "",
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&child) = frame.children.get(frame.cursor) else {
            stack.pop();
            continue;
        };
        frame.cursor += 1;
        let is_last = frame.cursor == frame.children.len();

        for level in stack.iter() {
            out.push_str(level.indent);
        }
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        push_label(out, graph, child);

        if expanded[child.index()] {
            out.push_str(REPEAT_MARKER);
            out.push('\n');
            continue;
        }
        out.push('\n');
        expanded[child.index()] = true;

        stack.push(Frame {
            children: graph.dependents_of(child),
            cursor: 0,
            indent: if is_last { SPACE } else { PIPE },
        });
    }
}

fn push_label(out: &mut String, graph: &ValidGraph, node: NodeIndex) {
    let step = graph.step(node);
    // Writing into a String cannot fail.
    let _ = write!(out, "{} [{}]", single_line(&step.name), single_line(&step.id));
}

fn single_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
