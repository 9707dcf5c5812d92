// src/render/mod.rs

//! Textual renderings of a validated graph.
//!
//! Every format lists every step and every dependency edge. Rendering is pure;
//! the same graph always yields the same string.

pub mod dot;
pub mod mermaid;
pub mod tree;

use crate::dag::ValidGraph;
use crate::types::RenderFormat;

pub use dot::render_dot;
pub use mermaid::render_mermaid;
pub use tree::render_tree;

pub fn render_graph(graph: &ValidGraph, format: RenderFormat) -> String {
    match format {
        RenderFormat::Tree => render_tree(graph),
        RenderFormat::Dot => render_dot(graph),
        RenderFormat::Mermaid => render_mermaid(graph),
    }
}
