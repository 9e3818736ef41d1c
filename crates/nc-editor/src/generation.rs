//! Idea generation: prompt building and result placement.
//!
//! The model call itself belongs to the host. This module only decides
//! what to ask and where the answers land.

use nc_core::{CanvasGraph, NodeId, NodeKind, Side};
use serde::{Deserialize, Serialize};

/// Horizontal gap between the source node and the idea column.
pub const IDEA_COLUMN_GAP: f32 = 80.0;
/// Vertical gap between stacked ideas.
pub const IDEA_ROW_GAP: f32 = 24.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Text of the node ideas are generated from.
    pub prompt: String,
    /// Ancestor texts, nearest first.
    pub context: Vec<String>,
    pub count: usize,
}

fn prompt_text(kind: &NodeKind) -> Option<&str> {
    match kind {
        NodeKind::Content { text } => Some(text.as_str()),
        NodeKind::Reference { path, content } => content.text().or(Some(path.as_str())),
    }
}

/// Build the request for `node`: its own text plus the text of every
/// node reachable backwards over incoming connections.
pub fn build_request(graph: &CanvasGraph, node: NodeId, count: usize) -> Option<GenerationRequest> {
    let source = graph.node(node)?;
    let prompt = prompt_text(&source.kind)?.trim().to_string();
    let context = graph
        .ancestors(node)
        .into_iter()
        .filter_map(|id| graph.node(id))
        .filter_map(|n| prompt_text(&n.kind))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    Some(GenerationRequest {
        prompt,
        context,
        count,
    })
}

/// Lay out one content node per non-empty idea in a column to the right of
/// `source`, vertically centred on it, each connected source → idea.
///
/// Returns the new node ids; empty when the source is gone or every idea
/// was blank.
pub fn place_ideas(graph: &mut CanvasGraph, source: NodeId, ideas: &[String], provenance: &str) -> Vec<NodeId> {
    let Some(bounds) = graph.node(source).map(|n| n.bounds) else {
        return Vec::new();
    };
    let ideas: Vec<&str> = ideas.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
    if ideas.is_empty() {
        return Vec::new();
    }

    let height = graph.defaults().content_height;
    let column = ideas.len() as f32 * height + (ideas.len() - 1) as f32 * IDEA_ROW_GAP;
    let x = bounds.right() + IDEA_COLUMN_GAP;
    let top = bounds.center().1 - column / 2.0;

    let mut created = Vec::with_capacity(ideas.len());
    for (i, idea) in ideas.into_iter().enumerate() {
        let y = top + i as f32 * (height + IDEA_ROW_GAP);
        let id = graph.create_node(idea, x, y);
        graph.set_provenance(id, Some(provenance.to_string()));
        graph.create_connection(source, id, Some(Side::Right), Some(Side::Left));
        created.push(id);
    }
    log::info!("placed {} idea(s) next to {source}", created.len());
    created
}
