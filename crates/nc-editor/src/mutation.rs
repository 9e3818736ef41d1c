//! Graph mutations produced by the interaction controller.
//!
//! The controller never touches the graph; it describes what should happen
//! and the engine applies it here, one mutation at a time.

use nc_core::{Bounds, CanvasGraph, EdgeId, NodeId, Selection, Side};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    /// Create a content node with its top-left corner at `(x, y)`.
    CreateNode { text: String, x: f32, y: f32 },
    /// Move every selected node by the same delta.
    MoveSelection { dx: f32, dy: f32 },
    SetBounds { id: NodeId, bounds: Bounds },
    SetScroll { id: NodeId, y: f32 },
    ScrollBy { id: NodeId, dy: f32 },
    SelectNode { id: NodeId },
    ToggleSelection { id: NodeId },
    AddToSelection { id: NodeId },
    /// Select `ids`, replacing the selection or adding to it.
    SelectMultiple { ids: Vec<NodeId>, extend: bool },
    SelectConnection { id: EdgeId },
    ClearSelection,
    SelectAll,
    Connect {
        from: NodeId,
        to: NodeId,
        from_side: Option<Side>,
        to_side: Option<Side>,
    },
    /// Delete the selected connection, or else every selected node.
    DeleteSelection,
    /// Screen-pixel delta added to the viewport offset.
    Pan { dx: f32, dy: f32 },
    /// Rescale around a screen point.
    Zoom { scale: f32, x: f32, y: f32 },
}

/// What applying a mutation did.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Unchanged,
    Changed,
    CreatedNode(NodeId),
    CreatedEdge(EdgeId),
    /// Nodes removed, connections cascaded with them.
    DeletedNodes(SmallVec<[NodeId; 4]>),
    DeletedEdge(EdgeId),
}

impl GraphMutation {
    /// Apply to the graph. Stale ids resolve to `Unchanged`.
    pub fn apply(self, graph: &mut CanvasGraph) -> MutationOutcome {
        use MutationOutcome::{Changed, Unchanged};
        let changed = |ok: bool| if ok { Changed } else { Unchanged };

        match self {
            GraphMutation::CreateNode { text, x, y } => MutationOutcome::CreatedNode(graph.create_node(&text, x, y)),
            GraphMutation::MoveSelection { dx, dy } => {
                if dx == 0.0 && dy == 0.0 {
                    return Unchanged;
                }
                changed(graph.move_selection(dx, dy))
            }
            GraphMutation::SetBounds { id, bounds } => {
                if graph.node(id).is_some_and(|n| n.bounds == bounds.floored()) {
                    return Unchanged;
                }
                changed(graph.set_bounds(id, bounds))
            }
            GraphMutation::SetScroll { id, y } => changed(graph.set_scroll(id, y)),
            GraphMutation::ScrollBy { id, dy } => changed(graph.scroll_by(id, dy)),
            GraphMutation::SelectNode { id } => changed(graph.select_node(id)),
            GraphMutation::ToggleSelection { id } => changed(graph.toggle_selection(id)),
            GraphMutation::AddToSelection { id } => changed(graph.add_to_selection(id)),
            GraphMutation::SelectMultiple { ids, extend } => {
                if extend {
                    let mut all = graph.selected_nodes();
                    all.extend(ids.into_iter().filter(|id| !graph.is_selected(*id)));
                    graph.select_multiple(&all);
                } else {
                    graph.select_multiple(&ids);
                }
                Changed
            }
            GraphMutation::SelectConnection { id } => changed(graph.select_connection(id)),
            GraphMutation::ClearSelection => {
                if graph.selection().is_empty() {
                    return Unchanged;
                }
                graph.clear_selection();
                Changed
            }
            GraphMutation::SelectAll => {
                graph.select_all();
                Changed
            }
            GraphMutation::Connect {
                from,
                to,
                from_side,
                to_side,
            } => match graph.create_connection(from, to, from_side, to_side) {
                Some(id) => MutationOutcome::CreatedEdge(id),
                None => Unchanged,
            },
            GraphMutation::DeleteSelection => match graph.selection().clone() {
                Selection::Edge(id) => {
                    if graph.delete_connection(id) {
                        MutationOutcome::DeletedEdge(id)
                    } else {
                        Unchanged
                    }
                }
                Selection::Nodes(ids) if ids.is_empty() => Unchanged,
                Selection::Nodes(ids) => {
                    graph.delete_nodes(&ids);
                    MutationOutcome::DeletedNodes(ids)
                }
            },
            GraphMutation::Pan { dx, dy } => {
                if dx == 0.0 && dy == 0.0 {
                    return Unchanged;
                }
                graph.pan(dx, dy);
                Changed
            }
            GraphMutation::Zoom { scale, x, y } => changed(graph.zoom_around(scale, x, y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn delete_prefers_the_selected_connection() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("a", 0.0, 0.0);
        let b = g.create_node("b", 400.0, 0.0);
        let e = g.create_connection(a, b, None, None).unwrap();
        g.select_connection(e);

        let outcome = GraphMutation::DeleteSelection.apply(&mut g);
        assert_eq!(outcome, MutationOutcome::DeletedEdge(e));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn delete_nodes_cascades() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("a", 0.0, 0.0);
        let b = g.create_node("b", 400.0, 0.0);
        let c = g.create_node("c", 800.0, 0.0);
        g.create_connection(a, b, None, None);
        let kept = g.create_connection(b, c, None, None).unwrap();
        g.select_node(a);

        let outcome = GraphMutation::DeleteSelection.apply(&mut g);
        assert_eq!(outcome, MutationOutcome::DeletedNodes(SmallVec::from_slice(&[a])));
        assert_eq!(g.edges().map(|e| e.id).collect::<Vec<_>>(), vec![kept]);
    }

    #[test]
    fn empty_selection_deletes_nothing() {
        let mut g = CanvasGraph::new();
        g.create_node("a", 0.0, 0.0);
        let revision = g.revision();
        assert_eq!(GraphMutation::DeleteSelection.apply(&mut g), MutationOutcome::Unchanged);
        assert_eq!(g.revision(), revision);
    }

    #[test]
    fn extend_keeps_existing_selection() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("a", 0.0, 0.0);
        let b = g.create_node("b", 400.0, 0.0);
        g.select_node(a);
        GraphMutation::SelectMultiple {
            ids: vec![b, a],
            extend: true,
        }
        .apply(&mut g);
        assert_eq!(g.selected_nodes(), vec![a, b]);

        GraphMutation::SelectMultiple {
            ids: vec![b],
            extend: false,
        }
        .apply(&mut g);
        assert_eq!(g.selected_nodes(), vec![b]);
    }

    #[test]
    fn stale_ids_are_no_ops() {
        let mut g = CanvasGraph::new();
        let ghost = NodeId::intern("ghost");
        assert_eq!(GraphMutation::SelectNode { id: ghost }.apply(&mut g), MutationOutcome::Unchanged);
        assert_eq!(
            GraphMutation::SetScroll { id: ghost, y: 10.0 }.apply(&mut g),
            MutationOutcome::Unchanged
        );
    }
}
