//! Selection: a set of nodes XOR a single connection.

use crate::id::{EdgeId, NodeId};
use smallvec::SmallVec;

/// The current selection. Selecting anything of one kind clears the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero or more nodes, membership-unique, order irrelevant.
    Nodes(SmallVec<[NodeId; 4]>),
    /// Exactly one connection.
    Edge(EdgeId),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Nodes(SmallVec::new())
    }
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Nodes(nodes) if nodes.is_empty())
    }

    /// Selected nodes; empty when a connection is selected.
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            Selection::Nodes(nodes) => nodes,
            Selection::Edge(_) => &[],
        }
    }

    pub fn edge(&self) -> Option<EdgeId> {
        match self {
            Selection::Edge(id) => Some(*id),
            Selection::Nodes(_) => None,
        }
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes().contains(&id)
    }

    pub fn clear(&mut self) {
        *self = Selection::default();
    }

    /// Replace the selection with a single node.
    pub fn select_node(&mut self, id: NodeId) {
        let mut nodes = SmallVec::new();
        nodes.push(id);
        *self = Selection::Nodes(nodes);
    }

    /// Add a node, switching away from an edge selection if needed.
    pub fn add_node(&mut self, id: NodeId) {
        match self {
            Selection::Nodes(nodes) => {
                if !nodes.contains(&id) {
                    nodes.push(id);
                }
            }
            Selection::Edge(_) => self.select_node(id),
        }
    }

    /// Toggle a node in or out of the node selection.
    pub fn toggle_node(&mut self, id: NodeId) {
        match self {
            Selection::Nodes(nodes) => {
                if let Some(pos) = nodes.iter().position(|n| *n == id) {
                    nodes.remove(pos);
                } else {
                    nodes.push(id);
                }
            }
            Selection::Edge(_) => self.select_node(id),
        }
    }

    /// Replace the selection with many nodes (duplicates collapse).
    pub fn select_nodes(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let mut nodes: SmallVec<[NodeId; 4]> = SmallVec::new();
        for id in ids {
            if !nodes.contains(&id) {
                nodes.push(id);
            }
        }
        *self = Selection::Nodes(nodes);
    }

    pub fn select_edge(&mut self, id: EdgeId) {
        *self = Selection::Edge(id);
    }

    /// Drop a node from the selection (used by deletion).
    pub fn remove_node(&mut self, id: NodeId) {
        if let Selection::Nodes(nodes) = self {
            nodes.retain(|n| *n != id);
        }
    }

    /// Drop an edge from the selection (used by deletion).
    pub fn remove_edge(&mut self, id: EdgeId) {
        if self.edge() == Some(id) {
            self.clear();
        }
    }
}
