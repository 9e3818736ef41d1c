//! Copy and paste of node groups.
//!
//! Connections are not copied. A copied group can travel through the
//! system clipboard as a canvas-file fragment, so pasting works across
//! canvases and into other tools that read the format.

use nc_core::{
    Bounds, CanvasGraph, FileNode, FileNodeType, FormatError, GraphFile, Node, NodeId, NodeKind,
    parse_graph_file, to_canvas_json,
};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
struct ClipEntry {
    kind: NodeKind,
    /// Offset from the group's top-left corner.
    dx: f32,
    dy: f32,
    width: f32,
    height: f32,
    color_tag: Option<String>,
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entries: Vec<ClipEntry>,
    group_width: f32,
    group_height: f32,
    /// Pastes since the last copy; each one shifts further.
    pastes: u32,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Replace the clipboard with the selected nodes. Returns how many were copied.
    pub fn copy(&mut self, graph: &CanvasGraph) -> usize {
        let nodes: Vec<&Node> = graph
            .selected_nodes()
            .into_iter()
            .filter_map(|id| graph.node(id))
            .collect();
        if nodes.is_empty() {
            return 0;
        }
        let placed = nodes.iter().map(|n| {
            let kind = match &n.kind {
                NodeKind::Reference { path, .. } => NodeKind::reference(path.clone()),
                other => other.clone(),
            };
            (kind, n.bounds, n.color_tag.clone(), n.extra.clone())
        });
        self.fill(placed);
        log::debug!("copied {} node(s)", self.entries.len());
        self.entries.len()
    }

    /// Load a canvas-file fragment, typically from the system clipboard.
    /// Its connections are ignored.
    pub fn from_json(input: &str) -> Result<Self, FormatError> {
        let decoded = parse_graph_file(input)?;
        let placed = decoded.file.nodes.into_iter().filter_map(|n| {
            let bounds = Bounds::from_file([n.x, n.y, n.width, n.height]);
            if !bounds.is_finite() {
                return None;
            }
            let kind = match n.kind {
                FileNodeType::Text => NodeKind::content(n.text.unwrap_or_default()),
                FileNodeType::File => NodeKind::reference(n.file.filter(|p| !p.is_empty())?),
            };
            Some((kind, bounds, n.color, n.extra))
        });
        let mut clipboard = Self::default();
        clipboard.fill(placed);
        Ok(clipboard)
    }

    /// The copied nodes as a canvas-file fragment.
    pub fn to_json(&self) -> String {
        let nodes = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let (kind, text, file) = match &e.kind {
                    NodeKind::Content { text } => (FileNodeType::Text, Some(text.clone()), None),
                    NodeKind::Reference { path, .. } => (FileNodeType::File, None, Some(path.clone())),
                };
                FileNode {
                    id: format!("clip-{}", i + 1),
                    kind,
                    text,
                    file,
                    x: f64::from(e.dx),
                    y: f64::from(e.dy),
                    width: f64::from(e.width),
                    height: f64::from(e.height),
                    color: e.color_tag.clone(),
                    extra: e.extra.clone(),
                }
            })
            .collect();
        to_canvas_json(&GraphFile {
            nodes,
            ..GraphFile::default()
        })
    }

    /// Insert the group centred on `center` (graph space), shifted by
    /// `offset` once per paste so repeated pastes cascade. Every pasted
    /// node gets a fresh id and the pasted nodes become the selection.
    pub fn paste(&mut self, graph: &mut CanvasGraph, center: (f32, f32), offset: f32) -> Vec<NodeId> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        self.pastes += 1;
        let shift = offset * self.pastes as f32;
        let origin_x = center.0 - self.group_width / 2.0 + shift;
        let origin_y = center.1 - self.group_height / 2.0 + shift;

        let ids: Vec<NodeId> = self
            .entries
            .iter()
            .map(|e| {
                let bounds = Bounds::new(origin_x + e.dx, origin_y + e.dy, e.width, e.height);
                let mut node = Node::new(NodeId::intern(""), e.kind.clone(), bounds);
                node.set_color_tag(e.color_tag.clone());
                node.extra = e.extra.clone();
                graph.insert_node(node)
            })
            .collect();
        graph.select_multiple(&ids);
        log::debug!("pasted {} node(s), cascade {}", ids.len(), self.pastes);
        ids
    }

    fn fill(&mut self, placed: impl Iterator<Item = (NodeKind, Bounds, Option<String>, Map<String, Value>)>) {
        let placed: Vec<_> = placed.collect();
        let min_x = placed.iter().map(|p| p.1.x).fold(f32::INFINITY, f32::min);
        let min_y = placed.iter().map(|p| p.1.y).fold(f32::INFINITY, f32::min);
        let max_x = placed.iter().map(|p| p.1.right()).fold(f32::NEG_INFINITY, f32::max);
        let max_y = placed.iter().map(|p| p.1.bottom()).fold(f32::NEG_INFINITY, f32::max);

        self.pastes = 0;
        self.entries = placed
            .into_iter()
            .map(|(kind, b, color_tag, extra)| ClipEntry {
                kind,
                dx: b.x - min_x,
                dy: b.y - min_y,
                width: b.width,
                height: b.height,
                color_tag,
                extra,
            })
            .collect();
        (self.group_width, self.group_height) = if self.entries.is_empty() {
            (0.0, 0.0)
        } else {
            (max_x - min_x, max_y - min_y)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_nodes() -> (CanvasGraph, NodeId, NodeId) {
        let mut g = CanvasGraph::new();
        let a = g.create_node("alpha", 0.0, 0.0);
        let b = g.create_reference_node("notes/b.md", 300.0, 200.0);
        g.update_node_content(b, "loaded body");
        g.create_connection(a, b, None, None);
        g.select_multiple(&[a, b]);
        (g, a, b)
    }

    #[test]
    fn paste_creates_fresh_ids_and_selects_them() {
        let (mut g, a, b) = two_nodes();
        let mut clip = Clipboard::default();
        assert_eq!(clip.copy(&g), 2);

        let pasted = clip.paste(&mut g, (1000.0, 1000.0), 24.0);
        assert_eq!(pasted.len(), 2);
        assert!(!pasted.contains(&a) && !pasted.contains(&b));
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 1, "connections are not copied");
        assert_eq!(g.selected_nodes(), pasted);

        // group is 700x500, centred on (1000, 1000) and shifted once
        let first = g.node(pasted[0]).unwrap();
        assert_eq!((first.bounds.x, first.bounds.y), (674.0, 774.0));
        let second = g.node(pasted[1]).unwrap();
        assert_eq!((second.bounds.x, second.bounds.y), (974.0, 974.0));
        assert!(matches!(
            &second.kind,
            NodeKind::Reference { path, content } if path == "notes/b.md" && content.text().is_none()
        ));
    }

    #[test]
    fn repeated_pastes_cascade() {
        let (mut g, _, _) = two_nodes();
        let mut clip = Clipboard::default();
        clip.copy(&g);
        let first = clip.paste(&mut g, (0.0, 0.0), 24.0)[0];
        let second = clip.paste(&mut g, (0.0, 0.0), 24.0)[0];
        let (a, b) = (g.node(first).unwrap().bounds, g.node(second).unwrap().bounds);
        assert_eq!((b.x - a.x, b.y - a.y), (24.0, 24.0));
    }

    #[test]
    fn fragment_survives_the_system_clipboard() {
        let (g, _, _) = two_nodes();
        let mut clip = Clipboard::default();
        clip.copy(&g);
        let json = clip.to_json();
        assert!(json.contains("\"clip-1\""));
        assert!(json.contains("\"edges\": []"), "fragment carries no connections");

        let mut restored = Clipboard::from_json(&json).unwrap();
        assert_eq!(restored.len(), 2);
        let mut target = CanvasGraph::new();
        let ids = restored.paste(&mut target, (350.0, 250.0), 0.0);
        let b = target.node(ids[1]).unwrap();
        assert_eq!((b.bounds.x, b.bounds.y), (300.0, 200.0));
    }

    #[test]
    fn empty_selection_copies_nothing() {
        let mut g = CanvasGraph::new();
        let mut clip = Clipboard::default();
        assert_eq!(clip.copy(&g), 0);
        assert!(clip.paste(&mut g, (0.0, 0.0), 24.0).is_empty());
    }

    #[test]
    fn foreign_fragment_skips_bad_entries() {
        let json = r#"{"nodes":[
            {"id":"x","type":"text","text":"kept","x":10,"y":10,"width":250,"height":120},
            {"id":"y","type":"file","x":0,"y":0,"width":400,"height":300},
            {"id":"z","type":"group","x":0,"y":0,"width":10,"height":10}
        ]}"#;
        let clip = Clipboard::from_json(json).unwrap();
        assert_eq!(clip.len(), 1);
    }
}
