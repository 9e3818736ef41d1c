//! The canvas graph: sole owner of nodes, connections, selection and viewport.
//!
//! Nodes live in a `StableDiGraph` whose edges are the connections, so
//! removing a node drops its connections in the same step. Two side
//! vectors keep what petgraph does not: the z-order of nodes (render and
//! hit-test order) and the insertion order of edges (export order).
//!
//! File entries the graph does not model (group and link nodes, and the
//! connections touching them) are held verbatim and written back on export.

use crate::error::FormatError;
use crate::format::{
    DecodedGraph, FileEdge, FileNode, FileNodeType, GraphFile, OpaqueEntry, parse_graph_file, to_canvas_json,
};
use crate::geometry::{Bounds, Side};
use crate::id::{EdgeId, IdAllocator, NodeId};
use crate::model::{Edge, Node, NodeDefaults, NodeKind, ReferenceContent};
use crate::selection::Selection;
use crate::viewport::Viewport;
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet, VecDeque};

/// Outcome of [`CanvasGraph::load_graph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes_loaded: usize,
    pub edges_loaded: usize,
    pub nodes_skipped: usize,
    pub edges_skipped: usize,
    /// Duplicate or empty ids that were replaced with fresh ones.
    pub ids_regenerated: usize,
    /// Foreign nodes, and connections touching them, kept for export only.
    pub nodes_preserved: usize,
    pub edges_preserved: usize,
}

#[derive(Debug, Clone)]
pub struct CanvasGraph {
    graph: StableDiGraph<Node, Edge>,
    node_index: HashMap<NodeId, NodeIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,
    /// Back to front. The last entry is drawn last and hit first.
    z_order: Vec<NodeId>,
    edge_order: Vec<EdgeId>,

    pub viewport: Viewport,
    selection: Selection,
    ids: IdAllocator,
    defaults: NodeDefaults,

    /// Unknown top-level file fields, re-emitted on export.
    pub extra: Map<String, Value>,
    opaque_nodes: Vec<OpaqueEntry>,
    opaque_edges: Vec<OpaqueEntry>,
    /// Ids of `opaque_nodes`, reserved against fresh ids.
    opaque_ids: HashSet<NodeId>,

    revision: u64,
    data_revision: u64,
}

impl Default for CanvasGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(NodeDefaults::default())
    }

    #[must_use]
    pub fn with_defaults(defaults: NodeDefaults) -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
            z_order: Vec::new(),
            edge_order: Vec::new(),
            viewport: Viewport::default(),
            selection: Selection::default(),
            ids: IdAllocator::default(),
            defaults,
            extra: Map::new(),
            opaque_nodes: Vec::new(),
            opaque_edges: Vec::new(),
            opaque_ids: HashSet::new(),
            revision: 0,
            data_revision: 0,
        }
    }

    // ─── Change notification ─────────────────────────────────────────────

    /// Bumped once by every successful operation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumped only when persisted data (nodes, edges, text, geometry) changes.
    pub fn data_revision(&self) -> u64 {
        self.data_revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn touch_data(&mut self) {
        self.revision += 1;
        self.data_revision += 1;
    }

    pub fn defaults(&self) -> &NodeDefaults {
        &self.defaults
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Direct mutable access. Does not bump any revision.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.node_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index
            .get(&id)
            .and_then(|idx| self.graph.edge_weight(*idx))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    /// Nodes back to front.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> + '_ {
        self.z_order.iter().filter_map(|id| self.node(*id))
    }

    /// Connections in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edge_order.iter().filter_map(|id| self.edge(*id))
    }

    /// Connections touching `id`, in insertion order.
    pub fn edges_of(&self, id: NodeId) -> Vec<EdgeId> {
        self.edges().filter(|e| e.touches(id)).map(|e| e.id).collect()
    }

    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_index.is_empty()
    }

    // ─── Creation ────────────────────────────────────────────────────────

    fn fresh_node_id(&mut self) -> NodeId {
        let (taken, reserved) = (&self.node_index, &self.opaque_ids);
        self.ids.next_node(|id| taken.contains_key(&id) || reserved.contains(&id))
    }

    fn fresh_edge_id(&mut self) -> EdgeId {
        let taken = &self.edge_index;
        self.ids.next_edge(|id| taken.contains_key(&id))
    }

    /// Create a content node with its top-left corner at `(x, y)` and the default size.
    pub fn create_node(&mut self, text: &str, x: f32, y: f32) -> NodeId {
        let kind = NodeKind::content(text);
        let (w, h) = self.defaults.size_for(&kind);
        self.add_node(kind, Bounds::new(x, y, w, h))
    }

    /// Create a reference node. Its content starts unloaded; requesting it is
    /// up to the caller.
    pub fn create_reference_node(&mut self, path: &str, x: f32, y: f32) -> NodeId {
        let kind = NodeKind::reference(path);
        let (w, h) = self.defaults.size_for(&kind);
        self.add_node(kind, Bounds::new(x, y, w, h))
    }

    pub fn add_node(&mut self, kind: NodeKind, bounds: Bounds) -> NodeId {
        let id = self.fresh_node_id();
        self.attach_node(Node::new(id, kind, bounds));
        self.touch_data();
        id
    }

    /// Insert a prepared node on top of the z-order under a fresh id.
    pub fn insert_node(&mut self, mut node: Node) -> NodeId {
        let id = self.fresh_node_id();
        node.id = id;
        node.bounds = node.bounds.floored();
        node.refresh_scroll_range();
        self.attach_node(node);
        self.touch_data();
        id
    }

    fn attach_node(&mut self, node: Node) {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        self.z_order.push(id);
    }

    /// Connect `from` → `to`. Returns `None` for a self-connection or an
    /// unknown endpoint. Parallel duplicates are allowed.
    pub fn create_connection(
        &mut self,
        from: NodeId,
        to: NodeId,
        from_side: Option<Side>,
        to_side: Option<Side>,
    ) -> Option<EdgeId> {
        if from == to {
            return None;
        }
        let (&a, &b) = (self.node_index.get(&from)?, self.node_index.get(&to)?);
        let id = self.fresh_edge_id();
        let mut edge = Edge::new(id, from, to);
        edge.from_side = from_side;
        edge.to_side = to_side;
        self.attach_edge(a, b, edge);
        self.touch_data();
        Some(id)
    }

    fn attach_edge(&mut self, a: NodeIndex, b: NodeIndex, edge: Edge) {
        let id = edge.id;
        let idx = self.graph.add_edge(a, b, edge);
        self.edge_index.insert(id, idx);
        self.edge_order.push(id);
    }

    // ─── Deletion ────────────────────────────────────────────────────────

    /// Remove a node and every connection touching it.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if self.detach_node(id) {
            self.touch_data();
            true
        } else {
            false
        }
    }

    /// Remove several nodes under a single change notification.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> usize {
        let removed = ids.iter().filter(|id| self.detach_node(**id)).count();
        if removed > 0 {
            self.touch_data();
        }
        removed
    }

    fn detach_node(&mut self, id: NodeId) -> bool {
        let Some(idx) = self.node_index.remove(&id) else {
            return false;
        };
        let incident: Vec<EdgeId> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.weight().id)
            .collect();
        for edge in incident {
            self.edge_index.remove(&edge);
            self.selection.remove_edge(edge);
        }
        self.graph.remove_node(idx);
        self.edge_order.retain(|e| self.edge_index.contains_key(e));
        self.z_order.retain(|n| *n != id);
        self.selection.remove_node(id);
        self.opaque_edges.retain(|e| {
            e.str_field("fromNode") != Some(id.as_str()) && e.str_field("toNode") != Some(id.as_str())
        });
        log::trace!("deleted node {id}");
        true
    }

    pub fn delete_connection(&mut self, id: EdgeId) -> bool {
        let Some(idx) = self.edge_index.remove(&id) else {
            return false;
        };
        self.graph.remove_edge(idx);
        self.edge_order.retain(|e| *e != id);
        self.selection.remove_edge(id);
        self.touch_data();
        true
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains_node(id)
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.selection.nodes().to_vec()
    }

    pub fn select_node(&mut self, id: NodeId) -> bool {
        if !self.contains_node(id) {
            return false;
        }
        self.selection.select_node(id);
        self.touch();
        true
    }

    pub fn toggle_selection(&mut self, id: NodeId) -> bool {
        if !self.contains_node(id) {
            return false;
        }
        self.selection.toggle_node(id);
        self.touch();
        true
    }

    pub fn add_to_selection(&mut self, id: NodeId) -> bool {
        if !self.contains_node(id) {
            return false;
        }
        self.selection.add_node(id);
        self.touch();
        true
    }

    /// Replace the selection; unknown ids are ignored.
    pub fn select_multiple(&mut self, ids: &[NodeId]) {
        let known: Vec<NodeId> = ids.iter().copied().filter(|id| self.contains_node(*id)).collect();
        self.selection.select_nodes(known);
        self.touch();
    }

    pub fn select_connection(&mut self, id: EdgeId) -> bool {
        if !self.edge_index.contains_key(&id) {
            return false;
        }
        self.selection.select_edge(id);
        self.touch();
        true
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.touch();
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_nodes(self.z_order.iter().copied());
        self.touch();
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Topmost node containing the graph-space point.
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeId> {
        self.nodes().rev().find(|n| n.bounds.contains(x, y)).map(|n| n.id)
    }

    /// Every node whose bounds intersect the rectangle, back to front.
    pub fn nodes_in_rect(&self, x: f32, y: f32, w: f32, h: f32) -> Vec<NodeId> {
        self.nodes()
            .filter(|n| n.bounds.intersects_rect(x, y, w, h))
            .map(|n| n.id)
            .collect()
    }

    /// Nodes reachable backwards over incoming connections, nearest first.
    /// The start node is excluded and every node appears once.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let Some(&start) = self.node_index.get(&id) else {
            return Vec::new();
        };
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(current) = queue.pop_front() {
            let mut incoming: Vec<_> = self
                .graph
                .edges_directed(current, Direction::Incoming)
                .map(|e| (e.id(), e.source()))
                .collect();
            incoming.sort_by_key(|(edge, _)| *edge);
            for (_, source) in incoming {
                if seen.insert(source) {
                    out.push(self.graph[source].id);
                    queue.push_back(source);
                }
            }
        }
        out
    }

    // ─── Geometry and content ────────────────────────────────────────────

    pub fn move_node(&mut self, id: NodeId, dx: f32, dy: f32) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.bounds.x += dx;
        node.bounds.y += dy;
        self.touch_data();
        true
    }

    /// Move every selected node by the same delta.
    pub fn move_selection(&mut self, dx: f32, dy: f32) -> bool {
        let ids = self.selected_nodes();
        let mut moved = false;
        for id in ids {
            if let Some(node) = self.node_mut(id) {
                node.bounds.x += dx;
                node.bounds.y += dy;
                moved = true;
            }
        }
        if moved {
            self.touch_data();
        }
        moved
    }

    /// Replace a node's bounds, raising the size to the floor.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Bounds) -> bool {
        if !bounds.is_finite() {
            return false;
        }
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.bounds = bounds.floored();
        node.refresh_scroll_range();
        self.touch_data();
        true
    }

    /// Set the vertical content offset, clamped to `[0, max_scroll]`.
    pub fn set_scroll(&mut self, id: NodeId, y: f32) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let clamped = y.clamp(0.0, node.max_scroll);
        if clamped == node.scroll_y {
            return false;
        }
        node.scroll_y = clamped;
        self.touch();
        true
    }

    pub fn scroll_by(&mut self, id: NodeId, dy: f32) -> bool {
        let Some(current) = self.node(id).map(|n| n.scroll_y) else {
            return false;
        };
        self.set_scroll(id, current + dy)
    }

    /// Replace the text of a content node, or the loaded text of a reference node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        match &mut node.kind {
            NodeKind::Content { text: current } => *current = text.to_string(),
            NodeKind::Reference { content, .. } => *content = ReferenceContent::Loaded(text.to_string()),
        }
        self.touch_data();
        true
    }

    pub fn set_editing(&mut self, id: NodeId, editing: bool) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.editing = editing;
        self.touch();
        true
    }

    pub fn set_provenance(&mut self, id: NodeId, provenance: Option<String>) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.provenance = provenance;
        self.touch();
        true
    }

    /// Store the laid-out content height. Render feedback, so no revision bump.
    pub fn set_content_metrics(&mut self, id: NodeId, content_height: f32) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.set_content_height(content_height);
                true
            }
            None => false,
        }
    }

    // ─── Reference content ───────────────────────────────────────────────

    fn set_reference_content(&mut self, id: NodeId, next: ReferenceContent) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let NodeKind::Reference { content, .. } = &mut node.kind else {
            return false;
        };
        *content = next;
        self.touch();
        true
    }

    pub fn mark_reference_loading(&mut self, id: NodeId) -> bool {
        self.set_reference_content(id, ReferenceContent::Loading)
    }

    /// Deliver loaded reference content. A stale id returns `false`.
    pub fn update_node_content(&mut self, id: NodeId, text: &str) -> bool {
        self.set_reference_content(id, ReferenceContent::Loaded(text.to_string()))
    }

    pub fn mark_reference_unavailable(&mut self, id: NodeId) -> bool {
        self.set_reference_content(id, ReferenceContent::Unavailable)
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn pan(&mut self, dx: f32, dy: f32) {
        if dx != 0.0 || dy != 0.0 {
            self.viewport.pan(dx, dy);
            self.touch();
        }
    }

    pub fn zoom_around(&mut self, scale: f32, px: f32, py: f32) -> bool {
        let changed = self.viewport.zoom_around(scale, px, py);
        if changed {
            self.touch();
        }
        changed
    }

    // ─── Load / export ───────────────────────────────────────────────────

    pub fn export_graph(&self) -> GraphFile {
        let nodes = self
            .nodes()
            .map(|n| {
                let (kind, text, file) = match &n.kind {
                    NodeKind::Content { text } => (FileNodeType::Text, Some(text.clone()), None),
                    NodeKind::Reference { path, .. } => (FileNodeType::File, None, Some(path.clone())),
                };
                let [x, y, width, height] = n.export_geometry();
                FileNode {
                    id: n.id.as_str().to_string(),
                    kind,
                    text,
                    file,
                    x,
                    y,
                    width,
                    height,
                    color: n.color_tag.clone(),
                    extra: n.extra.clone(),
                }
            })
            .collect();
        let edges = self
            .edges()
            .map(|e| FileEdge {
                id: Some(e.id.as_str().to_string()),
                from_node: e.from.as_str().to_string(),
                from_side: e.from_side,
                to_node: e.to.as_str().to_string(),
                to_side: e.to_side,
                extra: e.extra.clone(),
            })
            .collect();
        GraphFile {
            nodes,
            edges,
            opaque_nodes: self.opaque_nodes.clone(),
            opaque_edges: self.opaque_edges.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Parse and load a graph file in one step.
    pub fn load_json(&mut self, input: &str) -> Result<LoadReport, FormatError> {
        let decoded = parse_graph_file(input)?;
        Ok(self.load_decoded(decoded))
    }

    pub fn to_json(&self) -> String {
        to_canvas_json(&self.export_graph())
    }

    /// Load a decoded file, counting entries the decoder already dropped.
    pub fn load_decoded(&mut self, decoded: DecodedGraph) -> LoadReport {
        let nodes_skipped = decoded.skipped_in("nodes");
        let edges_skipped = decoded.skipped_in("edges");
        let mut report = self.load_graph(decoded.file);
        report.nodes_skipped += nodes_skipped;
        report.edges_skipped += edges_skipped;
        report
    }

    /// Replace every node and connection. The viewport is kept.
    ///
    /// Entries that cannot be placed are dropped one by one: reference nodes
    /// without a path, non-finite geometry, and connections whose endpoints
    /// are missing or identical. Duplicate ids are regenerated; connections
    /// bind to the first node bearing an id. Opaque nodes and connections
    /// that touch them are kept aside for export.
    pub fn load_graph(&mut self, file: GraphFile) -> LoadReport {
        self.graph.clear();
        self.node_index.clear();
        self.edge_index.clear();
        self.z_order.clear();
        self.edge_order.clear();
        self.selection.clear();
        self.extra = file.extra;
        self.ids = IdAllocator::default();
        self.opaque_ids = file
            .opaque_nodes
            .iter()
            .filter_map(|n| n.str_field("id"))
            .map(NodeId::intern)
            .collect();
        self.opaque_nodes = file.opaque_nodes;
        self.opaque_edges = Vec::new();

        let max_suffix = file
            .nodes
            .iter()
            .filter_map(|n| NodeId::intern(&n.id).numeric_suffix())
            .chain(self.opaque_ids.iter().filter_map(|id| id.numeric_suffix()))
            .chain(
                file.edges
                    .iter()
                    .filter_map(|e| e.id.as_deref())
                    .filter_map(|id| EdgeId::intern(id).numeric_suffix()),
            )
            .max();
        if let Some(suffix) = max_suffix {
            self.ids.advance_past(suffix);
        }

        let mut report = LoadReport {
            nodes_preserved: self.opaque_nodes.len(),
            ..LoadReport::default()
        };
        let mut by_file_id: HashMap<String, NodeId> = HashMap::new();

        for (i, entry) in file.nodes.into_iter().enumerate() {
            let geometry = [entry.x, entry.y, entry.width, entry.height];
            let bounds = Bounds::from_file(geometry);
            if !bounds.is_finite() {
                log::warn!("skipping nodes[{i}] ({}): non-finite geometry", entry.id);
                report.nodes_skipped += 1;
                continue;
            }
            let kind = match entry.kind {
                FileNodeType::Text => NodeKind::content(entry.text.unwrap_or_default()),
                FileNodeType::File => match entry.file {
                    Some(path) if !path.is_empty() => NodeKind::reference(path),
                    _ => {
                        log::warn!("skipping nodes[{i}] ({}): file node without a path", entry.id);
                        report.nodes_skipped += 1;
                        continue;
                    }
                },
            };

            let wanted = NodeId::intern(&entry.id);
            let clashes = self.node_index.contains_key(&wanted) || self.opaque_ids.contains(&wanted);
            let id = if entry.id.is_empty() || clashes {
                report.ids_regenerated += 1;
                self.fresh_node_id()
            } else {
                wanted
            };
            by_file_id.entry(entry.id).or_insert(id);

            let mut node = Node::new(id, kind, bounds);
            node.set_color_tag(entry.color);
            node.extra = entry.extra;
            node.file_geometry = Some(geometry);
            self.attach_node(node);
            report.nodes_loaded += 1;
        }

        for (i, entry) in file.edges.into_iter().enumerate() {
            if self.touches_opaque(&entry, &by_file_id) {
                match serde_json::to_value(&entry) {
                    Ok(value) => {
                        self.opaque_edges.push(OpaqueEntry {
                            position: report.edges_loaded,
                            value,
                        });
                        report.edges_preserved += 1;
                    }
                    Err(e) => {
                        log::warn!("skipping edges[{i}]: {e}");
                        report.edges_skipped += 1;
                    }
                }
                continue;
            }
            let endpoints = by_file_id
                .get(&entry.from_node)
                .copied()
                .zip(by_file_id.get(&entry.to_node).copied());
            let Some((from, to)) = endpoints else {
                log::warn!(
                    "skipping edges[{i}]: dangling endpoint {} -> {}",
                    entry.from_node,
                    entry.to_node
                );
                report.edges_skipped += 1;
                continue;
            };
            if from == to {
                log::warn!("skipping edges[{i}]: self-connection on {from}");
                report.edges_skipped += 1;
                continue;
            }

            let id = match entry.id.as_deref().filter(|s| !s.is_empty()).map(EdgeId::intern) {
                Some(id) if !self.edge_index.contains_key(&id) => id,
                Some(_) => {
                    report.ids_regenerated += 1;
                    self.fresh_edge_id()
                }
                None => self.fresh_edge_id(),
            };
            let mut edge = Edge::new(id, from, to);
            edge.from_side = entry.from_side;
            edge.to_side = entry.to_side;
            edge.extra = entry.extra;

            let (a, b) = (self.node_index[&from], self.node_index[&to]);
            self.attach_edge(a, b, edge);
            report.edges_loaded += 1;
        }

        self.touch_data();
        log::debug!(
            "loaded graph: {} nodes ({} skipped, {} kept opaque), {} edges ({} skipped, {} kept opaque), {} ids regenerated",
            report.nodes_loaded,
            report.nodes_skipped,
            report.nodes_preserved,
            report.edges_loaded,
            report.edges_skipped,
            report.edges_preserved,
            report.ids_regenerated
        );
        report
    }

    /// Both endpoints resolve, and at least one of them is an opaque node.
    fn touches_opaque(&self, edge: &FileEdge, placed: &HashMap<String, NodeId>) -> bool {
        let opaque = |name: &str| !placed.contains_key(name) && self.opaque_ids.contains(&NodeId::intern(name));
        let resolves = |name: &str| placed.contains_key(name) || opaque(name);
        resolves(&edge.from_node) && resolves(&edge.to_node) && (opaque(&edge.from_node) || opaque(&edge.to_node))
    }
}
