//! The canvas engine: one owner for graph, controller, renderer and host.
//!
//! Every entry point runs to completion before returning. Input is turned
//! into intents by the controller and applied here synchronously, so the
//! next render and the next hit test see the same model. The one
//! asynchronous boundary is the host: requests go out with a
//! [`CorrelationId`] and their answers come back through
//! [`content_loaded`](CanvasEngine::content_loaded) and friends, where
//! anything no longer pending is ignored.

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::controller::{InputContext, Intent, InteractionController};
use crate::generation::{build_request, place_ideas};
use crate::host::{EditSession, Host, Notice};
use crate::input::InputEvent;
use crate::mutation::MutationOutcome;
use crate::pending::{CorrelationId, Pending, PendingKind, PendingRequests};
use crate::scheduler::RepaintScheduler;
use nc_core::{Bounds, CanvasGraph, FormatError, LoadReport, NodeId, NodeKind, parse_graph_file};
use nc_render::{DisplayList, SceneRenderer, Surface, TextMeasure, Theme};

pub struct CanvasEngine<H: Host> {
    graph: CanvasGraph,
    controller: InteractionController,
    renderer: SceneRenderer,
    host: H,
    pending: PendingRequests,
    repaint: RepaintScheduler,
    clipboard: Clipboard,
    config: EditorConfig,
    surface: Surface,
    /// Node whose text the host's overlay editor currently owns.
    editing: Option<NodeId>,
    now_ms: u64,
    /// `data_revision` at the last persist or load.
    saved_revision: u64,
}

impl<H: Host> CanvasEngine<H> {
    pub fn new(host: H, config: EditorConfig) -> Self {
        let graph = CanvasGraph::with_defaults(config.node_defaults);
        let mut renderer = SceneRenderer::new(Theme::for_dark_mode(config.dark_theme));
        renderer.options = config.render_options();
        Self {
            saved_revision: graph.data_revision(),
            graph,
            controller: InteractionController::new(config.clone()),
            renderer,
            host,
            pending: PendingRequests::default(),
            repaint: RepaintScheduler::default(),
            clipboard: Clipboard::default(),
            config,
            surface: Surface::new(800.0, 600.0),
            editing: None,
            now_ms: 0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn graph(&self) -> &CanvasGraph {
        &self.graph
    }

    /// Direct model access for embedders. Changes made here persist on the
    /// next idle event or [`flush`](Self::flush).
    pub fn graph_mut(&mut self) -> &mut CanvasGraph {
        &mut self.graph
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn editing(&self) -> Option<NodeId> {
        self.editing
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn cursor(&self) -> &'static str {
        self.controller.cursor()
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    pub fn repaint_pending(&self) -> bool {
        self.repaint.is_pending()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.repaint.frames()
    }

    // ─── Input and rendering ─────────────────────────────────────────────

    /// Feed one input event. Returns true when this event scheduled a new
    /// repaint; false when nothing visible changed or one is already queued.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let revision = self.graph.revision();
        let overlay = self.controller.overlay();
        let cursor = self.controller.cursor();

        let cx = InputContext {
            graph: &self.graph,
            hits: self.renderer.hits(),
            editing: self.editing,
            surface: self.surface,
        };
        let intents = self.controller.handle(event, &cx);
        for intent in intents {
            self.apply_intent(intent);
        }
        self.persist_if_idle();

        let visible = self.graph.revision() != revision
            || self.controller.overlay() != overlay
            || self.controller.cursor() != cursor;
        visible && self.repaint.request()
    }

    /// Render a frame. Also refreshes scroll ranges and the hit regions the
    /// next input event is tested against.
    pub fn render(&mut self, measure: &dyn TextMeasure) -> DisplayList {
        let overlay = self.controller.overlay();
        let list = self.renderer.render(&mut self.graph, &overlay, self.surface, measure);
        self.repaint.frame_rendered();
        list
    }

    pub fn resize_surface(&mut self, width: f32, height: f32) -> bool {
        let next = Surface::new(width.max(0.0), height.max(0.0));
        if next == self.surface {
            return false;
        }
        self.surface = next;
        self.repaint.request()
    }

    /// Advance the clock and expire overdue host requests. True when
    /// anything expired.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = now_ms;
        let expired = self.pending.expire(now_ms);
        if expired.is_empty() {
            return false;
        }
        for (id, pending) in expired {
            match pending.kind {
                PendingKind::Content { node, path } => {
                    log::warn!("content request {id} for {path} timed out");
                    self.graph.mark_reference_unavailable(node);
                }
                PendingKind::Generation { node } => {
                    log::warn!("generation request {id} for {node} timed out");
                    self.host.notify(Notice::error("Idea generation timed out"));
                }
            }
        }
        self.repaint.request();
        true
    }

    pub fn set_dark_theme(&mut self, dark: bool) -> bool {
        self.config.dark_theme = dark;
        self.renderer.theme = Theme::for_dark_mode(dark);
        self.repaint.request()
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Mutate(mutation) => {
                log::trace!("apply {mutation:?}");
                match mutation.apply(&mut self.graph) {
                    MutationOutcome::CreatedNode(id) => {
                        self.graph.select_node(id);
                        self.begin_edit(id);
                    }
                    MutationOutcome::DeletedNodes(ids) => {
                        for id in ids {
                            self.forget_node(id);
                        }
                    }
                    _ => {}
                }
            }
            Intent::BeginEdit(id) => {
                self.begin_edit(id);
            }
            Intent::OpenReference(id) => {
                if let Some(NodeKind::Reference { path, .. }) = self.graph.node(id).map(|n| &n.kind) {
                    self.host.open_reference(path);
                }
            }
            Intent::Generate(id) => {
                self.generate_ideas(id);
            }
            Intent::Copy => {
                self.copy_selection();
            }
            Intent::Paste => {
                self.paste();
            }
        }
    }

    /// Drop everything that refers to a deleted node.
    fn forget_node(&mut self, id: NodeId) {
        self.pending.cancel_node(id);
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Persist when the graph data moved and no gesture is in flight, so a
    /// drag persists once on release.
    fn persist_if_idle(&mut self) {
        if self.controller.is_idle() {
            self.flush();
        }
    }

    /// Persist now if the graph data changed since the last save.
    pub fn flush(&mut self) -> bool {
        let revision = self.graph.data_revision();
        if revision == self.saved_revision {
            return false;
        }
        self.saved_revision = revision;
        let json = self.graph.to_json();
        log::debug!("persisting graph ({} bytes)", json.len());
        self.host.persist(&json);
        true
    }

    /// Replace the graph. Pending requests are cancelled, any gesture or
    /// text edit is dropped, and every reference node's content is requested
    /// again. The viewport is kept.
    pub fn load_json(&mut self, input: &str) -> Result<LoadReport, FormatError> {
        let decoded = parse_graph_file(input)?;

        self.controller.cancel();
        self.editing = None;
        let cancelled = self.pending.cancel_all();
        if cancelled > 0 {
            log::debug!("load cancelled {cancelled} pending request(s)");
        }

        let report = self.graph.load_decoded(decoded);
        log::info!(
            "loaded {} node(s), {} connection(s); skipped {} node(s), {} connection(s)",
            report.nodes_loaded,
            report.edges_loaded,
            report.nodes_skipped,
            report.edges_skipped
        );
        let references: Vec<NodeId> = self
            .graph
            .nodes()
            .filter(|n| n.kind.is_reference())
            .map(|n| n.id)
            .collect();
        for id in references {
            self.request_content(id);
        }
        self.saved_revision = self.graph.data_revision();
        self.repaint.request();
        Ok(report)
    }

    pub fn export_json(&self) -> String {
        self.graph.to_json()
    }

    // ─── Nodes and reference content ─────────────────────────────────────

    pub fn create_node(&mut self, text: &str, x: f32, y: f32) -> NodeId {
        let id = self.graph.create_node(text, x, y);
        self.changed();
        id
    }

    /// Create a reference node and ask the host for its content.
    pub fn create_reference_node(&mut self, path: &str, x: f32, y: f32) -> NodeId {
        let id = self.graph.create_reference_node(path, x, y);
        self.request_content(id);
        self.changed();
        id
    }

    fn request_content(&mut self, node: NodeId) -> Option<CorrelationId> {
        let path = match self.graph.node(node).map(|n| &n.kind) {
            Some(NodeKind::Reference { path, .. }) => path.clone(),
            _ => return None,
        };
        self.graph.mark_reference_loading(node);
        let id = self.pending.issue(
            PendingKind::Content {
                node,
                path: path.clone(),
            },
            self.now_ms,
            self.config.request_timeout_ms,
        );
        log::debug!("requesting content {id} for {path}");
        self.host.request_content(&path, id);
        Some(id)
    }

    /// Deliver requested content. Stale responses are ignored.
    pub fn content_loaded(&mut self, id: CorrelationId, text: &str) -> bool {
        let Some(Pending {
            kind: PendingKind::Content { node, .. },
            ..
        }) = self.pending.take_if(id, is_content)
        else {
            return false;
        };
        let updated = self.graph.update_node_content(node, text);
        if updated {
            self.repaint.request();
        }
        updated
    }

    pub fn content_unavailable(&mut self, id: CorrelationId) -> bool {
        let Some(Pending {
            kind: PendingKind::Content { node, path },
            ..
        }) = self.pending.take_if(id, is_content)
        else {
            return false;
        };
        log::warn!("content for {path} is unavailable");
        let updated = self.graph.mark_reference_unavailable(node);
        if updated {
            self.repaint.request();
        }
        updated
    }

    // ─── Text editing ────────────────────────────────────────────────────

    /// Hand a node's text to the host's overlay editor. Reference nodes are
    /// editable once their content has loaded.
    pub fn begin_edit(&mut self, id: NodeId) -> bool {
        let Some(node) = self.graph.node(id) else {
            return false;
        };
        let Some(text) = node.kind.display_text().map(str::to_string) else {
            log::debug!("{id} has no editable text yet");
            return false;
        };
        let bounds = node.bounds;
        if let Some(previous) = self.editing.take() {
            if previous != id {
                self.graph.set_editing(previous, false);
            }
        }

        self.controller.cancel();
        self.graph.set_editing(id, true);
        self.editing = Some(id);

        let viewport = self.graph.viewport;
        let (sx, sy) = viewport.graph_to_screen(bounds.x, bounds.y);
        let session = EditSession {
            node: id,
            text,
            screen_bounds: Bounds::new(sx, sy, bounds.width * viewport.scale, bounds.height * viewport.scale),
            scale: viewport.scale,
        };
        self.host.begin_text_edit(&session);
        self.repaint.request();
        true
    }

    /// Store the edited text. Reference edits are written back through the
    /// host instead of into the graph file.
    pub fn commit_edit(&mut self, text: &str) -> bool {
        let Some(id) = self.editing.take() else {
            return false;
        };
        self.graph.set_editing(id, false);
        let updated = match self.graph.node(id).map(|n| &n.kind) {
            Some(NodeKind::Content { .. }) => self.graph.set_text(id, text),
            Some(NodeKind::Reference { path, .. }) => {
                let path = path.clone();
                self.host.write_content(&path, text);
                self.graph.update_node_content(id, text)
            }
            None => false,
        };
        self.changed();
        updated
    }

    pub fn cancel_edit(&mut self) -> bool {
        let Some(id) = self.editing.take() else {
            return false;
        };
        self.graph.set_editing(id, false);
        self.repaint.request();
        true
    }

    // ─── Idea generation ─────────────────────────────────────────────────

    /// Ask the host for ideas from `node` and its ancestors.
    pub fn generate_ideas(&mut self, node: NodeId) -> Option<CorrelationId> {
        let request = build_request(&self.graph, node, self.config.idea_count)?;
        if request.prompt.is_empty() {
            self.host.notify(Notice::warning("Nothing to generate from: the node is empty"));
            return None;
        }
        let id = self
            .pending
            .issue(PendingKind::Generation { node }, self.now_ms, self.config.request_timeout_ms);
        log::debug!("requesting {} idea(s) {id} from {node}", request.count);
        self.host.request_generation(id, &request);
        Some(id)
    }

    /// Place returned ideas. Nothing is created for a stale response, a
    /// vanished source or an empty result.
    pub fn generation_completed(&mut self, id: CorrelationId, ideas: &[String]) -> Vec<NodeId> {
        let Some(Pending {
            kind: PendingKind::Generation { node },
            ..
        }) = self.pending.take_if(id, is_generation)
        else {
            return Vec::new();
        };
        if !self.graph.contains_node(node) {
            log::debug!("generation source {node} is gone");
            return Vec::new();
        }
        let created = place_ideas(&mut self.graph, node, ideas, &self.config.provenance_label);
        if created.is_empty() {
            self.host.notify(Notice::warning("The generator returned no ideas"));
            return created;
        }
        self.changed();
        created
    }

    pub fn generation_failed(&mut self, id: CorrelationId, message: &str) -> bool {
        if self.pending.take_if(id, is_generation).is_none() {
            return false;
        }
        log::warn!("generation {id} failed: {message}");
        self.host.notify(Notice::error(format!("Idea generation failed: {message}")));
        true
    }

    // ─── Clipboard ───────────────────────────────────────────────────────

    /// Copy the selected nodes and offer them to the system clipboard.
    pub fn copy_selection(&mut self) -> usize {
        let copied = self.clipboard.copy(&self.graph);
        if copied > 0 {
            self.host.write_clipboard(&self.clipboard.to_json());
        }
        copied
    }

    /// Paste at the centre of the visible canvas.
    pub fn paste(&mut self) -> Vec<NodeId> {
        let (cx, cy) = (self.surface.width / 2.0, self.surface.height / 2.0);
        let center = self.graph.viewport.screen_to_graph(cx, cy);
        let ids = self.clipboard.paste(&mut self.graph, center, self.config.paste_offset);
        if ids.is_empty() {
            return ids;
        }
        for &id in &ids {
            if self.graph.node(id).is_some_and(|n| n.kind.is_reference()) {
                self.request_content(id);
            }
        }
        self.changed();
        ids
    }

    /// Paste a canvas-file fragment from the system clipboard. A fragment
    /// this engine produced keeps cascading instead of starting over.
    pub fn paste_json(&mut self, json: &str) -> Result<Vec<NodeId>, FormatError> {
        if self.clipboard.is_empty() || json != self.clipboard.to_json() {
            self.clipboard = Clipboard::from_json(json)?;
        }
        Ok(self.paste())
    }

    fn changed(&mut self) {
        self.persist_if_idle();
        self.repaint.request();
    }
}

fn is_content(kind: &PendingKind) -> bool {
    matches!(kind, PendingKind::Content { .. })
}

fn is_generation(kind: &PendingKind) -> bool {
    matches!(kind, PendingKind::Generation { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use nc_core::ReferenceContent;
    use nc_render::ApproxMeasure;
    use pretty_assertions::assert_eq;

    fn engine() -> CanvasEngine<RecordingHost> {
        CanvasEngine::new(RecordingHost::default(), EditorConfig::default())
    }

    fn content_of(engine: &CanvasEngine<RecordingHost>, id: NodeId) -> ReferenceContent {
        match &engine.graph().node(id).unwrap().kind {
            NodeKind::Reference { content, .. } => content.clone(),
            other => panic!("not a reference: {other:?}"),
        }
    }

    #[test]
    fn reference_content_arrives_by_correlation_id() {
        let mut e = engine();
        let r = e.create_reference_node("a.md", 0.0, 0.0);
        assert_eq!(content_of(&e, r), ReferenceContent::Loading);

        let (path, id) = e.host().content_requests()[0].clone();
        assert_eq!(path, "a.md");
        assert!(e.content_loaded(id, "# hello"));
        assert_eq!(content_of(&e, r), ReferenceContent::Loaded("# hello".into()));
        assert!(!e.content_loaded(id, "again"), "a second answer is stale");
    }

    #[test]
    fn empty_content_counts_as_loaded() {
        let mut e = engine();
        let r = e.create_reference_node("empty.md", 0.0, 0.0);
        let id = e.host().content_requests()[0].1;
        e.content_loaded(id, "");
        assert_eq!(content_of(&e, r), ReferenceContent::Loaded(String::new()));
    }

    #[test]
    fn content_for_a_deleted_node_is_dropped() {
        let mut e = engine();
        let r = e.create_reference_node("gone.md", 0.0, 0.0);
        let id = e.host().content_requests()[0].1;
        e.graph_mut().select_node(r);
        e.handle_input(&InputEvent::key("Delete"));

        assert_eq!(e.pending_requests(), 0);
        assert!(!e.content_loaded(id, "late"));
        assert!(e.graph().is_empty());
    }

    #[test]
    fn timeout_marks_content_unavailable() {
        let mut e = engine();
        let r = e.create_reference_node("slow.md", 0.0, 0.0);
        let id = e.host().content_requests()[0].1;
        assert!(!e.tick(9_999));
        assert!(e.tick(10_000));
        assert_eq!(content_of(&e, r), ReferenceContent::Unavailable);
        assert!(!e.content_loaded(id, "too late"));
    }

    #[test]
    fn wrong_kind_response_keeps_content_pending() {
        let mut e = engine();
        let r = e.create_reference_node("mixed.md", 0.0, 0.0);
        let id = e.host().content_requests()[0].1;

        assert!(!e.generation_failed(id, "wrong channel"));
        assert!(e.generation_completed(id, &["idea".into()]).is_empty());
        assert_eq!(e.pending_requests(), 1);
        assert_eq!(content_of(&e, r), ReferenceContent::Loading);

        assert!(e.tick(1_000_000));
        assert_eq!(content_of(&e, r), ReferenceContent::Unavailable);
    }

    #[test]
    fn create_persists_once_per_change() {
        let mut e = engine();
        e.create_node("a", 0.0, 0.0);
        assert_eq!(e.host().persisted().count(), 1);
        assert!(!e.flush(), "nothing new to save");
    }

    #[test]
    fn commit_writes_reference_edits_through_the_host() {
        let mut e = engine();
        let r = e.create_reference_node("doc.md", 0.0, 0.0);
        let id = e.host().content_requests()[0].1;
        e.content_loaded(id, "old");
        e.host_mut().clear();

        assert!(e.begin_edit(r));
        assert!(e.graph().node(r).unwrap().editing);
        assert!(e.commit_edit("new"));

        assert_eq!(
            &e.host().calls[1..],
            &[HostCall::WriteContent {
                path: "doc.md".into(),
                text: "new".into(),
            }]
        );
        assert_eq!(content_of(&e, r), ReferenceContent::Loaded("new".into()));
        assert_eq!(e.editing(), None);
    }

    #[test]
    fn edit_session_reports_screen_bounds() {
        let mut e = engine();
        let n = e.create_node("text", 100.0, 50.0);
        e.graph_mut().viewport.scale = 2.0;
        e.graph_mut().viewport.offset_x = 10.0;
        e.begin_edit(n);
        let Some(HostCall::BeginTextEdit(session)) = e.host().calls.last().cloned() else {
            panic!("no edit session");
        };
        assert_eq!(session.screen_bounds, Bounds::new(210.0, 100.0, 500.0, 240.0));
        assert_eq!(session.text, "text");
    }

    #[test]
    fn render_clears_the_repaint_request() {
        let mut e = engine();
        e.create_node("a", 0.0, 0.0);
        assert!(e.repaint_pending());
        e.render(&ApproxMeasure::default());
        assert!(!e.repaint_pending());
        assert_eq!(e.frames_rendered(), 1);
    }
}
