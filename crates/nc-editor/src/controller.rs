//! Interaction controller: input events → intents.
//!
//! A press is disambiguated in a fixed priority order, first match wins:
//!
//! | # | Target | Result |
//! |---|--------|--------|
//! | 1 | connection point, connect modifier held | `ConnectingFrom` |
//! | 2 | resize handle of a selected node | `Resizing` |
//! | 3 | scrollbar track | `ScrollbarDrag` |
//! | 4 | in-node button | immediate `BeginEdit` / `OpenReference` |
//! | 5 | node body | `PressedNode` (click selects, drag moves the selection) |
//! | 6 | empty canvas, primary button | `RubberBand` (or picks a connection line) |
//! | 7 | empty canvas with pan modifier, or middle button | `Panning` |
//!
//! Hit regions come from the last rendered frame. The controller never
//! mutates the graph: it returns [`Intent`]s for the engine to apply.

use crate::config::EditorConfig;
use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::mutation::GraphMutation;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::state::Mode;
use nc_core::{Bounds, CanvasGraph, NodeId, Side, best_sides};
use nc_render::hit::connection_point_at;
use nc_render::{ConnectionPreview, HitRegionCache, NodeButton, Overlay, Surface};

/// What the controller may read while handling one event.
pub struct InputContext<'a> {
    pub graph: &'a CanvasGraph,
    pub hits: &'a HitRegionCache,
    /// Node currently open in the host's text editor.
    pub editing: Option<NodeId>,
    pub surface: Surface,
}

/// Something the engine should do in response to input.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Mutate(GraphMutation),
    BeginEdit(NodeId),
    OpenReference(NodeId),
    Generate(NodeId),
    Copy,
    Paste,
}

impl From<GraphMutation> for Intent {
    fn from(m: GraphMutation) -> Self {
        Intent::Mutate(m)
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    mode: Mode,
    config: EditorConfig,
    hovered: Option<NodeId>,
    /// Connect modifier held during the last pointer event.
    connect_held: bool,
}

impl InteractionController {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            mode: Mode::Idle,
            config,
            hovered: None,
            connect_held: false,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode.is_idle()
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Abandon the current gesture. Geometry reached by a drag or resize
    /// stays; a pending connection or rubber band is dropped.
    pub fn cancel(&mut self) {
        let mode = std::mem::take(&mut self.mode);
        if !mode.is_idle() {
            log::debug!("{} cancelled", mode.name());
        }
    }

    /// Transient visual state for the renderer.
    pub fn overlay(&self) -> Overlay {
        let preview = match self.mode {
            Mode::ConnectingFrom { from, side, pointer } => Some(ConnectionPreview { from, side, pointer }),
            _ => None,
        };
        Overlay {
            rubber_band: self.mode.rubber_band(),
            preview,
            hovered: self.hovered,
            show_connection_points: self.connect_held,
        }
    }

    /// CSS cursor for the current gesture.
    pub fn cursor(&self) -> &'static str {
        match &self.mode {
            Mode::Idle if self.hovered.is_some() => "pointer",
            Mode::Idle | Mode::RubberBand { .. } => "default",
            Mode::ConnectingFrom { .. } => "crosshair",
            Mode::Resizing { handle, .. } => handle.cursor(),
            Mode::ScrollbarDrag { .. } => "ns-resize",
            Mode::PressedNode { dragging: true, .. } => "move",
            Mode::PressedNode { .. } => "pointer",
            Mode::Panning { .. } => "grabbing",
        }
    }

    pub fn handle(&mut self, event: &InputEvent, cx: &InputContext<'_>) -> Vec<Intent> {
        let before = self.mode.name();
        let intents = match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
                click_count,
            } => self.pointer_down((*x, *y), *button, modifiers, *click_count, cx),
            InputEvent::PointerMove { x, y, modifiers } => self.pointer_move((*x, *y), modifiers, cx),
            InputEvent::PointerUp { x, y, .. } => self.pointer_up((*x, *y), cx),
            InputEvent::Wheel {
                x,
                y,
                dx,
                dy,
                modifiers,
            } => self.wheel((*x, *y), *dx, *dy, modifiers, cx),
            InputEvent::Key { key, modifiers } => self.key(key, modifiers, cx),
            InputEvent::PointerLeave | InputEvent::Blur => {
                self.hovered = None;
                self.connect_held = false;
                self.cancel();
                Vec::new()
            }
        };
        if self.mode.name() != before {
            log::debug!("mode {before} -> {}", self.mode.name());
        }
        intents
    }

    // ─── Pointer down ────────────────────────────────────────────────────

    fn pointer_down(
        &mut self,
        screen: (f32, f32),
        button: PointerButton,
        modifiers: &Modifiers,
        click_count: u8,
        cx: &InputContext<'_>,
    ) -> Vec<Intent> {
        // A press during a gesture means its release never arrived.
        if !self.mode.is_idle() {
            self.cancel();
        }
        let vp = cx.graph.viewport;
        let (gx, gy) = vp.screen_to_graph(screen.0, screen.1);
        self.connect_held = modifiers.holds(self.config.connect_modifier);

        match button {
            PointerButton::Secondary => return Vec::new(),
            PointerButton::Middle => {
                self.mode = Mode::Panning { last: screen };
                return Vec::new();
            }
            PointerButton::Primary => {}
        }

        if self.connect_held
            && let Some((from, side)) =
                connection_point_at(cx.graph, gx, gy, vp.screen_len(self.config.connection_radius))
        {
            self.mode = Mode::ConnectingFrom {
                from,
                side,
                pointer: (gx, gy),
            };
            return Vec::new();
        }

        if let Some((node, handle)) = cx.hits.resize_handle_at(gx, gy)
            && cx.graph.is_selected(node)
            && let Some(n) = cx.graph.node(node)
        {
            self.mode = Mode::Resizing {
                node,
                handle,
                start: n.bounds,
                origin: (gx, gy),
            };
            return Vec::new();
        }

        if let Some((node, bar)) = cx.hits.scrollbar_at(gx, gy)
            && let Some(n) = cx.graph.node(node)
        {
            return self.begin_scrollbar_drag(node, bar, n.max_scroll, gy);
        }

        if let Some((node, button)) = cx.hits.button_at(gx, gy)
            && cx.graph.contains_node(node)
        {
            return vec![match button {
                NodeButton::Edit => Intent::BeginEdit(node),
                NodeButton::Open => Intent::OpenReference(node),
            }];
        }

        if let Some(node) = cx.graph.node_at(gx, gy) {
            return self.press_node(node, screen, (gx, gy), modifiers, click_count, cx);
        }

        if modifiers.holds(self.config.pan_modifier) {
            self.mode = Mode::Panning { last: screen };
            return Vec::new();
        }

        if click_count >= 2 {
            let d = cx.graph.defaults();
            return vec![
                GraphMutation::CreateNode {
                    text: String::new(),
                    x: gx - d.content_width / 2.0,
                    y: gy - d.content_height / 2.0,
                }
                .into(),
            ];
        }

        if let Some(edge) = cx.hits.edge_at(gx, gy, vp.screen_len(self.config.edge_pick_tolerance)) {
            return vec![GraphMutation::SelectConnection { id: edge }.into()];
        }

        self.mode = Mode::RubberBand {
            start: (gx, gy),
            current: (gx, gy),
            press: screen,
            extend: modifiers.extends_selection(),
        };
        Vec::new()
    }

    fn begin_scrollbar_drag(&mut self, node: NodeId, bar: nc_render::Scrollbar, max_scroll: f32, gy: f32) -> Vec<Intent> {
        let on_thumb = gy >= bar.thumb.y && gy <= bar.thumb.bottom();
        let grab = if on_thumb { gy - bar.thumb.y } else { bar.thumb.height / 2.0 };
        self.mode = Mode::ScrollbarDrag { node, bar, grab };
        if on_thumb {
            return Vec::new();
        }
        // Track click: jump so the thumb centres on the pointer.
        let y = bar.scroll_for_thumb_top(gy - grab, max_scroll);
        vec![GraphMutation::SetScroll { id: node, y }.into()]
    }

    fn press_node(
        &mut self,
        node: NodeId,
        screen: (f32, f32),
        graph_pos: (f32, f32),
        modifiers: &Modifiers,
        click_count: u8,
        cx: &InputContext<'_>,
    ) -> Vec<Intent> {
        let Some(n) = cx.graph.node(node) else {
            return Vec::new();
        };
        if n.editing || cx.editing == Some(node) {
            return Vec::new();
        }
        if click_count >= 2 {
            return vec![if n.kind.is_reference() {
                Intent::OpenReference(node)
            } else {
                Intent::BeginEdit(node)
            }];
        }

        let extend = modifiers.extends_selection();
        let newly_selected = !cx.graph.is_selected(node);
        let mut intents = Vec::new();
        if newly_selected {
            let select = if extend {
                GraphMutation::AddToSelection { id: node }
            } else {
                GraphMutation::SelectNode { id: node }
            };
            intents.push(select.into());
        }
        self.mode = Mode::PressedNode {
            node,
            press: screen,
            anchor: (graph_pos.0 - n.bounds.x, graph_pos.1 - n.bounds.y),
            extend,
            newly_selected,
            dragging: false,
        };
        intents
    }

    // ─── Pointer move ────────────────────────────────────────────────────

    fn pointer_move(&mut self, screen: (f32, f32), modifiers: &Modifiers, cx: &InputContext<'_>) -> Vec<Intent> {
        let (gx, gy) = cx.graph.viewport.screen_to_graph(screen.0, screen.1);
        self.connect_held = modifiers.holds(self.config.connect_modifier);
        let threshold = self.config.drag_threshold;

        match &mut self.mode {
            Mode::Idle => {
                self.hovered = cx.graph.node_at(gx, gy);
                Vec::new()
            }
            Mode::ConnectingFrom { pointer, .. } => {
                *pointer = (gx, gy);
                Vec::new()
            }
            Mode::Resizing {
                node,
                handle,
                start,
                origin,
            } => {
                let bounds = handle.apply(*start, gx - origin.0, gy - origin.1);
                vec![GraphMutation::SetBounds { id: *node, bounds }.into()]
            }
            Mode::ScrollbarDrag { node, bar, grab } => {
                let max_scroll = cx.graph.node(*node).map_or(0.0, |n| n.max_scroll);
                let y = bar.scroll_for_thumb_top(gy - *grab, max_scroll);
                vec![GraphMutation::SetScroll { id: *node, y }.into()]
            }
            Mode::PressedNode {
                node,
                press,
                anchor,
                dragging,
                ..
            } => {
                if !*dragging {
                    if (screen.0 - press.0).hypot(screen.1 - press.1) <= threshold {
                        return Vec::new();
                    }
                    *dragging = true;
                    log::debug!("drag started on {node}");
                }
                let Some(n) = cx.graph.node(*node) else {
                    return Vec::new();
                };
                let dx = (gx - anchor.0) - n.bounds.x;
                let dy = (gy - anchor.1) - n.bounds.y;
                vec![GraphMutation::MoveSelection { dx, dy }.into()]
            }
            Mode::RubberBand { current, .. } => {
                *current = (gx, gy);
                Vec::new()
            }
            Mode::Panning { last } => {
                let (dx, dy) = (screen.0 - last.0, screen.1 - last.1);
                *last = screen;
                vec![GraphMutation::Pan { dx, dy }.into()]
            }
        }
    }

    // ─── Pointer up ──────────────────────────────────────────────────────

    fn pointer_up(&mut self, screen: (f32, f32), cx: &InputContext<'_>) -> Vec<Intent> {
        let (gx, gy) = cx.graph.viewport.screen_to_graph(screen.0, screen.1);
        match std::mem::take(&mut self.mode) {
            Mode::ConnectingFrom { from, side, .. } => self.finish_connection(from, side, (gx, gy), cx),
            Mode::PressedNode {
                node,
                extend,
                newly_selected,
                dragging: false,
                ..
            } => {
                if newly_selected {
                    Vec::new()
                } else if extend {
                    vec![GraphMutation::ToggleSelection { id: node }.into()]
                } else if cx.graph.selection().nodes().len() > 1 {
                    vec![GraphMutation::SelectNode { id: node }.into()]
                } else {
                    Vec::new()
                }
            }
            Mode::RubberBand {
                start, press, extend, ..
            } => {
                let travelled = (screen.0 - press.0).hypot(screen.1 - press.1);
                if travelled <= self.config.drag_threshold {
                    return if extend {
                        Vec::new()
                    } else {
                        vec![GraphMutation::ClearSelection.into()]
                    };
                }
                let band = Bounds::from_corners(start.0, start.1, gx, gy);
                let ids = cx.graph.nodes_in_rect(band.x, band.y, band.width, band.height);
                log::debug!("rubber band picked {} nodes", ids.len());
                vec![GraphMutation::SelectMultiple { ids, extend }.into()]
            }
            _ => Vec::new(),
        }
    }

    fn finish_connection(&self, from: NodeId, side: Side, at: (f32, f32), cx: &InputContext<'_>) -> Vec<Intent> {
        let radius = cx.graph.viewport.screen_len(self.config.connection_radius);
        let target = connection_point_at(cx.graph, at.0, at.1, radius)
            .filter(|(node, _)| *node != from)
            .map(|(node, side)| (node, Some(side)))
            .or_else(|| cx.graph.node_at(at.0, at.1).map(|node| (node, None)))
            .filter(|(node, _)| *node != from);

        let Some((to, to_side)) = target else {
            log::debug!("connection from {from} dropped on empty canvas");
            return Vec::new();
        };
        let (Some(a), Some(b)) = (cx.graph.node(from), cx.graph.node(to)) else {
            return Vec::new();
        };
        let (from_side, to_side) = best_sides(&a.bounds, &b.bounds, Some(side), to_side);
        vec![
            GraphMutation::Connect {
                from,
                to,
                from_side: Some(from_side),
                to_side: Some(to_side),
            }
            .into(),
        ]
    }

    // ─── Wheel ───────────────────────────────────────────────────────────

    fn wheel(&mut self, at: (f32, f32), dx: f32, dy: f32, modifiers: &Modifiers, cx: &InputContext<'_>) -> Vec<Intent> {
        if dx == 0.0 && dy == 0.0 {
            return Vec::new();
        }
        let vp = cx.graph.viewport;
        let zoom_gesture = modifiers.holds(self.config.zoom_modifier);

        if !zoom_gesture && dy.abs() > dx.abs() {
            let (gx, gy) = vp.screen_to_graph(at.0, at.1);
            if let Some(node) = cx
                .graph
                .node_at(gx, gy)
                .and_then(|id| cx.graph.node(id))
                .filter(|n| n.overflows())
            {
                return vec![
                    GraphMutation::ScrollBy {
                        id: node.id,
                        dy: vp.screen_len(dy),
                    }
                    .into(),
                ];
            }
        }

        if !zoom_gesture && dx.abs() >= self.config.pan_axis_ratio * dy.abs() {
            return vec![GraphMutation::Pan { dx: -dx, dy: -dy }.into()];
        }

        let scale = vp.scale * (-dy * self.config.zoom_sensitivity).exp();
        vec![GraphMutation::Zoom { scale, x: at.0, y: at.1 }.into()]
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    fn key(&mut self, key: &str, modifiers: &Modifiers, cx: &InputContext<'_>) -> Vec<Intent> {
        // The host's text editor owns the keyboard while it is open.
        if cx.editing.is_some() {
            return Vec::new();
        }
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return Vec::new();
        };
        let single = match cx.graph.selection().nodes() {
            [id] => cx.graph.node(*id),
            _ => None,
        };
        let center = (cx.surface.width / 2.0, cx.surface.height / 2.0);
        let scale = cx.graph.viewport.scale;

        match action {
            ShortcutAction::Delete => {
                self.cancel();
                vec![GraphMutation::DeleteSelection.into()]
            }
            ShortcutAction::Cancel => {
                if self.mode.is_idle() {
                    vec![GraphMutation::ClearSelection.into()]
                } else {
                    self.cancel();
                    Vec::new()
                }
            }
            ShortcutAction::SelectAll => vec![GraphMutation::SelectAll.into()],
            ShortcutAction::Copy => vec![Intent::Copy],
            ShortcutAction::Cut => {
                self.cancel();
                vec![Intent::Copy, GraphMutation::DeleteSelection.into()]
            }
            ShortcutAction::Paste => vec![Intent::Paste],
            ShortcutAction::Edit => single
                .map(|n| {
                    if n.kind.is_reference() {
                        Intent::OpenReference(n.id)
                    } else {
                        Intent::BeginEdit(n.id)
                    }
                })
                .into_iter()
                .collect(),
            ShortcutAction::Generate => single.map(|n| Intent::Generate(n.id)).into_iter().collect(),
            ShortcutAction::ZoomIn | ShortcutAction::ZoomOut | ShortcutAction::ZoomReset => {
                let scale = match action {
                    ShortcutAction::ZoomIn => scale * self.config.zoom_step,
                    ShortcutAction::ZoomOut => scale / self.config.zoom_step,
                    _ => 1.0,
                };
                vec![
                    GraphMutation::Zoom {
                        scale,
                        x: center.0,
                        y: center.1,
                    }
                    .into(),
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_render::{ApproxMeasure, ResizeHandle, SceneRenderer};
    use pretty_assertions::assert_eq;

    const SURFACE: Surface = Surface::new(1200.0, 800.0);

    struct Rig {
        graph: CanvasGraph,
        renderer: SceneRenderer,
        controller: InteractionController,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                graph: CanvasGraph::new(),
                renderer: SceneRenderer::default(),
                controller: InteractionController::new(EditorConfig::default()),
            }
        }

        fn frame(&mut self) {
            self.renderer
                .render(&mut self.graph, &self.controller.overlay(), SURFACE, &ApproxMeasure::default());
        }

        /// Render, feed one event, apply its mutations.
        fn send(&mut self, event: InputEvent) -> Vec<Intent> {
            self.frame();
            let cx = InputContext {
                graph: &self.graph,
                hits: self.renderer.hits(),
                editing: None,
                surface: SURFACE,
            };
            let intents = self.controller.handle(&event, &cx);
            for intent in &intents {
                if let Intent::Mutate(m) = intent {
                    m.clone().apply(&mut self.graph);
                }
            }
            intents
        }
    }

    #[test]
    fn connection_point_beats_resize_handle() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        rig.graph.select_node(a);
        // Right-edge midpoint: both the E handle and the right connection point.
        rig.send(InputEvent::down_with(350.0, 160.0, Modifiers::SHIFT));
        assert!(matches!(
            rig.controller.mode(),
            Mode::ConnectingFrom { side: Side::Right, .. }
        ));

        rig.send(InputEvent::up(350.0, 160.0));
        rig.send(InputEvent::down(350.0, 160.0));
        assert!(matches!(
            rig.controller.mode(),
            Mode::Resizing {
                handle: ResizeHandle::E,
                ..
            }
        ));
    }

    #[test]
    fn click_without_movement_only_selects() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        rig.send(InputEvent::down(200.0, 150.0));
        rig.send(InputEvent::moved(201.0, 151.0));
        rig.send(InputEvent::up(201.0, 151.0));
        assert_eq!(rig.graph.node(a).unwrap().bounds.x, 100.0);
        assert_eq!(rig.graph.selected_nodes(), vec![a]);
    }

    #[test]
    fn modifier_click_toggles_selected_node() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        let b = rig.graph.create_node("b", 500.0, 100.0);
        rig.graph.select_multiple(&[a, b]);
        rig.send(InputEvent::down_with(200.0, 150.0, Modifiers::CTRL));
        rig.send(InputEvent::up(200.0, 150.0));
        assert_eq!(rig.graph.selected_nodes(), vec![b]);
    }

    #[test]
    fn modifier_click_adds_unselected_node_once() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        let b = rig.graph.create_node("b", 500.0, 100.0);
        rig.graph.select_node(b);
        rig.send(InputEvent::down_with(200.0, 150.0, Modifiers::CTRL));
        assert!(rig.graph.is_selected(a));
        rig.send(InputEvent::up(200.0, 150.0));
        let mut selected = rig.graph.selected_nodes();
        selected.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(selected, expected);
    }

    #[test]
    fn plain_click_narrows_multi_selection() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        let b = rig.graph.create_node("b", 500.0, 100.0);
        rig.graph.select_multiple(&[a, b]);
        rig.send(InputEvent::down(200.0, 150.0));
        rig.send(InputEvent::up(200.0, 150.0));
        assert_eq!(rig.graph.selected_nodes(), vec![a]);
    }

    #[test]
    fn connection_dropped_on_empty_canvas_creates_nothing() {
        let mut rig = Rig::new();
        rig.graph.create_node("a", 100.0, 100.0);
        rig.send(InputEvent::down_with(350.0, 160.0, Modifiers::SHIFT));
        rig.send(InputEvent::moved(700.0, 500.0));
        assert!(rig.controller.overlay().preview.is_some());
        rig.send(InputEvent::up(700.0, 500.0));
        assert_eq!(rig.graph.edge_count(), 0);
        assert!(rig.controller.is_idle());
    }

    #[test]
    fn connection_to_body_picks_nearest_target_side() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        let b = rig.graph.create_node("b", 100.0, 400.0);
        rig.send(InputEvent::down_with(225.0, 220.0, Modifiers::SHIFT));
        rig.send(InputEvent::up(200.0, 480.0));
        let edge = rig.graph.edges().next().unwrap();
        assert_eq!((edge.from, edge.to), (a, b));
        assert_eq!((edge.from_side, edge.to_side), (Some(Side::Bottom), Some(Side::Top)));
    }

    #[test]
    fn escape_drops_pending_connection() {
        let mut rig = Rig::new();
        rig.graph.create_node("a", 100.0, 100.0);
        rig.graph.create_node("b", 500.0, 100.0);
        rig.send(InputEvent::down_with(350.0, 160.0, Modifiers::SHIFT));
        rig.send(InputEvent::moved(600.0, 160.0));
        rig.send(InputEvent::key("Escape"));
        rig.send(InputEvent::up(600.0, 160.0));
        assert_eq!(rig.graph.edge_count(), 0);
    }

    #[test]
    fn rubber_band_replaces_or_extends() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        let b = rig.graph.create_node("b", 500.0, 100.0);
        let c = rig.graph.create_node("c", 100.0, 500.0);
        rig.graph.select_node(c);

        rig.send(InputEvent::down(50.0, 50.0));
        rig.send(InputEvent::moved(600.0, 150.0));
        assert_eq!(rig.controller.overlay().rubber_band, Some(Bounds::new(50.0, 50.0, 550.0, 100.0)));
        rig.send(InputEvent::up(600.0, 150.0));
        assert_eq!(rig.graph.selected_nodes(), vec![a, b]);

        rig.graph.select_node(c);
        rig.send(InputEvent::down_with(50.0, 50.0, Modifiers::SHIFT));
        rig.send(InputEvent::up(150.0, 150.0));
        assert_eq!(rig.graph.selected_nodes(), vec![c, a]);
    }

    #[test]
    fn click_on_empty_canvas_clears_selection() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        rig.graph.select_node(a);
        rig.send(InputEvent::down(900.0, 700.0));
        rig.send(InputEvent::up(900.0, 700.0));
        assert!(rig.graph.selection().is_empty());
    }

    #[test]
    fn pan_by_modifier_and_middle_button() {
        let mut rig = Rig::new();
        rig.send(InputEvent::down_with(10.0, 10.0, Modifiers::ALT));
        rig.send(InputEvent::moved(40.0, 30.0));
        rig.send(InputEvent::up(40.0, 30.0));
        assert_eq!((rig.graph.viewport.offset_x, rig.graph.viewport.offset_y), (30.0, 20.0));

        rig.graph.create_node("a", 0.0, 0.0);
        rig.send(InputEvent::PointerDown {
            x: 40.0,
            y: 30.0,
            button: PointerButton::Middle,
            modifiers: Modifiers::NONE,
            click_count: 1,
        });
        rig.send(InputEvent::moved(50.0, 30.0));
        assert_eq!(rig.graph.viewport.offset_x, 40.0);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut rig = Rig::new();
        rig.graph.create_node("a", 100.0, 100.0);
        let intents = rig.send(InputEvent::PointerDown {
            x: 200.0,
            y: 150.0,
            button: PointerButton::Secondary,
            modifiers: Modifiers::NONE,
            click_count: 1,
        });
        assert!(intents.is_empty());
        assert!(rig.controller.is_idle());
    }

    #[test]
    fn double_clicks_create_or_edit() {
        let mut rig = Rig::new();
        let created = rig.send(InputEvent::double_click(400.0, 300.0));
        assert_eq!(
            created,
            vec![Intent::Mutate(GraphMutation::CreateNode {
                text: String::new(),
                x: 275.0,
                y: 240.0,
            })]
        );
        let id = rig.graph.node_at(400.0, 300.0).unwrap();
        assert_eq!(rig.send(InputEvent::double_click(400.0, 300.0)), vec![Intent::BeginEdit(id)]);
    }

    #[test]
    fn wheel_scrolls_overflowing_node_else_zooms_or_pans() {
        let mut rig = Rig::new();
        let long = "word ".repeat(300);
        let a = rig.graph.create_node(&long, 100.0, 100.0);
        rig.frame();

        rig.send(InputEvent::wheel(200.0, 150.0, 0.0, 30.0));
        assert_eq!(rig.graph.node(a).unwrap().scroll_y, 30.0);

        rig.send(InputEvent::wheel(800.0, 600.0, 0.0, 100.0));
        assert!(rig.graph.viewport.scale < 1.0);

        let before = rig.graph.viewport;
        rig.send(InputEvent::wheel(800.0, 600.0, 20.0, 15.0));
        assert_eq!(rig.graph.viewport.offset_x, before.offset_x - 20.0);
        assert_eq!(rig.graph.viewport.offset_y, before.offset_y - 15.0);
        assert_eq!(rig.graph.viewport.scale, before.scale);
    }

    #[test]
    fn pinch_zoom_keeps_point_under_pointer() {
        let mut rig = Rig::new();
        let before = rig.graph.viewport.screen_to_graph(300.0, 200.0);
        rig.send(InputEvent::Wheel {
            x: 300.0,
            y: 200.0,
            dx: 0.0,
            dy: -200.0,
            modifiers: Modifiers::CTRL,
        });
        let vp = rig.graph.viewport;
        assert!(vp.scale > 1.0);
        let after = vp.screen_to_graph(300.0, 200.0);
        assert!((before.0 - after.0).abs() < 1e-3 && (before.1 - after.1).abs() < 1e-3);
    }

    #[test]
    fn blur_resets_any_gesture() {
        let mut rig = Rig::new();
        rig.graph.create_node("a", 100.0, 100.0);
        rig.send(InputEvent::down(200.0, 150.0));
        rig.send(InputEvent::moved(260.0, 150.0));
        assert_eq!(rig.controller.mode().name(), "dragging");
        rig.send(InputEvent::Blur);
        assert!(rig.controller.is_idle());
        // The missing release must not resume the drag.
        rig.send(InputEvent::moved(400.0, 150.0));
        assert_eq!(rig.graph.nodes().next().unwrap().bounds.x, 160.0);
    }

    #[test]
    fn keys_are_ignored_while_editing() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        rig.graph.select_node(a);
        rig.frame();
        let cx = InputContext {
            graph: &rig.graph,
            hits: rig.renderer.hits(),
            editing: Some(a),
            surface: SURFACE,
        };
        assert!(rig.controller.handle(&InputEvent::key("Delete"), &cx).is_empty());
    }

    #[test]
    fn edge_line_click_selects_connection() {
        let mut rig = Rig::new();
        let a = rig.graph.create_node("a", 100.0, 100.0);
        let b = rig.graph.create_node("b", 600.0, 100.0);
        let e = rig.graph.create_connection(a, b, Some(Side::Right), Some(Side::Left)).unwrap();
        rig.graph.select_node(a);
        rig.send(InputEvent::down(450.0, 161.0));
        assert_eq!(rig.graph.selection().edge(), Some(e));
        assert!(rig.graph.selected_nodes().is_empty());
    }
}
