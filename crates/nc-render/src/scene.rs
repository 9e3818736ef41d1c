//! Scene renderer: graph + transient overlay → display list.
//!
//! Each frame draws, in order: background, grid, connections, nodes
//! (frame, clipped scrolled text, scrollbar, buttons, resize handles,
//! connection points), then the overlay (connection preview, rubber band).
//!
//! The same pass writes each node's laid-out content height back into the
//! graph and rebuilds the [`HitRegionCache`], so the next input event sees
//! exactly what was drawn.

use crate::display::{DisplayList, DrawCmd, FontSpec, rect_of};
use crate::format::{LineFormatter, LineStyle, MarkerFormatter};
use crate::hit::{EdgeSegment, HitRegionCache, HitRegions, NodeButton, ResizeHandle, Scrollbar};
use crate::layout::{LaidLine, QUOTE_INDENT, TextLayout, TextMeasure, layout_text};
use crate::theme::Theme;
use kurbo::{Affine, Circle, Point, Rect};
use nc_core::{Bounds, CanvasGraph, Color, Node, NodeId, NodeKind, ReferenceContent, Side, best_sides};
use smallvec::smallvec;
use std::collections::HashMap;

/// Grid spacing in graph units.
pub const GRID_SPACING: f32 = 20.0;

/// Most grid lines drawn along one axis.
const MAX_GRID_LINES: u64 = 2_000;

/// Positions of the grid lines covering `[start, end]`, counted in `f64`
/// so far-off coordinates still advance.
fn grid_lines(start: f32, end: f32) -> impl Iterator<Item = f64> {
    let spacing = f64::from(GRID_SPACING);
    let first = (f64::from(start) / spacing).floor();
    let last = (f64::from(end) / spacing).floor();
    let count = if first.is_finite() && last.is_finite() && last >= first {
        ((last - first) as u64).saturating_add(1).min(MAX_GRID_LINES)
    } else {
        0
    };
    (0..count).map(move |i| (first + i as f64) * spacing)
}

/// Screen-pixel sizes of interactive affordances. Converted to graph units
/// with the current zoom every frame, so they stay the same size on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub handle_size: f32,
    pub scrollbar_width: f32,
    pub connection_point_radius: f32,
    pub button_width: f32,
    pub button_height: f32,
    pub arrow_size: f32,
    /// The grid is skipped when its lines would be closer than this.
    pub min_grid_px: f32,
    pub corner_radius: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            handle_size: 8.0,
            scrollbar_width: 6.0,
            connection_point_radius: 5.0,
            button_width: 44.0,
            button_height: 20.0,
            arrow_size: 10.0,
            min_grid_px: 6.0,
            corner_radius: 6.0,
        }
    }
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Live edge being drawn from a connection point to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPreview {
    pub from: NodeId,
    pub side: Side,
    /// Pointer in graph space.
    pub pointer: (f32, f32),
}

/// Transient interaction state the renderer reflects but does not own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Rubber-band rectangle in graph space.
    pub rubber_band: Option<Bounds>,
    pub preview: Option<ConnectionPreview>,
    pub hovered: Option<NodeId>,
    /// Show every node's connection points (connect modifier held).
    pub show_connection_points: bool,
}

pub struct SceneRenderer {
    pub theme: Theme,
    pub options: RenderOptions,
    formatter: Box<dyn LineFormatter>,
    hits: HitRegionCache,
}

impl std::fmt::Debug for SceneRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl SceneRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            options: RenderOptions::default(),
            formatter: Box::new(MarkerFormatter),
            hits: HitRegionCache::default(),
        }
    }

    /// Replace the text formatting collaborator.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl LineFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Hit regions from the last rendered frame.
    pub fn hits(&self) -> &HitRegionCache {
        &self.hits
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        graph: &mut CanvasGraph,
        overlay: &Overlay,
        surface: Surface,
        measure: &dyn TextMeasure,
    ) -> DisplayList {
        let mut list = DisplayList::default();
        self.hits.clear();

        let vp = graph.viewport;
        let visible = vp.visible_rect(surface.width, surface.height);
        let px = |v: f32| v / vp.scale;

        // Metrics for every node, drawn or not.
        let ids: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();
        let mut layouts: HashMap<NodeId, TextLayout> = HashMap::with_capacity(ids.len());
        for id in ids {
            let Some(node) = graph.node(id) else { continue };
            if node.editing {
                continue;
            }
            let layout = self.layout_node(node, measure);
            graph.set_content_metrics(id, layout.content_height);
            layouts.insert(id, layout);
        }

        list.push(DrawCmd::Clear {
            color: self.theme.background,
            width: surface.width as f64,
            height: surface.height as f64,
        });
        list.push(DrawCmd::PushTransform(
            Affine::translate((vp.offset_x as f64, vp.offset_y as f64)) * Affine::scale(vp.scale as f64),
        ));

        self.draw_grid(&mut list, &visible, vp.scale);
        self.draw_edges(&mut list, graph, &visible, &px);

        let margin = px(self.options.handle_size.max(self.options.connection_point_radius * 2.0));
        let culling = visible.inflate(margin);
        let (mut drawn, mut culled) = (0usize, 0usize);
        for node in graph.nodes() {
            let b = &node.bounds;
            if !b.intersects_rect(culling.x, culling.y, culling.width, culling.height) {
                culled += 1;
                continue;
            }
            drawn += 1;
            let regions = self.draw_node(&mut list, graph, node, layouts.get(&node.id), overlay, &px);
            self.hits.insert(node.id, regions);
        }

        self.draw_overlay(&mut list, graph, overlay, &px);
        list.push(DrawCmd::PopTransform);

        log::trace!(
            "frame: {} commands, {drawn} nodes drawn, {culled} culled",
            list.len()
        );
        list
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    fn layout_node(&self, node: &Node, measure: &dyn TextMeasure) -> TextLayout {
        let metrics = &self.theme.text;
        let width = node.bounds.width - self.options.scrollbar_width;
        match &node.kind {
            NodeKind::Content { text } => layout_text(text, width, self.formatter.as_ref(), measure, metrics),
            NodeKind::Reference { path, content } => {
                let body = match content {
                    ReferenceContent::Loaded(text) => text.as_str(),
                    _ => "",
                };
                let mut layout = layout_text(body, width, self.formatter.as_ref(), measure, metrics);
                // Header line with the file name, above the body.
                let header_font = FontSpec::bold(metrics.body_size);
                let header_h = metrics.body_size * metrics.line_height;
                for line in &mut layout.lines {
                    line.y += header_h;
                }
                layout.lines.insert(
                    0,
                    LaidLine {
                        text: file_name(path).to_string(),
                        style: LineStyle::Heading(6),
                        font: header_font,
                        x: metrics.padding,
                        y: metrics.padding,
                        height: header_h,
                    },
                );
                if !matches!(content, ReferenceContent::Loaded(_)) {
                    let note = if matches!(content, ReferenceContent::Unavailable) {
                        "Content unavailable"
                    } else {
                        "Loading…"
                    };
                    layout.lines.push(LaidLine {
                        text: note.to_string(),
                        style: LineStyle::Blank,
                        font: FontSpec {
                            italic: true,
                            ..FontSpec::regular(metrics.body_size)
                        },
                        x: metrics.padding,
                        y: metrics.padding + header_h,
                        height: header_h,
                    });
                    layout.content_height = metrics.padding * 2.0 + header_h * 2.0;
                } else {
                    layout.content_height += header_h;
                }
                layout
            }
        }
    }

    // ─── Background ──────────────────────────────────────────────────────

    fn draw_grid(&self, list: &mut DisplayList, visible: &Bounds, scale: f32) {
        if GRID_SPACING * scale < self.options.min_grid_px {
            return;
        }
        let width = (1.0 / scale) as f64;
        let color = self.theme.grid;
        let (top, bottom) = (visible.y as f64, visible.bottom() as f64);
        for x in grid_lines(visible.x, visible.right()) {
            list.push(DrawCmd::Line {
                from: Point::new(x, top),
                to: Point::new(x, bottom),
                color,
                width,
                dash: None,
            });
        }
        let (left, right) = (visible.x as f64, visible.right() as f64);
        for y in grid_lines(visible.y, visible.bottom()) {
            list.push(DrawCmd::Line {
                from: Point::new(left, y),
                to: Point::new(right, y),
                color,
                width,
                dash: None,
            });
        }
    }

    // ─── Connections ─────────────────────────────────────────────────────

    fn draw_edges(&mut self, list: &mut DisplayList, graph: &CanvasGraph, visible: &Bounds, px: &dyn Fn(f32) -> f32) {
        let selected = graph.selection().edge();
        for edge in graph.edges() {
            let (Some(from), Some(to)) = (graph.node(edge.from), graph.node(edge.to)) else {
                continue;
            };
            let (from_side, to_side) = best_sides(&from.bounds, &to.bounds, edge.from_side, edge.to_side);
            let start = from_side.anchor(&from.bounds);
            let end = to_side.anchor(&to.bounds);

            let span = Bounds::from_corners(start.0, start.1, end.0, end.1).inflate(px(self.options.arrow_size));
            if !span.intersects_rect(visible.x, visible.y, visible.width, visible.height) {
                continue;
            }

            let is_selected = selected == Some(edge.id);
            let color = if is_selected { self.theme.edge_selected } else { self.theme.edge };
            let width = px(if is_selected { 2.5 } else { 1.5 });
            let tip = self.draw_arrow(list, start, end, color, width as f64, px);
            self.hits.push_edge(EdgeSegment {
                id: edge.id,
                from: start,
                to: tip,
            });
        }
    }

    /// Line plus arrowhead. The tip is pulled back from `end` so it does not
    /// sit under the target's border. Returns the tip.
    fn draw_arrow(
        &self,
        list: &mut DisplayList,
        start: (f32, f32),
        end: (f32, f32),
        color: Color,
        width: f64,
        px: &dyn Fn(f32) -> f32,
    ) -> (f32, f32) {
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len < f32::EPSILON {
            return end;
        }
        let (ux, uy) = (dx / len, dy / len);
        let gap = px(2.0).min(len / 4.0);
        let size = px(self.options.arrow_size).min(len / 2.0);
        let tip = (end.0 - ux * gap, end.1 - uy * gap);
        let base = (tip.0 - ux * size, tip.1 - uy * size);
        let (nx, ny) = (-uy * size * 0.45, ux * size * 0.45);

        list.push(DrawCmd::Line {
            from: pt(start),
            to: pt(base),
            color,
            width,
            dash: None,
        });
        list.push(DrawCmd::Polygon {
            points: smallvec![pt(tip), pt((base.0 + nx, base.1 + ny)), pt((base.0 - nx, base.1 - ny))],
            color,
        });
        tip
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    fn draw_node(
        &self,
        list: &mut DisplayList,
        graph: &CanvasGraph,
        node: &Node,
        layout: Option<&TextLayout>,
        overlay: &Overlay,
        px: &dyn Fn(f32) -> f32,
    ) -> HitRegions {
        let b = node.bounds;
        let style = self.theme.node_style(node);
        let selected = graph.is_selected(node.id);
        let hovered = overlay.hovered == Some(node.id);
        let frame = rect_of(&b).to_rounded_rect(self.options.corner_radius as f64);
        let mut regions = HitRegions::default();

        list.push(DrawCmd::FillRoundedRect {
            rect: frame,
            color: style.background,
        });
        let (border, border_w) = if selected { (self.theme.selection, 2.0) } else { (style.border, 1.0) };
        list.push(DrawCmd::StrokeRoundedRect {
            rect: frame,
            color: border,
            width: px(border_w) as f64,
        });

        if !node.editing
            && let Some(layout) = layout
        {
            self.draw_text(list, node, layout, style.text);
        }

        if let Some(provenance) = &node.provenance {
            list.push(DrawCmd::Text {
                origin: Point::new(b.x as f64, (b.bottom() + px(4.0)) as f64),
                text: provenance.clone(),
                font: FontSpec::regular(px(10.0)),
                color: self.theme.caption,
            });
        }

        if node.editing {
            return regions;
        }

        if node.overflows() {
            let bar = Scrollbar::layout(
                &b,
                px(self.options.scrollbar_width),
                px(2.0),
                node.content_height,
                node.scroll_y,
            );
            let radius = px(self.options.scrollbar_width / 2.0) as f64;
            list.push(DrawCmd::FillRoundedRect {
                rect: rect_of(&bar.track).to_rounded_rect(radius),
                color: self.theme.scrollbar_track,
            });
            list.push(DrawCmd::FillRoundedRect {
                rect: rect_of(&bar.thumb).to_rounded_rect(radius),
                color: self.theme.scrollbar_thumb,
            });
            regions.scrollbar = Some(bar);
        }

        if selected || hovered {
            let button = match node.kind {
                NodeKind::Content { .. } => NodeButton::Edit,
                NodeKind::Reference { .. } => NodeButton::Open,
            };
            let (w, h) = (px(self.options.button_width), px(self.options.button_height));
            let right_pad = px(6.0) + if node.overflows() { px(self.options.scrollbar_width + 4.0) } else { 0.0 };
            let area = Bounds::new(b.right() - right_pad - w, b.y + px(6.0), w, h);
            list.push(DrawCmd::FillRoundedRect {
                rect: rect_of(&area).to_rounded_rect(px(4.0) as f64),
                color: self.theme.button_fill,
            });
            list.push(DrawCmd::Text {
                origin: Point::new((area.x + px(8.0)) as f64, (area.y + px(3.0)) as f64),
                text: button.label().to_string(),
                font: FontSpec::regular(px(11.0)),
                color: self.theme.button_text,
            });
            regions.buttons.push((button, area));
        }

        if selected {
            let size = px(self.options.handle_size);
            let handles = ResizeHandle::ALL.map(|handle| {
                let (cx, cy) = handle.position(&b);
                (handle, Bounds::new(cx - size / 2.0, cy - size / 2.0, size, size))
            });
            for (_, area) in &handles {
                list.push(DrawCmd::FillRect {
                    rect: rect_of(area),
                    color: self.theme.handle_fill,
                });
                list.push(DrawCmd::StrokeRect {
                    rect: rect_of(area),
                    color: self.theme.selection,
                    width: px(1.5) as f64,
                    dash: None,
                });
            }
            regions.handles = Some(handles);
        }

        if selected || hovered || overlay.show_connection_points {
            let r = px(self.options.connection_point_radius) as f64;
            for side in Side::ALL {
                list.push(DrawCmd::Circle {
                    circle: Circle::new(pt(side.anchor(&b)), r),
                    fill: self.theme.handle_fill,
                    stroke: Some((self.theme.connection_point, px(1.5) as f64)),
                });
            }
        }

        regions
    }

    fn draw_text(&self, list: &mut DisplayList, node: &Node, layout: &TextLayout, text_color: Color) {
        let b = node.bounds;
        list.push(DrawCmd::PushClip(rect_of(&b)));

        for line in &layout.lines {
            let top = b.y + line.y - node.scroll_y;
            if top + line.height < b.y || top > b.bottom() {
                continue;
            }
            let left = b.x + line.x;
            match line.style {
                LineStyle::Quote => list.push(DrawCmd::FillRect {
                    rect: Rect::new(
                        (left - QUOTE_INDENT) as f64,
                        top as f64,
                        (left - QUOTE_INDENT + 3.0) as f64,
                        (top + line.height) as f64,
                    ),
                    color: self.theme.quote_bar,
                }),
                LineStyle::Code => list.push(DrawCmd::FillRect {
                    rect: Rect::new(
                        (b.x + self.theme.text.padding / 2.0) as f64,
                        top as f64,
                        (b.right() - self.theme.text.padding / 2.0) as f64,
                        (top + line.height) as f64,
                    ),
                    color: self.theme.code_fill,
                }),
                _ => {}
            }
            let color = match line.style {
                LineStyle::Heading(_) => self.theme.heading_text,
                LineStyle::Blank => self.theme.placeholder,
                _ => text_color,
            };
            // Center the glyph box vertically in the line box.
            let baseline_pad = (line.height - line.font.size) / 2.0;
            list.push(DrawCmd::Text {
                origin: Point::new(left as f64, (top + baseline_pad) as f64),
                text: line.text.clone(),
                font: line.font,
                color,
            });
        }

        list.push(DrawCmd::PopClip);
    }

    // ─── Overlay ─────────────────────────────────────────────────────────

    fn draw_overlay(&self, list: &mut DisplayList, graph: &CanvasGraph, overlay: &Overlay, px: &dyn Fn(f32) -> f32) {
        if let Some(preview) = overlay.preview
            && let Some(from) = graph.node(preview.from)
        {
            let anchor = preview.side.anchor(&from.bounds);
            let dash = [px(6.0) as f64, px(4.0) as f64];
            list.push(DrawCmd::Line {
                from: pt(anchor),
                to: pt(preview.pointer),
                color: self.theme.preview,
                width: px(1.5) as f64,
                dash: Some(dash),
            });
            list.push(DrawCmd::Circle {
                circle: Circle::new(pt(preview.pointer), px(3.0) as f64),
                fill: self.theme.preview,
                stroke: None,
            });
        }

        if let Some(band) = overlay.rubber_band
            && (band.width > 0.0 || band.height > 0.0)
        {
            list.push(DrawCmd::FillRect {
                rect: rect_of(&band),
                color: self.theme.rubber_band_fill,
            });
            list.push(DrawCmd::StrokeRect {
                rect: rect_of(&band),
                color: self.theme.rubber_band_stroke,
                width: px(1.0) as f64,
                dash: Some([px(4.0) as f64, px(4.0) as f64]),
            });
        }
    }
}

fn pt(p: (f32, f32)) -> Point {
    Point::new(p.0 as f64, p.1 as f64)
}

/// Last path component, for reference node headers.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().filter(|s| !s.is_empty()).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ApproxMeasure;

    const SURFACE: Surface = Surface::new(1200.0, 800.0);

    fn render(graph: &mut CanvasGraph, overlay: &Overlay) -> (SceneRenderer, DisplayList) {
        let mut renderer = SceneRenderer::default();
        let list = renderer.render(graph, overlay, SURFACE, &ApproxMeasure::default());
        (renderer, list)
    }

    #[test]
    fn frame_is_wrapped_in_viewport_transform() {
        let mut g = CanvasGraph::new();
        g.create_node("hello", 0.0, 0.0);
        let (_, list) = render(&mut g, &Overlay::default());
        assert!(matches!(list.commands.first(), Some(DrawCmd::Clear { .. })));
        assert!(matches!(list.commands.get(1), Some(DrawCmd::PushTransform(_))));
        assert!(matches!(list.commands.last(), Some(DrawCmd::PopTransform)));
        assert!(list.texts().any(|t| t == "hello"));
    }

    #[test]
    fn handles_only_for_selected_nodes() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("a", 0.0, 0.0);
        let b = g.create_node("b", 400.0, 0.0);
        g.select_node(a);
        let (renderer, _) = render(&mut g, &Overlay::default());
        assert!(renderer.hits().get(a).and_then(|r| r.handles).is_some());
        assert!(renderer.hits().get(b).and_then(|r| r.handles).is_none());
        assert_eq!(renderer.hits().resize_handle_at(250.0, 120.0), Some((a, ResizeHandle::SE)));
    }

    #[test]
    fn overflowing_node_gets_metrics_and_scrollbar() {
        let mut g = CanvasGraph::new();
        let long = "lots of words to wrap ".repeat(40);
        let a = g.create_node(&long, 0.0, 0.0);
        let (renderer, _) = render(&mut g, &Overlay::default());
        let node = g.node(a).unwrap();
        assert!(node.content_height > node.bounds.height);
        assert_eq!(node.max_scroll, node.content_height - node.bounds.height);
        assert!(renderer.hits().scrollbar_at(node.bounds.right() - 5.0, 60.0).is_some());
    }

    #[test]
    fn offscreen_nodes_are_culled_but_measured() {
        let mut g = CanvasGraph::new();
        let far = g.create_node(&"text ".repeat(200), 10_000.0, 10_000.0);
        let (renderer, list) = render(&mut g, &Overlay::default());
        assert!(renderer.hits().get(far).is_none());
        assert!(g.node(far).unwrap().content_height > 0.0);
        assert!(!list.texts().any(|t| t.starts_with("text")));
    }

    #[test]
    fn editing_node_draws_frame_only() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("secret", 0.0, 0.0);
        g.set_editing(a, true);
        let (_, list) = render(&mut g, &Overlay::default());
        assert!(!list.texts().any(|t| t == "secret"));
    }

    #[test]
    fn reference_nodes_show_file_name_and_state() {
        let mut g = CanvasGraph::new();
        let r = g.create_reference_node("notes/deep/plan.md", 0.0, 0.0);
        g.mark_reference_unavailable(r);
        let (_, list) = render(&mut g, &Overlay::default());
        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"plan.md"));
        assert!(texts.contains(&"Content unavailable"));
    }

    #[test]
    fn edges_are_recorded_for_picking() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("a", 100.0, 100.0);
        let b = g.create_node("b", 500.0, 100.0);
        let e = g.create_connection(a, b, None, None).unwrap();
        let (renderer, list) = render(&mut g, &Overlay::default());
        assert_eq!(renderer.hits().edge_at(420.0, 161.0, 4.0), Some(e));
        assert!(list.iter().any(|c| matches!(c, DrawCmd::Polygon { .. })));
    }

    #[test]
    fn dense_grid_is_skipped() {
        let mut g = CanvasGraph::new();
        let lines = |g: &mut CanvasGraph| {
            let (_, list) = render(g, &Overlay::default());
            list.iter().filter(|c| matches!(c, DrawCmd::Line { .. })).count()
        };
        assert!(lines(&mut g) > 0);
        g.zoom_around(0.2, 0.0, 0.0);
        assert_eq!(lines(&mut g), 0);
    }

    #[test]
    fn grid_terminates_far_from_the_origin() {
        let mut g = CanvasGraph::new();
        g.viewport.offset_x = -1.0e9;
        g.viewport.offset_y = -1.0e9;
        let (_, list) = render(&mut g, &Overlay::default());
        let lines = list.iter().filter(|c| matches!(c, DrawCmd::Line { .. })).count();
        assert!(lines > 0);
        assert!(lines as u64 <= 2 * MAX_GRID_LINES);
    }

    #[test]
    fn grid_lines_are_capped() {
        assert_eq!(grid_lines(0.0, 100.0).collect::<Vec<_>>(), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(grid_lines(-1.0e30, 1.0e30).count() as u64, MAX_GRID_LINES);
        assert_eq!(grid_lines(f32::NAN, 10.0).count(), 0);
    }

    #[test]
    fn provenance_is_drawn_as_caption() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("idea", 0.0, 0.0);
        g.set_provenance(a, Some("generated".into()));
        let (_, list) = render(&mut g, &Overlay::default());
        assert!(list.texts().any(|t| t == "generated"));
    }

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(file_name("a/b/c.md"), "c.md");
        assert_eq!(file_name("c.md"), "c.md");
        assert_eq!(file_name("dir/"), "dir/");
    }
}
