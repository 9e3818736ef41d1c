//! Hit regions: the side table the renderer fills in during a frame and
//! the interaction controller reads on the next input event.
//!
//! Everything is stored in graph space. Queries walk the frame's draw
//! order back to front so the topmost node wins.

use nc_core::{Bounds, CanvasGraph, EdgeId, MIN_NODE_HEIGHT, MIN_NODE_WIDTH, NodeId, Side};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Resize handles ──────────────────────────────────────────────────────

/// The eight resize handles: four corners and four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::E,
        ResizeHandle::SE,
        ResizeHandle::S,
        ResizeHandle::SW,
        ResizeHandle::W,
    ];

    /// `(horizontal, vertical)` direction: -1 moves the left/top edge,
    /// +1 the right/bottom edge, 0 leaves that axis alone.
    pub fn axes(self) -> (i8, i8) {
        match self {
            ResizeHandle::N => (0, -1),
            ResizeHandle::NE => (1, -1),
            ResizeHandle::E => (1, 0),
            ResizeHandle::SE => (1, 1),
            ResizeHandle::S => (0, 1),
            ResizeHandle::SW => (-1, 1),
            ResizeHandle::W => (-1, 0),
            ResizeHandle::NW => (-1, -1),
        }
    }

    /// Graph-space center of the handle on `b`.
    pub fn position(self, b: &Bounds) -> (f32, f32) {
        let (hx, hy) = self.axes();
        let x = match hx {
            -1 => b.x,
            0 => b.x + b.width / 2.0,
            _ => b.right(),
        };
        let y = match hy {
            -1 => b.y,
            0 => b.y + b.height / 2.0,
            _ => b.bottom(),
        };
        (x, y)
    }

    /// CSS cursor name for hover feedback.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::N | ResizeHandle::S => "ns-resize",
            ResizeHandle::E | ResizeHandle::W => "ew-resize",
            ResizeHandle::NE | ResizeHandle::SW => "nesw-resize",
            ResizeHandle::NW | ResizeHandle::SE => "nwse-resize",
        }
    }

    /// Bounds after dragging this handle by `(dx, dy)` from `start`.
    ///
    /// The opposite edge or corner stays fixed and the size never drops
    /// below the node floor.
    pub fn apply(self, start: Bounds, dx: f32, dy: f32) -> Bounds {
        let (hx, hy) = self.axes();
        let mut b = start;

        match hx {
            1 => b.width = (start.width + dx).max(MIN_NODE_WIDTH),
            -1 => {
                b.width = (start.width - dx).max(MIN_NODE_WIDTH);
                b.x = start.right() - b.width;
            }
            _ => {}
        }
        match hy {
            1 => b.height = (start.height + dy).max(MIN_NODE_HEIGHT),
            -1 => {
                b.height = (start.height - dy).max(MIN_NODE_HEIGHT);
                b.y = start.bottom() - b.height;
            }
            _ => {}
        }
        b
    }
}

// ─── Scrollbar ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrollbar {
    pub track: Bounds,
    pub thumb: Bounds,
}

impl Scrollbar {
    /// Track and thumb for a node scrolled to `scroll_y`.
    pub fn layout(node: &Bounds, bar_width: f32, inset: f32, content_height: f32, scroll_y: f32) -> Self {
        let track = Bounds::new(
            node.right() - bar_width - inset,
            node.y + inset,
            bar_width,
            (node.height - inset * 2.0).max(0.0),
        );
        let max_scroll = (content_height - node.height).max(0.0);
        let ratio = if content_height > 0.0 { (node.height / content_height).min(1.0) } else { 1.0 };
        let thumb_h = (track.height * ratio).max(bar_width * 2.0).min(track.height);
        let travel = track.height - thumb_h;
        let t = if max_scroll > 0.0 { scroll_y / max_scroll } else { 0.0 };
        let thumb = Bounds::new(track.x, track.y + travel * t.clamp(0.0, 1.0), bar_width, thumb_h);
        Self { track, thumb }
    }

    /// Scroll offset for a thumb whose top sits at `thumb_top`, clamped to the track.
    pub fn scroll_for_thumb_top(&self, thumb_top: f32, max_scroll: f32) -> f32 {
        let travel = self.track.height - self.thumb.height;
        if travel <= 0.0 {
            return 0.0;
        }
        let t = ((thumb_top - self.track.y) / travel).clamp(0.0, 1.0);
        t * max_scroll
    }
}

// ─── Buttons ─────────────────────────────────────────────────────────────

/// In-node controls, handled as immediate actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeButton {
    /// Begin editing a content node.
    Edit,
    /// Open a reference node's file in the host.
    Open,
}

impl NodeButton {
    pub fn label(self) -> &'static str {
        match self {
            NodeButton::Edit => "Edit",
            NodeButton::Open => "Open",
        }
    }
}

// ─── Side table ──────────────────────────────────────────────────────────

/// Interactive regions of one node, as drawn in the last frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitRegions {
    /// Present only while the node is selected.
    pub handles: Option<[(ResizeHandle, Bounds); 8]>,
    /// Present only while the node's content overflows.
    pub scrollbar: Option<Scrollbar>,
    pub buttons: SmallVec<[(NodeButton, Bounds); 2]>,
}

/// A drawn connection segment, for picking edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub id: EdgeId,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Debug, Clone, Default)]
pub struct HitRegionCache {
    regions: HashMap<NodeId, HitRegions>,
    /// Back to front, as drawn.
    order: Vec<NodeId>,
    edges: Vec<EdgeSegment>,
}

impl HitRegionCache {
    pub fn clear(&mut self) {
        self.regions.clear();
        self.order.clear();
        self.edges.clear();
    }

    pub fn insert(&mut self, id: NodeId, regions: HitRegions) {
        if self.regions.insert(id, regions).is_none() {
            self.order.push(id);
        }
    }

    pub fn push_edge(&mut self, segment: EdgeSegment) {
        self.edges.push(segment);
    }

    pub fn get(&self, id: NodeId) -> Option<&HitRegions> {
        self.regions.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.edges.is_empty()
    }

    fn topmost(&self) -> impl Iterator<Item = (NodeId, &HitRegions)> + '_ {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.regions.get(id).map(|r| (*id, r)))
    }

    pub fn resize_handle_at(&self, x: f32, y: f32) -> Option<(NodeId, ResizeHandle)> {
        self.topmost().find_map(|(id, r)| {
            r.handles
                .as_ref()?
                .iter()
                .find(|(_, b)| b.contains(x, y))
                .map(|(h, _)| (id, *h))
        })
    }

    pub fn scrollbar_at(&self, x: f32, y: f32) -> Option<(NodeId, Scrollbar)> {
        self.topmost().find_map(|(id, r)| {
            r.scrollbar
                .filter(|s| s.track.contains(x, y))
                .map(|s| (id, s))
        })
    }

    pub fn button_at(&self, x: f32, y: f32) -> Option<(NodeId, NodeButton)> {
        self.topmost().find_map(|(id, r)| {
            r.buttons
                .iter()
                .find(|(_, b)| b.contains(x, y))
                .map(|(button, _)| (id, *button))
        })
    }

    /// Last-drawn connection within `tolerance` of the point.
    pub fn edge_at(&self, x: f32, y: f32, tolerance: f32) -> Option<EdgeId> {
        self.edges
            .iter()
            .rev()
            .find(|s| distance_to_segment((x, y), s.from, s.to) <= tolerance)
            .map(|s| s.id)
    }
}

/// Topmost node with a connection point within `radius` of the point.
pub fn connection_point_at(graph: &CanvasGraph, x: f32, y: f32, radius: f32) -> Option<(NodeId, Side)> {
    let r2 = radius * radius;
    graph.nodes().rev().filter(|n| !n.editing).find_map(|n| {
        Side::ALL.into_iter().find_map(|side| {
            let (ax, ay) = side.anchor(&n.bounds);
            let (dx, dy) = (ax - x, ay - y);
            (dx * dx + dy * dy <= r2).then_some((n.id, side))
        })
    })
}

pub fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const START: Bounds = Bounds::new(100.0, 100.0, 250.0, 120.0);

    #[test]
    fn se_handle_grows_right_and_down() {
        let b = ResizeHandle::SE.apply(START, 30.0, 10.0);
        assert_eq!(b, Bounds::new(100.0, 100.0, 280.0, 130.0));
    }

    #[test]
    fn nw_handle_keeps_bottom_right_fixed() {
        let b = ResizeHandle::NW.apply(START, 20.0, -10.0);
        assert_eq!(b, Bounds::new(120.0, 90.0, 230.0, 130.0));
        assert_eq!((b.right(), b.bottom()), (START.right(), START.bottom()));
    }

    #[test]
    fn every_handle_respects_the_floor() {
        for handle in ResizeHandle::ALL {
            for (dx, dy) in [(-1000.0, -1000.0), (1000.0, 1000.0), (-1000.0, 1000.0), (1000.0, -1000.0)] {
                let b = handle.apply(START, dx, dy);
                assert!(b.width >= MIN_NODE_WIDTH, "{handle:?} {dx},{dy}");
                assert!(b.height >= MIN_NODE_HEIGHT, "{handle:?} {dx},{dy}");
            }
        }
    }

    #[test]
    fn floored_west_resize_pins_right_edge() {
        let b = ResizeHandle::W.apply(START, 500.0, 0.0);
        assert_eq!(b.width, MIN_NODE_WIDTH);
        assert_eq!(b.right(), START.right());
        assert_eq!(b.height, START.height);
    }

    #[test]
    fn edge_handles_move_one_axis() {
        let b = ResizeHandle::N.apply(START, 40.0, -20.0);
        assert_eq!((b.x, b.width), (START.x, START.width));
        assert_eq!((b.y, b.height), (80.0, 140.0));
    }

    #[test]
    fn scrollbar_maps_thumb_linearly_and_clamps() {
        let node = Bounds::new(0.0, 0.0, 200.0, 100.0);
        let bar = Scrollbar::layout(&node, 6.0, 2.0, 400.0, 0.0);
        assert_eq!(bar.track.height, 96.0);
        assert_eq!(bar.thumb.height, 24.0);
        assert_eq!(bar.scroll_for_thumb_top(bar.track.y, 300.0), 0.0);
        assert_eq!(bar.scroll_for_thumb_top(bar.track.y + 36.0, 300.0), 150.0);
        assert_eq!(bar.scroll_for_thumb_top(9999.0, 300.0), 300.0);
        assert_eq!(bar.scroll_for_thumb_top(-9999.0, 300.0), 0.0);
    }

    #[test]
    fn topmost_region_wins() {
        let (low, high) = (NodeId::intern("low"), NodeId::intern("high"));
        let button = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut cache = HitRegionCache::default();
        for id in [low, high] {
            let mut regions = HitRegions::default();
            regions.buttons.push((NodeButton::Edit, button));
            cache.insert(id, regions);
        }
        assert_eq!(cache.button_at(5.0, 5.0), Some((high, NodeButton::Edit)));
        assert_eq!(cache.button_at(50.0, 5.0), None);
    }

    #[test]
    fn edge_pick_uses_segment_distance() {
        let mut cache = HitRegionCache::default();
        let id = EdgeId::intern("picked");
        cache.push_edge(EdgeSegment {
            id,
            from: (0.0, 0.0),
            to: (100.0, 0.0),
        });
        assert_eq!(cache.edge_at(50.0, 3.0, 4.0), Some(id));
        assert_eq!(cache.edge_at(50.0, 8.0, 4.0), None);
        assert_eq!(cache.edge_at(110.0, 0.0, 4.0), None);
    }

    #[test]
    fn connection_points_are_side_midpoints() {
        let mut g = CanvasGraph::new();
        let a = g.create_node("a", 100.0, 100.0);
        assert_eq!(connection_point_at(&g, 352.0, 161.0, 8.0), Some((a, Side::Right)));
        assert_eq!(connection_point_at(&g, 225.0, 160.0, 8.0), None);
    }
}
