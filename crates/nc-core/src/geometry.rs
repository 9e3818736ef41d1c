//! Graph-space geometry: node bounds, the four connection sides, and
//! the size floor every resize has to respect.

use serde::{Deserialize, Serialize};

/// Smallest width a node may have after any resize.
pub const MIN_NODE_WIDTH: f32 = 100.0;
/// Smallest height a node may have after any resize.
pub const MIN_NODE_HEIGHT: f32 = 60.0;

/// Axis-aligned rectangle in graph space, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a normalized rectangle from two arbitrary corners.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if this bounds intersects with a rectangle (AABB overlap).
    pub fn intersects_rect(&self, rx: f32, ry: f32, rw: f32, rh: f32) -> bool {
        self.x < rx + rw && self.right() > rx && self.y < ry + rh && self.bottom() > ry
    }

    /// Grow (or shrink, with a negative amount) on every side.
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Same rectangle with width/height raised to the node floor.
    pub fn floored(&self) -> Self {
        Self {
            width: self.width.max(MIN_NODE_WIDTH),
            height: self.height.max(MIN_NODE_HEIGHT),
            ..*self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Narrow canvas-file geometry `[x, y, width, height]`. Values beyond
    /// the `f32` range become infinite and fail [`Bounds::is_finite`].
    pub fn from_file(geometry: [f64; 4]) -> Self {
        let [x, y, width, height] = geometry.map(|v| v as f32);
        Self::new(x, y, width, height)
    }

    pub fn to_file(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height].map(f64::from)
    }
}

// ─── Connection sides ────────────────────────────────────────────────────

/// One of the four connection points of a node (the midpoint of an edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Graph-space position of this connection point on `b`.
    pub fn anchor(self, b: &Bounds) -> (f32, f32) {
        let (cx, cy) = b.center();
        match self {
            Side::Top => (cx, b.y),
            Side::Right => (b.right(), cy),
            Side::Bottom => (cx, b.bottom()),
            Side::Left => (b.x, cy),
        }
    }

    /// Unit vector pointing away from the node on this side.
    pub fn normal(self) -> (f32, f32) {
        match self {
            Side::Top => (0.0, -1.0),
            Side::Right => (1.0, 0.0),
            Side::Bottom => (0.0, 1.0),
            Side::Left => (-1.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Side::Top),
            "right" => Some(Side::Right),
            "bottom" => Some(Side::Bottom),
            "left" => Some(Side::Left),
            _ => None,
        }
    }
}

fn distance_sq(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// Resolve the pair of sides an edge between `from` and `to` attaches to.
///
/// Known sides are kept. A single unknown side is the one nearest to the
/// known anchor; with both unknown, the closest of all 16 pairs wins.
pub fn best_sides(
    from: &Bounds,
    to: &Bounds,
    from_side: Option<Side>,
    to_side: Option<Side>,
) -> (Side, Side) {
    let nearest = |target: &Bounds, anchor: (f32, f32)| {
        Side::ALL
            .into_iter()
            .min_by(|a, b| {
                distance_sq(a.anchor(target), anchor).total_cmp(&distance_sq(b.anchor(target), anchor))
            })
            .unwrap_or(Side::Right)
    };

    match (from_side, to_side) {
        (Some(f), Some(t)) => (f, t),
        (Some(f), None) => (f, nearest(to, f.anchor(from))),
        (None, Some(t)) => (nearest(from, t.anchor(to)), t),
        (None, None) => {
            let mut best = (Side::Right, Side::Left);
            let mut best_d = f32::INFINITY;
            for f in Side::ALL {
                for t in Side::ALL {
                    let d = distance_sq(f.anchor(from), t.anchor(to));
                    if d < best_d {
                        best_d = d;
                        best = (f, t);
                    }
                }
            }
            best
        }
    }
}
