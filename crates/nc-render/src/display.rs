//! Backend-agnostic display list.
//!
//! The scene renderer emits a flat list of drawing commands in graph space
//! (after the initial viewport `PushTransform`). Backends replay the list
//! onto Canvas2D or Vello; tests inspect it directly.

use kurbo::{Affine, Circle, Point, Rect, RoundedRect};
use nc_core::Color;
use smallvec::SmallVec;

/// Font selection for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub weight: u16,
    pub italic: bool,
    pub monospace: bool,
}

impl FontSpec {
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: 400,
            italic: false,
            monospace: false,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            weight: 700,
            ..Self::regular(size)
        }
    }

    /// CSS `font` shorthand, e.g. `italic 700 14px Inter, system-ui, sans-serif`.
    pub fn to_css(&self) -> String {
        let family = if self.monospace {
            "ui-monospace, SFMono-Regular, Menlo, monospace"
        } else {
            "Inter, system-ui, sans-serif"
        };
        let style = if self.italic { "italic " } else { "" };
        format!("{style}{} {}px {family}", self.weight, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface (screen space).
    Clear { color: Color, width: f64, height: f64 },
    /// Multiply the current transform.
    PushTransform(Affine),
    PopTransform,
    /// Intersect the clip with a rectangle in current coordinates.
    PushClip(Rect),
    PopClip,
    FillRect { rect: Rect, color: Color },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
        dash: Option<[f64; 2]>,
    },
    FillRoundedRect { rect: RoundedRect, color: Color },
    StrokeRoundedRect { rect: RoundedRect, color: Color, width: f64 },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
        dash: Option<[f64; 2]>,
    },
    Polygon { points: SmallVec<[Point; 4]>, color: Color },
    Circle {
        circle: Circle,
        fill: Color,
        stroke: Option<(Color, f64)>,
    },
    /// Text with its top-left corner at `origin`.
    Text {
        origin: Point,
        text: String,
        font: FontSpec,
        color: Color,
    },
}

/// One frame's worth of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.commands.iter()
    }

    /// All text runs, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCmd;
    type IntoIter = std::slice::Iter<'a, DrawCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

pub(crate) fn rect_of(b: &nc_core::Bounds) -> Rect {
    Rect::new(
        b.x as f64,
        b.y as f64,
        (b.x + b.width) as f64,
        (b.y + b.height) as f64,
    )
}
