//! Node and connection data model.
//!
//! A node is a rectangle in graph space holding either inline text
//! (`Content`) or a path to externally owned text (`Reference`). Edges are
//! directed and optionally anchored to one of the four node sides.

use crate::geometry::{Bounds, Side};
use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb8(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb8(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgb8(pair(0)?, pair(2)?, pair(4)?).with_alpha(pair(6)? as f32 / 255.0)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// CSS `rgba(...)` string, used by the Canvas2D backend.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {:.3})", self.a.clamp(0.0, 1.0))
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Resolve a canvas-file `color` value: a preset `"1"` to `"6"` or a hex string.
    pub fn from_canvas_color(value: &str) -> Option<Self> {
        match value {
            "1" => Some(Self::rgb8(0xE9, 0x31, 0x47)), // red
            "2" => Some(Self::rgb8(0xEC, 0x75, 0x00)), // orange
            "3" => Some(Self::rgb8(0xE0, 0xAC, 0x00)), // yellow
            "4" => Some(Self::rgb8(0x08, 0xB9, 0x4E)), // green
            "5" => Some(Self::rgb8(0x00, 0xBF, 0xBC)), // cyan
            "6" => Some(Self::rgb8(0x78, 0x52, 0xEE)), // purple
            other => Self::from_hex(other),
        }
    }
}

// ─── Node style ──────────────────────────────────────────────────────────

/// Background / text / border triple. Defaults depend on the node kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub background: Color,
    pub text: Color,
    pub border: Color,
}

impl NodeStyle {
    pub const CONTENT: NodeStyle = NodeStyle {
        background: Color::rgb8(0xFF, 0xFF, 0xFF),
        text: Color::rgb8(0x1C, 0x1C, 0x1E),
        border: Color::rgb8(0xC7, 0xC7, 0xCC),
    };

    pub const REFERENCE: NodeStyle = NodeStyle {
        background: Color::rgb8(0xF0, 0xF5, 0xFF),
        text: Color::rgb8(0x1C, 0x1C, 0x1E),
        border: Color::rgb8(0x8E, 0xA8, 0xD8),
    };

    pub fn for_kind(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Content { .. } => Self::CONTENT,
            NodeKind::Reference { .. } => Self::REFERENCE,
        }
    }
}

// ─── Node kinds ──────────────────────────────────────────────────────────

/// Load state of a reference node's external content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReferenceContent {
    #[default]
    Unloaded,
    Loading,
    Loaded(String),
    Unavailable,
}

impl ReferenceContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            ReferenceContent::Loaded(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Inline, editable text.
    Content { text: String },
    /// A path to content owned by the host, loaded lazily.
    Reference {
        path: String,
        content: ReferenceContent,
    },
}

impl NodeKind {
    pub fn content(text: impl Into<String>) -> Self {
        NodeKind::Content { text: text.into() }
    }

    pub fn reference(path: impl Into<String>) -> Self {
        NodeKind::Reference {
            path: path.into(),
            content: ReferenceContent::Unloaded,
        }
    }

    /// The text a renderer or prompt builder should see, if any.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            NodeKind::Content { text } => Some(text),
            NodeKind::Reference { content, .. } => content.text(),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, NodeKind::Reference { .. })
    }
}

/// Default node sizes per kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeDefaults {
    pub content_width: f32,
    pub content_height: f32,
    pub reference_width: f32,
    pub reference_height: f32,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            content_width: 250.0,
            content_height: 120.0,
            reference_width: 400.0,
            reference_height: 300.0,
        }
    }
}

impl NodeDefaults {
    pub fn size_for(&self, kind: &NodeKind) -> (f32, f32) {
        match kind {
            NodeKind::Content { .. } => (self.content_width, self.content_height),
            NodeKind::Reference { .. } => (self.reference_width, self.reference_height),
        }
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A positioned, sized content block.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub bounds: Bounds,

    /// Vertical content offset, kept within `[0, max_scroll]`.
    pub scroll_y: f32,
    /// Height of the laid-out content, refreshed by every render pass.
    pub content_height: f32,
    /// `max(0, content_height - bounds.height)`, refreshed with `content_height`.
    pub max_scroll: f32,

    /// An overlay editor owns the content while this is set.
    pub editing: bool,

    pub style: NodeStyle,
    /// Raw `color` value from the canvas file, re-emitted on export.
    pub color_tag: Option<String>,
    /// Which generator produced this node. Display-only.
    pub provenance: Option<String>,
    /// Unknown canvas-file fields, carried through untouched.
    pub extra: Map<String, Value>,
    /// Geometry exactly as read from the file. Exported in place of
    /// `bounds` while the node has not moved or resized.
    pub file_geometry: Option<[f64; 4]>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, bounds: Bounds) -> Self {
        let style = NodeStyle::for_kind(&kind);
        Self {
            id,
            kind,
            bounds: bounds.floored(),
            scroll_y: 0.0,
            content_height: 0.0,
            max_scroll: 0.0,
            editing: false,
            style,
            color_tag: None,
            provenance: None,
            extra: Map::new(),
            file_geometry: None,
        }
    }

    /// Geometry to write to the canvas file.
    pub fn export_geometry(&self) -> [f64; 4] {
        self.file_geometry
            .filter(|g| Bounds::from_file(*g) == self.bounds)
            .unwrap_or_else(|| self.bounds.to_file())
    }

    /// Store a new content height and re-derive the scroll range.
    pub fn set_content_height(&mut self, content_height: f32) {
        self.content_height = content_height.max(0.0);
        self.refresh_scroll_range();
    }

    /// Recompute `max_scroll` from the cached content height and clamp `scroll_y`.
    pub fn refresh_scroll_range(&mut self) {
        self.max_scroll = (self.content_height - self.bounds.height).max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll);
    }

    pub fn overflows(&self) -> bool {
        self.max_scroll > 0.0
    }

    /// Apply a canvas-file color value to the border.
    pub fn set_color_tag(&mut self, tag: Option<String>) {
        let base = NodeStyle::for_kind(&self.kind);
        self.style.border = tag
            .as_deref()
            .and_then(Color::from_canvas_color)
            .unwrap_or(base.border);
        self.color_tag = tag;
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub from_side: Option<Side>,
    pub to_side: Option<Side>,
    /// Unknown canvas-file fields, carried through untouched.
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self {
            id,
            from,
            to,
            from_side: None,
            to_side: None,
            extra: Map::new(),
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}
