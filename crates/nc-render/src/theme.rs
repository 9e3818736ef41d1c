//! Colors and text metrics for the scene renderer.

use crate::format::LineStyle;
use crate::display::FontSpec;
use nc_core::{Color, Node, NodeKind, NodeStyle};

/// Font sizes, line height and padding used to lay out node text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub body_size: f32,
    /// Sizes for heading levels 1 through 6.
    pub heading_sizes: [f32; 6],
    pub code_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Inner padding between the node frame and its text.
    pub padding: f32,
    /// Extra space above headings (except on the first line).
    pub heading_gap: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            body_size: 14.0,
            heading_sizes: [24.0, 20.0, 17.0, 15.0, 14.0, 13.0],
            code_size: 13.0,
            line_height: 1.4,
            padding: 12.0,
            heading_gap: 6.0,
        }
    }
}

impl TextMetrics {
    pub fn font_for(&self, style: LineStyle) -> FontSpec {
        match style {
            LineStyle::Heading(level) => {
                let i = usize::from(level.clamp(1, 6)) - 1;
                FontSpec::bold(self.heading_sizes[i])
            }
            LineStyle::Code => FontSpec {
                monospace: true,
                ..FontSpec::regular(self.code_size)
            },
            LineStyle::Quote => FontSpec {
                italic: true,
                ..FontSpec::regular(self.body_size)
            },
            _ => FontSpec::regular(self.body_size),
        }
    }

    pub fn line_height_for(&self, style: LineStyle) -> f32 {
        self.font_for(style).size * self.line_height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub grid: Color,
    pub edge: Color,
    pub edge_selected: Color,
    pub selection: Color,
    pub handle_fill: Color,
    pub connection_point: Color,
    pub preview: Color,
    pub rubber_band_fill: Color,
    pub rubber_band_stroke: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
    pub button_fill: Color,
    pub button_text: Color,
    pub caption: Color,
    pub placeholder: Color,
    pub heading_text: Color,
    pub quote_bar: Color,
    pub code_fill: Color,
    pub content_node: NodeStyle,
    pub reference_node: NodeStyle,
    pub text: TextMetrics,
}

impl Theme {
    /// Light theme: warm white canvas.
    pub fn light() -> Self {
        Self {
            background: Color::rgb8(0xF5, 0xF5, 0xF7),
            grid: Color::rgba(0.0, 0.0, 0.0, 0.05),
            edge: Color::rgb8(0x6B, 0x70, 0x80),
            edge_selected: Color::rgb8(0x4F, 0xC3, 0xF7),
            selection: Color::rgb8(0x4F, 0xC3, 0xF7),
            handle_fill: Color::rgb8(0xFF, 0xFF, 0xFF),
            connection_point: Color::rgb8(0x5E, 0x5C, 0xE6),
            preview: Color::rgb8(0x5E, 0x5C, 0xE6),
            rubber_band_fill: Color::rgb8(0x4F, 0xC3, 0xF7).with_alpha(0.08),
            rubber_band_stroke: Color::rgb8(0x4F, 0xC3, 0xF7),
            scrollbar_track: Color::rgba(0.0, 0.0, 0.0, 0.04),
            scrollbar_thumb: Color::rgba(0.0, 0.0, 0.0, 0.28),
            button_fill: Color::rgb8(0xE8, 0xE8, 0xED),
            button_text: Color::rgb8(0x1C, 0x1C, 0x1E),
            caption: Color::rgb8(0x86, 0x86, 0x8B),
            placeholder: Color::rgb8(0x86, 0x86, 0x8B),
            heading_text: Color::rgb8(0x00, 0x00, 0x00),
            quote_bar: Color::rgb8(0xC7, 0xC7, 0xCC),
            code_fill: Color::rgba(0.0, 0.0, 0.0, 0.05),
            content_node: NodeStyle::CONTENT,
            reference_node: NodeStyle::REFERENCE,
            text: TextMetrics::default(),
        }
    }

    /// Dark theme, tuned for macOS dark mode.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(0x1C, 0x1C, 0x1E),
            grid: Color::rgba(1.0, 1.0, 1.0, 0.04),
            edge: Color::rgb8(0x98, 0x98, 0x9D),
            button_fill: Color::rgb8(0x3A, 0x3A, 0x3C),
            button_text: Color::rgb8(0xF2, 0xF2, 0xF7),
            caption: Color::rgb8(0x98, 0x98, 0x9D),
            placeholder: Color::rgb8(0x98, 0x98, 0x9D),
            heading_text: Color::rgb8(0xFF, 0xFF, 0xFF),
            quote_bar: Color::rgb8(0x63, 0x63, 0x66),
            scrollbar_track: Color::rgba(1.0, 1.0, 1.0, 0.05),
            scrollbar_thumb: Color::rgba(1.0, 1.0, 1.0, 0.3),
            code_fill: Color::rgba(1.0, 1.0, 1.0, 0.06),
            content_node: NodeStyle {
                background: Color::rgb8(0x2C, 0x2C, 0x2E),
                text: Color::rgb8(0xF2, 0xF2, 0xF7),
                border: Color::rgb8(0x48, 0x48, 0x4A),
            },
            reference_node: NodeStyle {
                background: Color::rgb8(0x1F, 0x2A, 0x3C),
                text: Color::rgb8(0xF2, 0xF2, 0xF7),
                border: Color::rgb8(0x3D, 0x5A, 0x80),
            },
            ..Self::light()
        }
    }

    /// Effective colors for a node: the theme's defaults for its kind, with a
    /// tagged border kept.
    pub fn node_style(&self, node: &Node) -> NodeStyle {
        let (base, stock) = match node.kind {
            NodeKind::Content { .. } => (self.content_node, NodeStyle::CONTENT),
            NodeKind::Reference { .. } => (self.reference_node, NodeStyle::REFERENCE),
        };
        NodeStyle {
            border: if node.style.border == stock.border { base.border } else { node.style.border },
            ..base
        }
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
