//! Node text layout: styled lines → wrapped, positioned lines.
//!
//! Positions are relative to the node's top-left corner and include the
//! theme padding, so `content_height` can be compared directly with the
//! node height to derive the scroll range.

use crate::display::FontSpec;
use crate::format::{LineFormatter, LineStyle};
use crate::theme::TextMetrics;

/// Measures the advance width of a text run.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Fixed per-character advance. Good enough for headless layout and tests;
/// the browser bridge measures with the real canvas font.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasure {
    /// Advance per character as a fraction of the font size.
    pub advance: f32,
    pub monospace_advance: f32,
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self {
            advance: 0.55,
            monospace_advance: 0.6,
        }
    }
}

impl TextMeasure for ApproxMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        let factor = if font.monospace { self.monospace_advance } else { self.advance };
        let bold = if font.weight >= 600 { 1.05 } else { 1.0 };
        text.chars().count() as f32 * font.size * factor * bold
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidLine {
    pub text: String,
    pub style: LineStyle,
    pub font: FontSpec,
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LaidLine>,
    /// Total height including top and bottom padding.
    pub content_height: f32,
}

/// Quote lines are indented past the quote bar.
pub const QUOTE_INDENT: f32 = 10.0;

/// Lay out `text` for a node of the given outer width.
pub fn layout_text(
    text: &str,
    width: f32,
    formatter: &dyn LineFormatter,
    measure: &dyn TextMeasure,
    metrics: &TextMetrics,
) -> TextLayout {
    let mut layout = TextLayout::default();
    let mut y = metrics.padding;

    for (i, styled) in formatter.format(text).into_iter().enumerate() {
        let font = metrics.font_for(styled.style);
        let line_h = metrics.line_height_for(styled.style);
        let indent = if styled.style == LineStyle::Quote { QUOTE_INDENT } else { 0.0 };
        let x = metrics.padding + indent;
        let available = (width - x - metrics.padding).max(font.size);

        if matches!(styled.style, LineStyle::Heading(_)) && i > 0 {
            y += metrics.heading_gap;
        }
        if styled.style == LineStyle::Blank || styled.text.is_empty() {
            y += line_h;
            continue;
        }

        let wrapped = if styled.style == LineStyle::Code {
            wrap_chars(&styled.text, available, &font, measure)
        } else {
            wrap_words(&styled.text, available, &font, measure)
        };
        for piece in wrapped {
            layout.lines.push(LaidLine {
                text: piece,
                style: styled.style,
                font,
                x,
                y,
                height: line_h,
            });
            y += line_h;
        }
    }

    layout.content_height = y + metrics.padding;
    layout
}

/// Greedy word wrap; words wider than a line are broken by characters.
fn wrap_words(text: &str, width: f32, font: &FontSpec, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.measure(&candidate, font) <= width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure.measure(word, font) <= width {
            current = word.to_string();
        } else {
            let mut pieces = wrap_chars(word, width, font, measure);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Break an over-long word between characters. Each character is measured
/// once and advances are summed.
fn wrap_chars(text: &str, width: f32, font: &FontSpec, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let advance = measure.measure(ch.encode_utf8(&mut buf), font);
        if !current.is_empty() && current_width + advance > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(ch);
        current_width += advance;
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
