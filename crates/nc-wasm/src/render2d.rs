//! Canvas2D backend.
//!
//! Replays a [`DisplayList`] onto an HTML `<canvas>` through
//! `CanvasRenderingContext2d`, and measures text with the real canvas
//! font for layout.

use kurbo::{Affine, Point, Rect, RoundedRect};
use nc_core::Color;
use nc_render::{ApproxMeasure, DisplayList, DrawCmd, FontSpec, TextMeasure};
use std::cell::RefCell;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Paint one frame.
pub fn paint_display_list(ctx: &CanvasRenderingContext2d, list: &DisplayList) {
    let mut depth = 0usize;
    for cmd in list {
        match cmd {
            DrawCmd::Clear { color, width, height } => {
                ctx.save();
                ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).unwrap_or(());
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, *width, *height);
                ctx.restore();
            }
            DrawCmd::PushTransform(affine) => {
                ctx.save();
                apply_affine(ctx, affine);
                depth += 1;
            }
            DrawCmd::PushClip(rect) => {
                ctx.save();
                ctx.begin_path();
                ctx.rect(rect.x0, rect.y0, rect.width(), rect.height());
                ctx.clip();
                depth += 1;
            }
            DrawCmd::PopTransform | DrawCmd::PopClip => {
                if depth > 0 {
                    ctx.restore();
                    depth -= 1;
                }
            }
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
            DrawCmd::StrokeRect {
                rect,
                color,
                width,
                dash,
            } => {
                set_dash(ctx, dash.as_ref());
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width);
                ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
                set_dash(ctx, None);
            }
            DrawCmd::FillRoundedRect { rect, color } => {
                rounded_rect_path(ctx, rect);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCmd::StrokeRoundedRect { rect, color, width } => {
                rounded_rect_path(ctx, rect);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width);
                ctx.stroke();
            }
            DrawCmd::Line {
                from,
                to,
                color,
                width,
                dash,
            } => {
                set_dash(ctx, dash.as_ref());
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width);
                ctx.stroke();
                set_dash(ctx, None);
            }
            DrawCmd::Polygon { points, color } => {
                polygon_path(ctx, points);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCmd::Circle { circle, fill, stroke } => {
                ctx.begin_path();
                ctx.arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
                    .unwrap_or(());
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill();
                if let Some((color, width)) = stroke {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width);
                    ctx.stroke();
                }
            }
            DrawCmd::Text {
                origin,
                text,
                font,
                color,
            } => draw_text(ctx, *origin, text, font, color),
        }
    }
    // Unbalanced lists must not leak state into the next frame.
    for _ in 0..depth {
        ctx.restore();
    }
}

fn apply_affine(ctx: &CanvasRenderingContext2d, affine: &Affine) {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    ctx.transform(a, b, c, d, e, f).unwrap_or(());
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<&[f64; 2]>) {
    let pattern = js_sys::Array::new();
    if let Some([on, off]) = dash {
        pattern.push(&JsValue::from_f64(*on));
        pattern.push(&JsValue::from_f64(*off));
    }
    ctx.set_line_dash(&pattern).unwrap_or(());
}

fn draw_text(ctx: &CanvasRenderingContext2d, origin: Point, text: &str, font: &FontSpec, color: &Color) {
    ctx.set_font(&font.to_css());
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str(&color.to_css());
    ctx.fill_text(text, origin.x, origin.y).unwrap_or(());
}

fn polygon_path(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.close_path();
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, rr: &RoundedRect) {
    let Rect { x0: x, y0: y, .. } = rr.rect();
    let (w, h) = (rr.width(), rr.height());
    let r = rr.radii().top_left.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.arc_to(x + w, y, x + w, y + r, r).unwrap_or(());
    ctx.line_to(x + w, y + h - r);
    ctx.arc_to(x + w, y + h, x + w - r, y + h, r).unwrap_or(());
    ctx.line_to(x + r, y + h);
    ctx.arc_to(x, y + h, x, y + h - r, r).unwrap_or(());
    ctx.line_to(x, y + r);
    ctx.arc_to(x, y, x + r, y, r).unwrap_or(());
    ctx.close_path();
}

// ─── Text measurement ────────────────────────────────────────────────────

/// Measures with the canvas context's font engine.
pub struct CanvasMeasure<'a> {
    ctx: &'a CanvasRenderingContext2d,
    /// Last font set on the context, to skip redundant `font` writes.
    font: RefCell<String>,
    fallback: ApproxMeasure,
}

impl<'a> CanvasMeasure<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            font: RefCell::new(String::new()),
            fallback: ApproxMeasure::default(),
        }
    }
}

impl TextMeasure for CanvasMeasure<'_> {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        let css = font.to_css();
        if *self.font.borrow() != css {
            self.ctx.set_font(&css);
            *self.font.borrow_mut() = css;
        }
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(_) => self.fallback.measure(text, font),
        }
    }
}
