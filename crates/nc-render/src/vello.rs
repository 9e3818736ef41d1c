//! Display list → Vello scene.
//!
//! Native preview path. Text runs need a font context and are only traced.

use crate::display::{DisplayList, DrawCmd};
use ::vello::Scene;
use peniko::{Color, Fill, Mix};
use kurbo::{Affine, BezPath, Shape, Stroke};

/// Replay a display list onto a freshly-cleared `Scene`.
pub fn paint_display_list(scene: &mut Scene, list: &DisplayList) {
    let mut transforms = vec![Affine::IDENTITY];
    let mut clips = 0usize;

    for cmd in list {
        let transform = transforms.last().copied().unwrap_or(Affine::IDENTITY);
        match cmd {
            DrawCmd::Clear { color, width, height } => {
                let rect = kurbo::Rect::new(0.0, 0.0, *width, *height);
                scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(*color), None, &rect);
            }
            DrawCmd::PushTransform(affine) => transforms.push(transform * *affine),
            DrawCmd::PopTransform => {
                if transforms.len() > 1 {
                    transforms.pop();
                }
            }
            DrawCmd::PushClip(rect) => {
                scene.push_layer(Mix::Clip, 1.0, transform, rect);
                clips += 1;
            }
            DrawCmd::PopClip => {
                if clips > 0 {
                    scene.pop_layer();
                    clips -= 1;
                }
            }
            DrawCmd::FillRect { rect, color } => fill(scene, transform, rect, *color),
            DrawCmd::StrokeRect { rect, color, width, dash } => {
                stroke(scene, transform, rect, *color, *width, *dash);
            }
            DrawCmd::FillRoundedRect { rect, color } => fill(scene, transform, rect, *color),
            DrawCmd::StrokeRoundedRect { rect, color, width } => {
                stroke(scene, transform, rect, *color, *width, None);
            }
            DrawCmd::Line { from, to, color, width, dash } => {
                let line = kurbo::Line::new(*from, *to);
                stroke(scene, transform, &line, *color, *width, *dash);
            }
            DrawCmd::Polygon { points, color } => {
                let mut path = BezPath::new();
                for (i, p) in points.iter().enumerate() {
                    if i == 0 {
                        path.move_to(*p);
                    } else {
                        path.line_to(*p);
                    }
                }
                path.close_path();
                fill(scene, transform, &path, *color);
            }
            DrawCmd::Circle { circle, fill: color, stroke: outline } => {
                fill(scene, transform, circle, *color);
                if let Some((color, width)) = outline {
                    stroke(scene, transform, circle, *color, *width, None);
                }
            }
            DrawCmd::Text { origin, text, .. } => {
                log::trace!("TEXT {text:?} at ({}, {})", origin.x, origin.y);
            }
        }
    }

    for _ in 0..clips {
        scene.pop_layer();
    }
}

fn fill(scene: &mut Scene, transform: Affine, shape: &impl Shape, color: nc_core::Color) {
    scene.fill(Fill::NonZero, transform, to_peniko(color), None, shape);
}

fn stroke(
    scene: &mut Scene,
    transform: Affine,
    shape: &impl Shape,
    color: nc_core::Color,
    width: f64,
    dash: Option<[f64; 2]>,
) {
    let mut style = Stroke::new(width);
    if let Some(pattern) = dash {
        style = style.with_dashes(0.0, pattern);
    }
    scene.stroke(&style, transform, to_peniko(color), None, shape);
}

fn to_peniko(color: nc_core::Color) -> Color {
    let [r, g, b, a] = color.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}
