//! Pan/zoom transform between screen pixels and graph units.

use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;

/// `graph = (screen - offset) / scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn screen_to_graph(&self, sx: f32, sy: f32) -> (f32, f32) {
        (
            (sx - self.offset_x) / self.scale,
            (sy - self.offset_y) / self.scale,
        )
    }

    pub fn graph_to_screen(&self, gx: f32, gy: f32) -> (f32, f32) {
        (gx * self.scale + self.offset_x, gy * self.scale + self.offset_y)
    }

    /// Convert a screen-pixel length to graph units.
    pub fn screen_len(&self, px: f32) -> f32 {
        px / self.scale
    }

    /// Add a screen-space delta directly to the offset (not scaled).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Rescale around a screen point so the graph point under it stays put.
    /// Returns false when the clamped scale did not change.
    pub fn zoom_around(&mut self, new_scale: f32, px: f32, py: f32) -> bool {
        let new_scale = new_scale.clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f32::EPSILON {
            return false;
        }
        let ratio = (new_scale - self.scale) / self.scale;
        self.offset_x -= (px - self.offset_x) * ratio;
        self.offset_y -= (py - self.offset_y) * ratio;
        self.scale = new_scale;
        true
    }

    /// Graph-space rectangle visible on a surface of the given pixel size.
    pub fn visible_rect(&self, width: f32, height: f32) -> crate::geometry::Bounds {
        let (x, y) = self.screen_to_graph(0.0, 0.0);
        crate::geometry::Bounds::new(x, y, width / self.scale, height / self.scale)
    }
}
