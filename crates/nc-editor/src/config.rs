//! Editor configuration.
//!
//! Passed by value into [`CanvasEngine::new`](crate::engine::CanvasEngine::new).
//! Hosts usually build it from their settings JSON; missing keys fall back
//! to the defaults below.

use crate::input::ModifierKey;
use nc_core::NodeDefaults;
use nc_render::RenderOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Screen pixels the pointer must travel before a press becomes a drag.
    pub drag_threshold: f32,
    /// Screen-pixel radius around a connection point that starts a connection.
    pub connection_radius: f32,
    /// Screen-pixel tolerance for picking a connection line.
    pub edge_pick_tolerance: f32,
    pub handle_size: f32,
    pub scrollbar_width: f32,
    /// Zoom factor per wheel pixel: `scale *= exp(-dy * zoom_sensitivity)`.
    pub zoom_sensitivity: f32,
    /// Scale multiplier for keyboard zoom in/out.
    pub zoom_step: f32,
    pub pan_modifier: ModifierKey,
    pub connect_modifier: ModifierKey,
    pub zoom_modifier: ModifierKey,
    /// A wheel gesture pans when `|dx| >= ratio * |dy|`.
    pub pan_axis_ratio: f32,
    /// Graph-unit offset applied per paste, so repeated pastes cascade.
    pub paste_offset: f32,
    pub request_timeout_ms: u64,
    /// How many ideas to ask the generator for.
    pub idea_count: usize,
    /// Provenance tag set on generated nodes.
    pub provenance_label: String,
    pub dark_theme: bool,
    pub node_defaults: NodeDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 2.0,
            connection_radius: 8.0,
            edge_pick_tolerance: 6.0,
            handle_size: 8.0,
            scrollbar_width: 6.0,
            zoom_sensitivity: 0.0015,
            zoom_step: 1.2,
            pan_modifier: ModifierKey::Alt,
            connect_modifier: ModifierKey::Shift,
            zoom_modifier: ModifierKey::Command,
            pan_axis_ratio: 0.5,
            paste_offset: 24.0,
            request_timeout_ms: 10_000,
            idea_count: 3,
            provenance_label: "generated".to_string(),
            dark_theme: false,
            node_defaults: NodeDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Parse host settings. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Renderer affordance sizes matching the hit-test settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            handle_size: self.handle_size,
            scrollbar_width: self.scrollbar_width,
            connection_point_radius: self.connection_radius.min(6.0),
            ..RenderOptions::default()
        }
    }
}
