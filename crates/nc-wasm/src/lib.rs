//! WASM bridge for Node Canvas: exposes the canvas engine to JavaScript.
//!
//! Built with `wasm-pack build --target web`. The page owns the `<canvas>`,
//! forwards DOM events here, and calls [`NodeCanvas::render`] from
//! `requestAnimationFrame` whenever an entry point returned `true`.

mod host;
mod render2d;

use host::JsHost;
use nc_core::NodeId;
use nc_editor::{CanvasEngine, CorrelationId, EditorConfig, InputEvent, Modifiers, PointerButton};
use render2d::{CanvasMeasure, paint_display_list};
use std::sync::Once;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

#[wasm_bindgen]
pub struct NodeCanvas {
    engine: CanvasEngine<JsHost>,
}

#[wasm_bindgen]
impl NodeCanvas {
    /// `callbacks` is an object with any of `requestContent`, `writeContent`,
    /// `persist`, `requestGeneration`, `beginTextEdit`, `openReference`,
    /// `notify` and `writeClipboard`. `config` is optional settings JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, callbacks: JsValue, config: Option<String>) -> Result<NodeCanvas, JsError> {
        init_logging();
        let config = match config.as_deref() {
            Some(json) if !json.trim().is_empty() => EditorConfig::from_json(json)?,
            _ => EditorConfig::default(),
        };
        let mut engine = CanvasEngine::new(JsHost::new(callbacks), config);
        engine.resize_surface(width as f32, height as f32);
        Ok(Self { engine })
    }

    /// Replace the graph with a canvas file. Malformed entries are skipped;
    /// only unreadable JSON fails.
    pub fn load(&mut self, json: &str) -> Result<(), JsError> {
        self.engine.load_json(json)?;
        Ok(())
    }

    pub fn export(&self) -> String {
        self.engine.export_json()
    }

    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) {
        let measure = CanvasMeasure::new(ctx);
        let list = self.engine.render(&measure);
        paint_display_list(ctx, &list);
    }

    pub fn needs_repaint(&self) -> bool {
        self.engine.repaint_pending()
    }

    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.engine.resize_surface(width as f32, height as f32)
    }

    pub fn set_theme(&mut self, is_dark: bool) -> bool {
        self.engine.set_dark_theme(is_dark)
    }

    /// CSS cursor for the current gesture or hover.
    pub fn cursor(&self) -> String {
        self.engine.cursor().to_string()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        button: i16,
        click_count: u8,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.engine.handle_input(&InputEvent::PointerDown {
            x,
            y,
            button: PointerButton::from_dom(button),
            modifiers: modifiers(shift, ctrl, alt, meta),
            click_count,
        })
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.engine.handle_input(&InputEvent::PointerMove {
            x,
            y,
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.engine.handle_input(&InputEvent::PointerUp {
            x,
            y,
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    /// Wheel and trackpad gestures. Browsers report pinch as wheel + ctrl.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_wheel(
        &mut self,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.engine.handle_input(&InputEvent::Wheel {
            x,
            y,
            dx,
            dy,
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.engine.handle_input(&InputEvent::Key {
            key: key.to_string(),
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.engine.handle_input(&InputEvent::PointerLeave)
    }

    pub fn handle_blur(&mut self) -> bool {
        self.engine.handle_input(&InputEvent::Blur)
    }

    /// Drive request timeouts; call with `performance.now()`.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.engine.tick(now_ms.max(0.0) as u64)
    }

    // ─── Host responses ──────────────────────────────────────────────────

    pub fn content_loaded(&mut self, id: f64, text: &str) -> bool {
        correlation(id).is_some_and(|id| self.engine.content_loaded(id, text))
    }

    pub fn content_unavailable(&mut self, id: f64) -> bool {
        correlation(id).is_some_and(|id| self.engine.content_unavailable(id))
    }

    /// Returns how many idea nodes were placed.
    pub fn generation_completed(&mut self, id: f64, ideas: Vec<String>) -> usize {
        correlation(id).map_or(0, |id| self.engine.generation_completed(id, &ideas).len())
    }

    pub fn generation_failed(&mut self, id: f64, message: &str) -> bool {
        correlation(id).is_some_and(|id| self.engine.generation_failed(id, message))
    }

    pub fn commit_edit(&mut self, text: &str) -> bool {
        self.engine.commit_edit(text)
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.engine.cancel_edit()
    }

    // ─── Programmatic edits ──────────────────────────────────────────────

    /// Returns the new node's id.
    pub fn create_node(&mut self, text: &str, x: f32, y: f32) -> String {
        self.engine.create_node(text, x, y).as_str().to_string()
    }

    pub fn create_reference_node(&mut self, path: &str, x: f32, y: f32) -> String {
        self.engine.create_reference_node(path, x, y).as_str().to_string()
    }

    pub fn generate_ideas(&mut self, node_id: &str) -> bool {
        self.engine.generate_ideas(NodeId::intern(node_id)).is_some()
    }

    /// Paste a canvas-file fragment read from the system clipboard.
    /// Returns how many nodes were pasted.
    pub fn paste_json(&mut self, json: &str) -> Result<usize, JsError> {
        Ok(self.engine.paste_json(json)?.len())
    }
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// Correlation ids cross the JS boundary as numbers; anything that is not
/// a non-negative integer cannot be one of ours.
fn correlation(id: f64) -> Option<CorrelationId> {
    (id.is_finite() && id >= 0.0 && id.fract() == 0.0).then(|| CorrelationId(id as u64))
}

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        #[cfg(target_arch = "wasm32")]
        {
            if console_log::init_with_level(log::Level::Info).is_err() {
                web_sys::console::warn_1(&"Node Canvas: logger already set".into());
            }
        }
    });
}
