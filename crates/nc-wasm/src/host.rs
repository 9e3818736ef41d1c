//! [`Host`] backed by JavaScript callbacks.
//!
//! The embedder passes one object whose methods receive the engine's
//! requests. Missing methods are skipped; a throwing callback is logged
//! and never reaches the engine.

use nc_editor::{CorrelationId, EditSession, GenerationRequest, Host, Notice};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

pub struct JsHost {
    callbacks: JsValue,
}

impl JsHost {
    pub fn new(callbacks: JsValue) -> Self {
        Self { callbacks }
    }

    fn method(&self, name: &str) -> Option<js_sys::Function> {
        js_sys::Reflect::get(&self.callbacks, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }

    fn call(&self, name: &str, args: &[JsValue]) {
        let Some(f) = self.method(name) else {
            log::trace!("host has no {name} callback");
            return;
        };
        let array: js_sys::Array = args.iter().collect();
        if let Err(e) = f.apply(&self.callbacks, &array) {
            log::warn!("host callback {name} threw: {e:?}");
        }
    }
}

/// Serialize to a plain JS object via JSON.
fn to_js<T: Serialize>(value: &T) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json) => js_sys::JSON::parse(&json).unwrap_or(JsValue::NULL),
        Err(e) => {
            log::error!("cannot serialize host payload: {e}");
            JsValue::NULL
        }
    }
}

fn id_value(id: CorrelationId) -> JsValue {
    JsValue::from_f64(id.0 as f64)
}

impl Host for JsHost {
    fn request_content(&mut self, path: &str, id: CorrelationId) {
        self.call("requestContent", &[JsValue::from_str(path), id_value(id)]);
    }

    fn write_content(&mut self, path: &str, text: &str) {
        self.call("writeContent", &[JsValue::from_str(path), JsValue::from_str(text)]);
    }

    fn persist(&mut self, json: &str) {
        self.call("persist", &[JsValue::from_str(json)]);
    }

    fn request_generation(&mut self, id: CorrelationId, request: &GenerationRequest) {
        self.call("requestGeneration", &[id_value(id), to_js(request)]);
    }

    fn begin_text_edit(&mut self, session: &EditSession) {
        self.call("beginTextEdit", &[to_js(session)]);
    }

    fn open_reference(&mut self, path: &str) {
        self.call("openReference", &[JsValue::from_str(path)]);
    }

    fn notify(&mut self, notice: Notice) {
        self.call("notify", &[to_js(&notice)]);
    }

    fn write_clipboard(&mut self, json: &str) {
        self.call("writeClipboard", &[JsValue::from_str(json)]);
    }
}
