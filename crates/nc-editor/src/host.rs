//! The host collaborator: everything the engine asks of its embedder.
//!
//! Calls are fire-and-forget. Answers come back later through the engine
//! (`content_loaded`, `generation_completed`, ...) keyed by the
//! [`CorrelationId`] handed out here.

use crate::generation::GenerationRequest;
use crate::pending::CorrelationId;
use nc_core::{Bounds, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible, non-fatal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A text edit handed to the host's overlay editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    pub node: NodeId,
    pub text: String,
    /// Node rectangle in screen pixels, for positioning the overlay.
    pub screen_bounds: Bounds,
    pub scale: f32,
}

pub trait Host {
    /// Load the file behind a reference node.
    fn request_content(&mut self, path: &str, id: CorrelationId);

    /// Write edited reference content back to its file.
    fn write_content(&mut self, path: &str, text: &str);

    /// Save the serialized graph.
    fn persist(&mut self, json: &str);

    fn request_generation(&mut self, id: CorrelationId, request: &GenerationRequest);

    fn begin_text_edit(&mut self, session: &EditSession);

    fn open_reference(&mut self, path: &str);

    fn notify(&mut self, notice: Notice);

    /// Place copied nodes on the system clipboard.
    fn write_clipboard(&mut self, _json: &str) {}
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    RequestContent { path: String, id: CorrelationId },
    WriteContent { path: String, text: String },
    Persist(String),
    RequestGeneration { id: CorrelationId, request: GenerationRequest },
    BeginTextEdit(EditSession),
    OpenReference(String),
    Notify(Notice),
    WriteClipboard(String),
}

/// A headless host that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn persisted(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|c| match c {
            HostCall::Persist(json) => Some(json.as_str()),
            _ => None,
        })
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> + '_ {
        self.calls.iter().filter_map(|c| match c {
            HostCall::Notify(n) => Some(n),
            _ => None,
        })
    }

    /// Correlation ids of content requests, in order.
    pub fn content_requests(&self) -> Vec<(String, CorrelationId)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::RequestContent { path, id } => Some((path.clone(), *id)),
                _ => None,
            })
            .collect()
    }

    pub fn generation_requests(&self) -> Vec<(CorrelationId, GenerationRequest)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::RequestGeneration { id, request } => Some((*id, request.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Host for RecordingHost {
    fn request_content(&mut self, path: &str, id: CorrelationId) {
        self.calls.push(HostCall::RequestContent {
            path: path.to_string(),
            id,
        });
    }

    fn write_content(&mut self, path: &str, text: &str) {
        self.calls.push(HostCall::WriteContent {
            path: path.to_string(),
            text: text.to_string(),
        });
    }

    fn persist(&mut self, json: &str) {
        self.calls.push(HostCall::Persist(json.to_string()));
    }

    fn request_generation(&mut self, id: CorrelationId, request: &GenerationRequest) {
        self.calls.push(HostCall::RequestGeneration {
            id,
            request: request.clone(),
        });
    }

    fn begin_text_edit(&mut self, session: &EditSession) {
        self.calls.push(HostCall::BeginTextEdit(session.clone()));
    }

    fn open_reference(&mut self, path: &str) {
        self.calls.push(HostCall::OpenReference(path.to_string()));
    }

    fn notify(&mut self, notice: Notice) {
        self.calls.push(HostCall::Notify(notice));
    }

    fn write_clipboard(&mut self, json: &str) {
        self.calls.push(HostCall::WriteClipboard(json.to_string()));
    }
}
