//! Node Canvas editor.
//!
//! Input handling, the interaction state machine, and the engine that ties
//! graph, renderer and host together.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod engine;
pub mod generation;
pub mod host;
pub mod input;
pub mod mutation;
pub mod pending;
pub mod scheduler;
pub mod shortcuts;
pub mod state;

pub use clipboard::Clipboard;
pub use config::EditorConfig;
pub use controller::{InputContext, Intent, InteractionController};
pub use engine::CanvasEngine;
pub use generation::GenerationRequest;
pub use host::{EditSession, Host, HostCall, Notice, NoticeLevel, RecordingHost};
pub use input::{InputEvent, ModifierKey, Modifiers, PointerButton};
pub use mutation::{GraphMutation, MutationOutcome};
pub use pending::{CorrelationId, PendingKind, PendingRequests};
pub use scheduler::RepaintScheduler;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use state::Mode;
