//! Node Canvas renderer.
//!
//! Turns a [`CanvasGraph`](nc_core::CanvasGraph) plus transient overlay state
//! into a backend-agnostic [`DisplayList`], and records the hit regions the
//! interaction layer reads on the next input event.

pub mod display;
pub mod format;
pub mod hit;
pub mod layout;
pub mod scene;
pub mod theme;
#[cfg(feature = "vello")]
pub mod vello;

pub use display::{DisplayList, DrawCmd, FontSpec};
pub use format::{LineFormatter, LineStyle, MarkerFormatter, PlainFormatter, StyledLine};
pub use hit::{HitRegionCache, HitRegions, NodeButton, ResizeHandle, Scrollbar, connection_point_at};
pub use layout::{ApproxMeasure, TextLayout, TextMeasure, layout_text};
pub use scene::{ConnectionPreview, Overlay, RenderOptions, SceneRenderer, Surface};
pub use theme::{TextMetrics, Theme};
