//! Interaction modes.
//!
//! One explicit enum instead of a set of flags, so at most one gesture is
//! ever in flight.
//!
//! ```text
//! Idle -> ConnectingFrom   (connect modifier + press on a connection point)
//! Idle -> Resizing         (press on a resize handle of a selected node)
//! Idle -> ScrollbarDrag    (press on a node's scrollbar track)
//! Idle -> PressedNode      (press on a node body)
//! Idle -> Idle             (press on a connection line selects it)
//! Idle -> RubberBand       (primary press on empty canvas)
//! Idle -> Panning          (middle button, or pan modifier on empty canvas)
//!
//! Any -> Idle              (pointer up, Escape, pointer leave, blur)
//! ```

use nc_core::{Bounds, NodeId, Side};
use nc_render::{ResizeHandle, Scrollbar};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Mode {
    #[default]
    Idle,

    /// Drawing a new connection; nothing is created until release.
    ConnectingFrom {
        from: NodeId,
        side: Side,
        /// Live pointer in graph space.
        pointer: (f32, f32),
    },

    Resizing {
        node: NodeId,
        handle: ResizeHandle,
        /// Bounds at press time; every move is applied relative to these.
        start: Bounds,
        /// Graph-space press position.
        origin: (f32, f32),
    },

    ScrollbarDrag {
        node: NodeId,
        bar: Scrollbar,
        /// Graph-space distance from the thumb top to the press point.
        grab: f32,
    },

    /// Pressed on a node body. Becomes a drag of the whole selection once
    /// the pointer travels past the drag threshold.
    PressedNode {
        node: NodeId,
        /// Screen-space press position, for the threshold.
        press: (f32, f32),
        /// Graph-space offset from the node's top-left to the press point.
        anchor: (f32, f32),
        extend: bool,
        /// The press already changed the selection, so release must not.
        newly_selected: bool,
        dragging: bool,
    },

    /// Rectangle selection, stored in graph space.
    RubberBand {
        start: (f32, f32),
        current: (f32, f32),
        /// Screen-space press position, to tell a click from a drag.
        press: (f32, f32),
        extend: bool,
    },

    Panning {
        /// Last screen position.
        last: (f32, f32),
    },
}

impl Mode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::ConnectingFrom { .. } => "connecting",
            Mode::Resizing { .. } => "resizing",
            Mode::ScrollbarDrag { .. } => "scrollbar-drag",
            Mode::PressedNode { dragging: true, .. } => "dragging",
            Mode::PressedNode { .. } => "pressed-node",
            Mode::RubberBand { .. } => "rubber-band",
            Mode::Panning { .. } => "panning",
        }
    }

    /// Node the current gesture acts on, if any.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Mode::ConnectingFrom { from: node, .. }
            | Mode::Resizing { node, .. }
            | Mode::ScrollbarDrag { node, .. }
            | Mode::PressedNode { node, .. } => Some(*node),
            _ => None,
        }
    }

    /// Normalized rubber-band rectangle in graph space.
    pub fn rubber_band(&self) -> Option<Bounds> {
        match self {
            Mode::RubberBand { start, current, .. } => {
                Some(Bounds::from_corners(start.0, start.1, current.0, current.1))
            }
            _ => None,
        }
    }
}
