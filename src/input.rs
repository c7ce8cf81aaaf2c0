//! Input model: modifier keys and the gesture state machine.
//!
//! `InputState` is the active gesture between pointer-down and pointer-up.
//! Every active variant keeps a copy of the affected elements as they were at
//! gesture start: moves recompute from those copies, so a drag never
//! compounds, and cancelling restores them verbatim.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::Element;
use crate::handles::HandleType;
use crate::selection::BoundingBox;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held; pointer-down toggles membership in the selection.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held; suppresses grid snapping.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// The gesture currently being tracked.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging a corner or endpoint handle of a single element.
    Resizing {
        handle: HandleType,
        /// World-space pointer position at pointer-down.
        start_world: Point,
        original: Element,
    },
    /// Dragging the rotation handle of a single element.
    Rotating { original: Element },
    /// Dragging a corner of the multi-selection bounds.
    GroupResizing {
        handle: HandleType,
        start_world: Point,
        original_bounds: BoundingBox,
        originals: Vec<Element>,
    },
    /// Dragging the rotation handle of the multi-selection bounds.
    GroupRotating {
        /// Center of the selection bounds at gesture start.
        pivot: Point,
        start_world: Point,
        originals: Vec<Element>,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resizing { .. } => "resize",
            Self::Rotating { .. } => "rotate",
            Self::GroupResizing { .. } => "group-resize",
            Self::GroupRotating { .. } => "group-rotate",
        }
    }

    /// The affected elements as they were when the gesture began.
    #[must_use]
    pub fn originals(&self) -> &[Element] {
        match self {
            Self::Idle => &[],
            Self::Resizing { original, .. } | Self::Rotating { original } => std::slice::from_ref(original),
            Self::GroupResizing { originals, .. } | Self::GroupRotating { originals, .. } => originals,
        }
    }
}
