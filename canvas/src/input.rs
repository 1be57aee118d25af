//! Input model: pointer buttons, modifier keys, and the gesture state machine.
//!
//! `InputState` is the single gesture being tracked between pointer-down and
//! pointer-up/cancel. Every active variant records the pointer id that owns
//! it; events from any other pointer are ignored until the gesture ends.
//!
//! A shape being lifted toward the palette lives inside
//! [`InputState::Lifting`]: while that variant is active the shape is in
//! neither the layer nor the palette.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::{PanGrip, Point};
use crate::doc::{PlacedShape, ShapeId};

/// Pointer identifier as reported by the browser.
pub type PointerId = i32;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether this pointer-down should lift a shape toward the palette.
    #[must_use]
    pub fn wants_lift(self) -> bool {
        self.ctrl || self.alt
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A shape detached from the layer and following the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftSession {
    /// The shape itself; owned here until it is returned or absorbed.
    pub shape: PlacedShape,
    /// Layer index the shape came from.
    pub slot: usize,
    /// Latest canvas-local pointer position.
    pub pointer: Point,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging empty space.
    Panning {
        pointer_id: PointerId,
        grip: PanGrip,
    },
    /// The user is moving a shape within the canvas.
    DraggingShape {
        pointer_id: PointerId,
        /// Id of the shape being dragged.
        id: ShapeId,
        /// World-space pointer position at pointer-down.
        origin_world: Point,
        /// Shape translate at pointer-down.
        origin_tx: f64,
        origin_ty: f64,
    },
    /// A shape is lifted out of the canvas toward the palette.
    Lifting {
        pointer_id: PointerId,
        session: LiftSession,
    },
}

impl InputState {
    /// Pointer that owns the current gesture, if any.
    #[must_use]
    pub fn pointer_id(&self) -> Option<PointerId> {
        match self {
            Self::Idle => None,
            Self::Panning { pointer_id, .. }
            | Self::DraggingShape { pointer_id, .. }
            | Self::Lifting { pointer_id, .. } => Some(*pointer_id),
        }
    }

    /// Whether events from `pointer_id` belong to the current gesture.
    #[must_use]
    pub fn is_owned_by(&self, pointer_id: PointerId) -> bool {
        self.pointer_id() == Some(pointer_id)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the shape being dragged in-canvas, if any.
    #[must_use]
    pub fn dragged_shape(&self) -> Option<ShapeId> {
        match self {
            Self::DraggingShape { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The active lift session, if any.
    #[must_use]
    pub fn lift(&self) -> Option<&LiftSession> {
        match self {
            Self::Lifting { session, .. } => Some(session),
            _ => None,
        }
    }
}
