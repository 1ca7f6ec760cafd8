//! Input model: pointer events and the gesture state machine.
//!
//! The surface only ever tracks one gesture, drawing a new box, so the state
//! machine has two states. Carrying the in-progress annotation's id inside
//! [`InputState::Drawing`] is what guarantees there is never more than one
//! box being drawn.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::AnnotationId;
use crate::geom::Point;

/// Pointer events the surface reacts to, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Down(Point),
    /// Pointer moved, pressed or not.
    Move(Point),
    /// Button released.
    Up(Point),
    /// Pointer left the surface.
    Leave,
    /// Press and release at roughly the same spot.
    Click(Point),
    /// Two clicks in quick succession.
    DoubleClick(Point),
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A new annotation is being sized by the pointer.
    Drawing {
        /// Id of the in-progress annotation.
        id: AnnotationId,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Id of the in-progress annotation, if any.
    #[must_use]
    pub fn drawing_id(&self) -> Option<AnnotationId> {
        match self {
            Self::Drawing { id } => Some(*id),
            Self::Idle => None,
        }
    }
}
