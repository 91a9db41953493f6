//! Gesture input events

use crate::view::TargetId;

/// Pointer gesture phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Pointer went down on the source
    Down,
    /// Pointer moved; `pressed` is whether the source still reports itself pressed
    Move { pressed: bool },
    /// Pointer lifted
    Up,
    /// Gesture was taken away (e.g. by a scrolling parent)
    Cancel,
}

/// Gesture event tagged with the target that received it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureEvent {
    pub source: TargetId,
    pub kind: GestureKind,
}

impl GestureEvent {
    pub fn new(source: TargetId, kind: GestureKind) -> Self {
        Self { source, kind }
    }

    pub fn down(source: TargetId) -> Self {
        Self::new(source, GestureKind::Down)
    }

    pub fn up(source: TargetId) -> Self {
        Self::new(source, GestureKind::Up)
    }
}
