//! Geometry value types

use serde::{Deserialize, Serialize};

use crate::view::{ViewHandle, Visibility};

/// 2D point in screen coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// 2D vector (used for scale pairs and translations)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value on both axes
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

/// Snapshot of a target's on-screen geometry
///
/// Taken once when an animation plan is built. Geometry is never re-read
/// while a phase is running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Top-left corner in screen coordinates
    pub position: Point,
    /// Measured size
    pub size: Size,
    /// Visibility at snapshot time
    pub visibility: Visibility,
}

impl Geometry {
    pub fn new(position: Point, size: Size, visibility: Visibility) -> Self {
        Self {
            position,
            size,
            visibility,
        }
    }

    /// Read the current geometry of a view
    pub fn snapshot<V: ViewHandle + ?Sized>(view: &V) -> Self {
        Self {
            position: view.screen_position(),
            size: view.size(),
            visibility: view.visibility(),
        }
    }

    /// Screen-space center
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size.width / 2.0,
            self.position.y + self.size.height / 2.0,
        )
    }

    /// Whether the target takes part in layout
    pub fn is_gone(&self) -> bool {
        self.visibility == Visibility::Gone
    }
}
