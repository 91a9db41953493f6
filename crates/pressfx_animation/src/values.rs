//! Animatable value types
//!
//! Provides the interpolation trait used by plan tracks, with
//! implementations for scalars and 2D vectors.

use pressfx_core::Vec2;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Vec2 Implementation
// ============================================================================

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

// ============================================================================
// Property Tracks
// ============================================================================

/// A single property animated from one value to another
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyTrack<T: Interpolate> {
    pub from: T,
    pub to: T,
}

impl<T: Interpolate> PropertyTrack<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// A track that holds one value for the whole phase
    pub fn constant(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
        }
    }

    /// Value at eased progress `t`. Ends are returned exactly.
    pub fn sample(&self, t: f32) -> T {
        if t <= 0.0 {
            self.from.clone()
        } else if t >= 1.0 {
            self.to.clone()
        } else {
            self.from.lerp(&self.to, t)
        }
    }

    /// The same track played backwards
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}
