//! PressFX Core Types
//!
//! Foundational value types shared by the press-feedback crates:
//!
//! - **Geometry**: points, sizes, and the per-target geometry snapshot
//! - **Color**: RGBA colors with Android-style `#AARRGGBB` parsing
//! - **View Handles**: the [`ViewHandle`] trait the host toolkit implements
//! - **Gesture Input**: pointer events tagged with their source target
//!
//! The host UI toolkit is never touched directly. Everything visual goes
//! through [`ViewHandle`], so the animation crates stay toolkit-agnostic.

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod view;

pub use color::Color;
pub use error::{CoreError, Result};
pub use geometry::{Geometry, Point, Size, Vec2};
pub use input::{GestureEvent, GestureKind};
pub use view::{CornerRadius, Overlay, OverlayShape, TargetId, ViewHandle, Visibility};
