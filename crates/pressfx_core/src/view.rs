//! View handle abstraction
//!
//! [`ViewHandle`] is the only way the press-feedback crates observe or mutate
//! host UI elements. A host toolkit implements it for whatever it uses to
//! address an element (a node id, a shared reference, a JNI global ref, ...).

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{Point, Size};

/// Stable identity of a visual target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Visibility of a target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Drawn and laid out
    #[default]
    Visible,
    /// Not drawn, still occupies layout space
    Hidden,
    /// Not drawn and removed from layout
    Gone,
}

/// Per-corner radius for rounded overlays
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    /// Order: top_left, top_right, bottom_right, bottom_left (clockwise from top-left)
    pub fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }
}

/// Shape of a color overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayShape {
    /// Rounded rectangle covering the target bounds
    RoundRect(CornerRadius),
    /// Oval inscribed in the target bounds
    Oval,
}

/// Foreground overlay drawn on top of the primary target
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    /// A host-provided drawable, referenced by name
    Drawable(String),
    /// A solid color fill in the given shape
    Fill { color: Color, shape: OverlayShape },
}

/// Host element that takes part in a press effect
///
/// Getters must be cheap: they are read once per plan build. Setters are
/// called on every animation tick while a phase runs.
pub trait ViewHandle {
    /// Identity used for de-duplication and gesture source matching
    fn id(&self) -> TargetId;

    /// Top-left corner in screen coordinates
    fn screen_position(&self) -> Point;

    /// Current measured size (zero until laid out)
    fn size(&self) -> Size;

    fn visibility(&self) -> Visibility;

    fn set_scale(&mut self, x: f32, y: f32);

    fn set_translation(&mut self, x: f32, y: f32);

    /// Currently installed foreground overlay, if any
    fn overlay(&self) -> Option<Overlay>;

    fn set_overlay(&mut self, overlay: Overlay);

    /// Overlay opacity, 0 (transparent) to 255 (opaque)
    fn set_overlay_alpha(&mut self, alpha: u8);

    /// Request a short haptic pulse. Hosts without a vibrator ignore it.
    fn perform_haptic_feedback(&mut self, _duration_ms: u32, _amplitude: u8) {}
}
