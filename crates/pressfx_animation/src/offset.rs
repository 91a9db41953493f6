//! Companion offset planning
//!
//! When the group scales down, companions are pulled toward the primary
//! target so the group appears to gather around its center. Each axis is
//! decided independently from the relative position of the two centers.

use pressfx_core::{Geometry, Vec2};

/// Translation endpoints for one companion
///
/// Press-in animates translation from zero to `down`; release-out animates
/// from `up` back to zero. The two are always equal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompanionOffset {
    /// Translation reached at the end of press-in
    pub down: Vec2,
    /// Translation release-out starts from
    pub up: Vec2,
}

impl CompanionOffset {
    pub const NONE: CompanionOffset = CompanionOffset {
        down: Vec2::ZERO,
        up: Vec2::ZERO,
    };
}

/// Computes companion offsets relative to the primary target
#[derive(Clone, Copy, Debug)]
pub struct OffsetPlanner {
    scale_ratio: f32,
}

impl OffsetPlanner {
    pub fn new(scale_ratio: f32) -> Self {
        Self { scale_ratio }
    }

    pub fn scale_ratio(&self) -> f32 {
        self.scale_ratio
    }

    /// Offsets for `companion` while the group scales around `primary`
    pub fn plan(&self, primary: &Geometry, companion: &Geometry) -> CompanionOffset {
        if companion.is_gone() {
            return CompanionOffset::NONE;
        }

        let shrink = 1.0 - self.scale_ratio;
        let magnitude = Vec2::new(
            shrink * (primary.size.width - companion.size.width) / 2.0,
            shrink * (primary.size.height - companion.size.height) / 2.0,
        );
        let primary_center = primary.center();
        let companion_center = companion.center();

        let down = Vec2::new(
            axis_offset(companion_center.x, primary_center.x, magnitude.x),
            axis_offset(companion_center.y, primary_center.y, magnitude.y),
        );
        CompanionOffset { down, up: down }
    }
}

/// Signed offset on one axis: toward the primary, or nothing when aligned
fn axis_offset(companion_center: f32, primary_center: f32, magnitude: f32) -> f32 {
    if companion_center > primary_center {
        -magnitude
    } else if companion_center < primary_center {
        magnitude
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressfx_core::{Point, Size, Visibility};

    fn geometry(x: f32, y: f32, w: f32, h: f32) -> Geometry {
        Geometry::new(Point::new(x, y), Size::new(w, h), Visibility::Visible)
    }

    #[test]
    fn test_centered_companion_has_no_offset() {
        let primary = geometry(0.0, 0.0, 200.0, 100.0);
        let icon = geometry(80.0, 30.0, 40.0, 40.0);
        for ratio in [0.5, 0.8, 0.95, 1.0] {
            let offset = OffsetPlanner::new(ratio).plan(&primary, &icon);
            assert_eq!(offset, CompanionOffset::NONE);
        }
    }

    #[test]
    fn test_gone_companion_has_no_offset() {
        let primary = geometry(0.0, 0.0, 200.0, 100.0);
        let mut label = geometry(150.0, 70.0, 40.0, 20.0);
        label.visibility = Visibility::Gone;
        let offset = OffsetPlanner::new(0.9).plan(&primary, &label);
        assert_eq!(offset, CompanionOffset::NONE);
    }

    #[test]
    fn test_hidden_companion_still_moves() {
        let primary = geometry(0.0, 0.0, 200.0, 100.0);
        let mut label = geometry(150.0, 0.0, 40.0, 100.0);
        label.visibility = Visibility::Hidden;
        let offset = OffsetPlanner::new(0.5).plan(&primary, &label);
        assert_eq!(offset.down.x, -40.0);
    }

    #[test]
    fn test_companion_moves_toward_primary() {
        let primary = geometry(0.0, 0.0, 200.0, 100.0);
        let planner = OffsetPlanner::new(0.5);

        // Right/below of center: pulled left/up
        let bottom_right = planner.plan(&primary, &geometry(150.0, 60.0, 40.0, 20.0));
        assert_eq!(bottom_right.down, Vec2::new(-40.0, -20.0));

        // Left/above of center: pulled right/down
        let top_left = planner.plan(&primary, &geometry(10.0, 10.0, 40.0, 20.0));
        assert_eq!(top_left.down, Vec2::new(40.0, 20.0));
    }

    #[test]
    fn test_axes_are_independent() {
        let primary = geometry(0.0, 0.0, 200.0, 100.0);
        // Same vertical center, to the right
        let offset = OffsetPlanner::new(0.5).plan(&primary, &geometry(150.0, 40.0, 40.0, 20.0));
        assert_eq!(offset.down, Vec2::new(-40.0, 0.0));
    }

    #[test]
    fn test_press_end_equals_release_start() {
        let primary = geometry(0.0, 0.0, 300.0, 120.0);
        let planner = OffsetPlanner::new(0.95);
        for companion in [
            geometry(10.0, 10.0, 50.0, 50.0),
            geometry(240.0, 60.0, 50.0, 50.0),
            geometry(125.0, 35.0, 50.0, 50.0),
        ] {
            let offset = planner.plan(&primary, &companion);
            assert_eq!(offset.down, offset.up);
        }
    }
}
