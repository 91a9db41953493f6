//! Animation plans
//!
//! A plan is the per-member description of both phases, derived from a
//! single geometry snapshot. Every member scales identically; companions
//! also translate toward the primary (see [`OffsetPlanner`]). The primary is
//! just the member whose translation track is constant zero.

use pressfx_core::{Geometry, TargetId, Vec2};

use crate::driver::{Phase, PhaseRequest};
use crate::easing::{ControlPoints, CubicBezier};
use crate::offset::OffsetPlanner;
use crate::values::PropertyTrack;

/// Inputs to plan building that come from configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanSettings {
    /// Scale reached at the end of press-in, in (0, 1]
    pub scale_ratio: f32,
    pub down_curve: ControlPoints,
    pub up_curve: ControlPoints,
    pub down_duration_ms: u32,
    pub up_duration_ms: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            scale_ratio: 0.95,
            down_curve: ControlPoints::STANDARD,
            up_curve: ControlPoints::STANDARD,
            down_duration_ms: 200,
            up_duration_ms: 200,
        }
    }
}

/// Visual properties of one member at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberFrame {
    pub scale: Vec2,
    pub translation: Vec2,
}

impl MemberFrame {
    /// Untouched: unit scale, no translation
    pub const REST: MemberFrame = MemberFrame {
        scale: Vec2::ONE,
        translation: Vec2::ZERO,
    };
}

/// Tracks for one member in one phase
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberTracks {
    pub target: TargetId,
    pub scale: PropertyTrack<Vec2>,
    pub translation: PropertyTrack<Vec2>,
}

impl MemberTracks {
    pub fn sample(&self, t: f32) -> MemberFrame {
        MemberFrame {
            scale: self.scale.sample(t),
            translation: self.translation.sample(t),
        }
    }
}

/// One phase of a plan
#[derive(Clone, Debug, PartialEq)]
pub struct PhasePlan {
    pub phase: Phase,
    pub curve: CubicBezier,
    pub duration_ms: u32,
    pub members: Vec<MemberTracks>,
}

impl PhasePlan {
    /// Driver request for this phase
    pub fn request(&self) -> PhaseRequest {
        PhaseRequest {
            phase: self.phase,
            targets: self.members.iter().map(|m| m.target).collect(),
            curve: self.curve,
            duration_ms: self.duration_ms,
        }
    }

    /// Every member's frame at eased progress `t`
    pub fn frames(&self, t: f32) -> impl Iterator<Item = (TargetId, MemberFrame)> + '_ {
        self.members.iter().map(move |m| (m.target, m.sample(t)))
    }

    pub fn member(&self, target: TargetId) -> Option<&MemberTracks> {
        self.members.iter().find(|m| m.target == target)
    }
}

/// Both phases for a whole target group
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPlan {
    primary: TargetId,
    press_in: PhasePlan,
    release_out: PhasePlan,
}

impl AnimationPlan {
    /// Build a plan from a geometry snapshot of every member.
    ///
    /// Returns `None` when the primary is not among `members` or has not
    /// been measured yet; callers retry on the next trigger.
    pub fn build(
        primary: TargetId,
        members: &[(TargetId, Geometry)],
        settings: &PlanSettings,
    ) -> Option<Self> {
        let primary_geometry = members
            .iter()
            .find(|(id, _)| *id == primary)
            .map(|(_, geometry)| *geometry)?;
        if !primary_geometry.size.is_measured() {
            tracing::debug!(
                "AnimationPlan: primary {} not measured yet ({:?}), deferring",
                primary,
                primary_geometry.size
            );
            return None;
        }

        let planner = OffsetPlanner::new(settings.scale_ratio);
        let pressed_scale = Vec2::splat(settings.scale_ratio);
        let scale_down = PropertyTrack::new(Vec2::ONE, pressed_scale);

        let mut down = Vec::with_capacity(members.len());
        let mut up = Vec::with_capacity(members.len());
        for (target, geometry) in members {
            let offset = if *target == primary {
                Default::default()
            } else {
                planner.plan(&primary_geometry, geometry)
            };
            down.push(MemberTracks {
                target: *target,
                scale: scale_down,
                translation: PropertyTrack::new(Vec2::ZERO, offset.down),
            });
            up.push(MemberTracks {
                target: *target,
                scale: scale_down.reversed(),
                translation: PropertyTrack::new(offset.up, Vec2::ZERO),
            });
        }

        tracing::debug!(
            "AnimationPlan: built for {} members around {} (scale {})",
            members.len(),
            primary,
            settings.scale_ratio
        );

        Some(Self {
            primary,
            press_in: PhasePlan {
                phase: Phase::PressIn,
                curve: CubicBezier::new(settings.down_curve),
                duration_ms: settings.down_duration_ms,
                members: down,
            },
            release_out: PhasePlan {
                phase: Phase::ReleaseOut,
                curve: CubicBezier::new(settings.up_curve),
                duration_ms: settings.up_duration_ms,
                members: up,
            },
        })
    }

    pub fn primary(&self) -> TargetId {
        self.primary
    }

    pub fn phase(&self, phase: Phase) -> &PhasePlan {
        match phase {
            Phase::PressIn => &self.press_in,
            Phase::ReleaseOut => &self.release_out,
        }
    }

    pub fn press_in(&self) -> &PhasePlan {
        &self.press_in
    }

    pub fn release_out(&self) -> &PhasePlan {
        &self.release_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressfx_core::{Point, Size, Visibility};

    fn member(id: u64, x: f32, y: f32, w: f32, h: f32) -> (TargetId, Geometry) {
        (
            TargetId(id),
            Geometry::new(Point::new(x, y), Size::new(w, h), Visibility::Visible),
        )
    }

    #[test]
    fn test_build_requires_measured_primary() {
        let members = [member(1, 0.0, 0.0, 0.0, 0.0), member(2, 10.0, 10.0, 20.0, 20.0)];
        assert!(AnimationPlan::build(TargetId(1), &members, &PlanSettings::default()).is_none());
    }

    #[test]
    fn test_build_requires_primary_member() {
        let members = [member(2, 10.0, 10.0, 20.0, 20.0)];
        assert!(AnimationPlan::build(TargetId(1), &members, &PlanSettings::default()).is_none());
    }

    #[test]
    fn test_primary_scales_without_translation() {
        let members = [member(1, 0.0, 0.0, 200.0, 100.0), member(2, 150.0, 60.0, 40.0, 20.0)];
        let settings = PlanSettings {
            scale_ratio: 0.5,
            ..Default::default()
        };
        let plan = AnimationPlan::build(TargetId(1), &members, &settings).unwrap();

        let primary = plan.press_in().member(TargetId(1)).unwrap();
        assert_eq!(primary.translation, PropertyTrack::constant(Vec2::ZERO));
        assert_eq!(primary.scale.to, Vec2::splat(0.5));

        let companion = plan.press_in().member(TargetId(2)).unwrap();
        assert_eq!(companion.translation.to, Vec2::new(-40.0, -20.0));
        assert_eq!(companion.scale, primary.scale);
    }

    #[test]
    fn test_release_mirrors_press() {
        let members = [
            member(1, 0.0, 0.0, 300.0, 120.0),
            member(2, 10.0, 10.0, 50.0, 50.0),
            member(3, 240.0, 60.0, 50.0, 50.0),
        ];
        let plan = AnimationPlan::build(TargetId(1), &members, &PlanSettings::default()).unwrap();
        for (down, up) in plan
            .press_in()
            .members
            .iter()
            .zip(plan.release_out().members.iter())
        {
            assert_eq!(down.target, up.target);
            assert_eq!(down.translation.to, up.translation.from);
            assert_eq!(up.translation.to, Vec2::ZERO);
            assert_eq!(down.scale.to, up.scale.from);
            assert_eq!(up.scale.to, Vec2::ONE);
        }
    }

    #[test]
    fn test_frames_at_ends() {
        let members = [member(1, 0.0, 0.0, 200.0, 100.0), member(2, 150.0, 60.0, 40.0, 20.0)];
        let plan = AnimationPlan::build(TargetId(1), &members, &PlanSettings::default()).unwrap();
        assert!(plan
            .press_in()
            .frames(0.0)
            .all(|(_, frame)| frame == MemberFrame::REST));
        assert!(plan
            .release_out()
            .frames(1.0)
            .all(|(_, frame)| frame == MemberFrame::REST));
    }

    #[test]
    fn test_request_lists_targets() {
        let members = [member(1, 0.0, 0.0, 200.0, 100.0), member(2, 150.0, 60.0, 40.0, 20.0)];
        let settings = PlanSettings {
            up_duration_ms: 320,
            ..Default::default()
        };
        let plan = AnimationPlan::build(TargetId(1), &members, &settings).unwrap();
        let request = plan.phase(Phase::ReleaseOut).request();
        assert_eq!(request.phase, Phase::ReleaseOut);
        assert_eq!(request.duration_ms, 320);
        assert_eq!(request.targets.as_slice(), &[TargetId(1), TargetId(2)]);
    }
}
