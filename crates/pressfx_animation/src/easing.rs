//! Cubic Bezier easing
//!
//! A curve is defined by four control points: P0 = (0,0) and P3 = (1,1) are
//! fixed, P1 and P2 are configurable. Solving maps a linear progress `x` to
//! the eased output `y` by first finding the curve parameter `t` with
//! `x(t) >= x`, then evaluating `y(t)`.
//!
//! `t` is found by a forward scan over a fixed grid rather than by root
//! finding. The scan resumes from where the previous call stopped, so a
//! whole animation phase (ascending inputs) costs at most [`ACCURACY`]
//! steps in total. That cursor lives in a [`CurveSession`] owned by the
//! caller, one per playing phase.

use serde::{Deserialize, Serialize};

use crate::driver::Phase;

/// Number of grid steps for the `t` scan.
///
/// Worst-case `t` resolution is `1 / ACCURACY`.
pub const ACCURACY: usize = 4096;

/// Eased outputs above this snap to exactly 1.0
const SNAP_THRESHOLD: f64 = 0.999;

/// Curves are addressed by the phase they ease
pub type CurveId = Phase;

/// Configurable control points P1 = (x1, y1) and P2 = (x2, y2)
///
/// Serialized as `[x1, y1, x2, y2]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct ControlPoints {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl ControlPoints {
    /// Default press curve
    pub const STANDARD: ControlPoints = ControlPoints::new(0.33, 0.0, 0.67, 1.0);
    pub const LINEAR: ControlPoints = ControlPoints::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE: ControlPoints = ControlPoints::new(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: ControlPoints = ControlPoints::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: ControlPoints = ControlPoints::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: ControlPoints = ControlPoints::new(0.42, 0.0, 0.58, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Look up a preset by its CSS-style name
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::STANDARD),
            "linear" => Some(Self::LINEAR),
            "ease" => Some(Self::EASE),
            "ease-in" => Some(Self::EASE_IN),
            "ease-out" => Some(Self::EASE_OUT),
            "ease-in-out" => Some(Self::EASE_IN_OUT),
            _ => None,
        }
    }

    /// Whether x(t) is a valid timing curve: both x coordinates in [0, 1]
    /// and all coordinates finite
    pub fn is_valid(&self) -> bool {
        let finite = [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite());
        finite && (0.0..=1.0).contains(&self.x1) && (0.0..=1.0).contains(&self.x2)
    }
}

impl Default for ControlPoints {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl From<[f32; 4]> for ControlPoints {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<ControlPoints> for [f32; 4] {
    fn from(points: ControlPoints) -> Self {
        [points.x1, points.y1, points.x2, points.y2]
    }
}

/// One component of the cubic Bezier blend with v0 = 0 and v3 = 1
fn cubic_curve(t: f64, v1: f64, v2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * v1 + 3.0 * u * t * t * v2 + t * t * t
}

/// Search cursor for one ascending run of [`CubicBezier::solve`] calls
///
/// Only valid while inputs are non-decreasing. Start a new session for every
/// new phase playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveSession {
    curve: CurveId,
    cursor: usize,
}

impl CurveSession {
    pub fn new(curve: CurveId) -> Self {
        Self { curve, cursor: 0 }
    }

    /// Curve this session evaluates
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// Grid index the next scan starts from
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// An immutable cubic Bezier timing curve
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CubicBezier {
    points: ControlPoints,
}

impl CubicBezier {
    pub fn new(points: ControlPoints) -> Self {
        Self { points }
    }

    pub fn points(&self) -> ControlPoints {
        self.points
    }

    /// x(t)
    pub fn sample_x(&self, t: f64) -> f64 {
        cubic_curve(t, self.points.x1 as f64, self.points.x2 as f64)
    }

    /// y(t)
    pub fn sample_y(&self, t: f64) -> f64 {
        cubic_curve(t, self.points.y1 as f64, self.points.y2 as f64)
    }

    /// Map linear progress to eased progress, advancing the session cursor
    pub fn solve(&self, session: &mut CurveSession, input: f32) -> f32 {
        let target = input as f64;
        let mut t = 1.0;
        for i in session.cursor..ACCURACY {
            t = i as f64 / ACCURACY as f64;
            if self.sample_x(t) >= target {
                session.cursor = i;
                break;
            }
        }
        // An exhausted scan keeps the last grid t (just below 1.0).

        let value = self.sample_y(t);
        if value > SNAP_THRESHOLD {
            session.cursor = 0;
            return 1.0;
        }
        value as f32
    }

    /// Evaluate a single input with a throwaway session
    pub fn ease(&self, input: f32) -> f32 {
        let mut session = CurveSession::new(Phase::PressIn);
        self.solve(&mut session, input)
    }
}

/// The pair of curves used by one press effect
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurveSolver {
    press_in: CubicBezier,
    release_out: CubicBezier,
}

impl CurveSolver {
    pub fn new(press_in: ControlPoints, release_out: ControlPoints) -> Self {
        Self {
            press_in: CubicBezier::new(press_in),
            release_out: CubicBezier::new(release_out),
        }
    }

    pub fn curve(&self, id: CurveId) -> CubicBezier {
        match id {
            Phase::PressIn => self.press_in,
            Phase::ReleaseOut => self.release_out,
        }
    }

    /// Start a fresh ascending run on the given curve
    pub fn begin_session(&self, id: CurveId) -> CurveSession {
        CurveSession::new(id)
    }

    /// Solve on the curve the session was started for
    pub fn solve(&self, session: &mut CurveSession, input: f32) -> f32 {
        self.curve(session.curve()).solve(session, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / ACCURACY as f32;

    #[test]
    fn test_solve_starts_at_zero() {
        let solver = CurveSolver::default();
        let mut session = solver.begin_session(Phase::PressIn);
        let value = solver.solve(&mut session, 0.0);
        let exact = solver.curve(Phase::PressIn).sample_y(0.0) as f32;
        assert!((value - exact).abs() <= STEP);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_solve_snaps_to_one() {
        let solver = CurveSolver::new(ControlPoints::STANDARD, ControlPoints::STANDARD);
        let mut session = solver.begin_session(Phase::ReleaseOut);
        assert_eq!(solver.solve(&mut session, 1.0), 1.0);
        // Snap resets the cursor for the next run
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_solve_monotonic_within_session() {
        for points in [
            ControlPoints::STANDARD,
            ControlPoints::EASE,
            ControlPoints::EASE_IN,
            ControlPoints::EASE_OUT,
            ControlPoints::LINEAR,
        ] {
            let curve = CubicBezier::new(points);
            let mut session = CurveSession::new(Phase::PressIn);
            let mut last = 0.0;
            for i in 0..=120 {
                let value = curve.solve(&mut session, i as f32 / 120.0);
                assert!(value >= last, "{points:?} went backwards at frame {i}");
                assert!((0.0..=1.0).contains(&value));
                last = value;
            }
            assert_eq!(last, 1.0);
        }
    }

    #[test]
    fn test_cursor_advances_across_calls() {
        let curve = CubicBezier::new(ControlPoints::STANDARD);
        let mut session = CurveSession::new(Phase::PressIn);
        curve.solve(&mut session, 0.25);
        let first = session.cursor();
        curve.solve(&mut session, 0.5);
        assert!(session.cursor() > first);
    }

    #[test]
    fn test_session_matches_fresh_evaluation() {
        let curve = CubicBezier::new(ControlPoints::EASE_IN_OUT);
        let mut session = CurveSession::new(Phase::PressIn);
        for i in 0..60 {
            let input = i as f32 / 60.0;
            assert_eq!(curve.solve(&mut session, input), curve.ease(input));
        }
    }

    #[test]
    fn test_linear_curve_is_close_to_identity() {
        let curve = CubicBezier::new(ControlPoints::LINEAR);
        for input in [0.1f32, 0.3, 0.5, 0.8] {
            assert!((curve.ease(input) - input).abs() < 0.01);
        }
    }

    #[test]
    fn test_control_points_validation() {
        assert!(ControlPoints::STANDARD.is_valid());
        assert!(ControlPoints::new(0.3, -0.5, 0.7, 1.5).is_valid());
        assert!(!ControlPoints::new(-0.1, 0.0, 0.5, 1.0).is_valid());
        assert!(!ControlPoints::new(0.1, 0.0, 1.5, 1.0).is_valid());
        assert!(!ControlPoints::new(f32::NAN, 0.0, 0.5, 1.0).is_valid());
    }

    #[test]
    fn test_named_presets() {
        assert_eq!(ControlPoints::named("standard"), Some(ControlPoints::STANDARD));
        assert_eq!(ControlPoints::named("ease-out"), Some(ControlPoints::EASE_OUT));
        assert_eq!(ControlPoints::named("bouncy"), None);
    }
}
