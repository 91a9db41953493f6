//! PressFX Animation Primitives
//!
//! Everything the press sequencer needs to describe an animation, without
//! owning a render loop.
//!
//! # Features
//!
//! - **Cubic Bezier Solving**: forward-scan curve inversion with a per-session cursor
//! - **Offset Planning**: "gather toward center" translations for companion targets
//! - **Animation Plans**: per-member scale/translation tracks for both phases
//! - **AnimationDriver**: the trait a host animation engine implements
//! - **FrameDriver**: a fixed-step reference driver stepped by the caller

pub mod driver;
pub mod easing;
pub mod frame_driver;
pub mod offset;
pub mod plan;
pub mod values;

pub use driver::{
    AnimationDriver, Phase, PhaseEvent, PhaseEventKind, PhaseHandle, PhaseRequest, PlayDirection,
};
pub use easing::{ControlPoints, CubicBezier, CurveId, CurveSession, CurveSolver, ACCURACY};
pub use frame_driver::FrameDriver;
pub use offset::{CompanionOffset, OffsetPlanner};
pub use plan::{AnimationPlan, MemberFrame, MemberTracks, PhasePlan, PlanSettings};
pub use values::{Interpolate, PropertyTrack};
