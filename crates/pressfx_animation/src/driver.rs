//! Animation driver abstraction
//!
//! The press sequencer never runs animations itself. It asks an
//! [`AnimationDriver`] to start or cancel a phase and later receives
//! [`PhaseEvent`]s for that phase: progress ticks, then exactly one of
//! completion or cancellation.
//!
//! Events are delivered by the host, not by the driver calling back into the
//! sequencer. A host typically pumps its driver once per frame and forwards
//! every returned event to the sequencer that owns the handle.

use pressfx_core::TargetId;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::easing::CubicBezier;

new_key_type! {
    /// Handle to a phase started on a driver
    pub struct PhaseHandle;
}

/// The two halves of a press effect
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Scale down and fade the overlay in
    PressIn,
    /// Scale back and fade the overlay out
    ReleaseOut,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::PressIn => write!(f, "press-in"),
            Phase::ReleaseOut => write!(f, "release-out"),
        }
    }
}

/// Playback direction of a phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    /// Played from its end back to its start
    Reverse,
}

/// Everything a driver needs to run one phase
#[derive(Clone, Debug)]
pub struct PhaseRequest {
    pub phase: Phase,
    /// Targets animated by this phase (informational for the driver)
    pub targets: SmallVec<[TargetId; 4]>,
    /// Timing curve applied to linear progress
    pub curve: CubicBezier,
    pub duration_ms: u32,
}

/// What happened to a phase
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhaseEventKind {
    /// A frame was produced.
    ///
    /// `linear` is elapsed / duration (mirrored for reverse playback) and
    /// `eased` is `linear` mapped through the phase's curve.
    Progress { linear: f32, eased: f32 },
    /// The phase reached its end
    Completed,
    /// The phase was stopped before reaching its end
    Cancelled,
}

/// Event reported by a driver for one phase
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseEvent {
    pub handle: PhaseHandle,
    pub phase: Phase,
    pub direction: PlayDirection,
    pub kind: PhaseEventKind,
}

/// Host animation engine
pub trait AnimationDriver {
    /// Start a phase. It runs until it completes or is cancelled.
    fn start_phase(&mut self, request: PhaseRequest) -> PhaseHandle;

    /// Stop a running phase. A `Cancelled` event follows.
    fn cancel(&mut self, handle: PhaseHandle);

    fn is_running(&self, handle: PhaseHandle) -> bool;

    /// Whether [`AnimationDriver::reverse`] is available
    fn supports_reverse(&self) -> bool {
        false
    }

    /// Play a known phase backwards from wherever it currently is.
    ///
    /// Returns the handle the reversed playback reports under, or `None`
    /// when reversal is unsupported or the handle is unknown.
    fn reverse(&mut self, _handle: PhaseHandle) -> Option<PhaseHandle> {
        None
    }

    /// Forget a finished phase
    fn discard(&mut self, _handle: PhaseHandle) {}
}
