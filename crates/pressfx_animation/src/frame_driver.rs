//! Fixed-step reference driver
//!
//! [`FrameDriver`] runs phases against caller-supplied time deltas instead of
//! a wall clock, which makes it deterministic. Hosts without their own
//! animation engine can pump it from their frame callback; tests and the CLI
//! use it to replay gestures.
//!
//! Phases stay registered after they finish so they can still be reversed.
//! They are only removed by [`AnimationDriver::discard`].

use slotmap::SlotMap;

use crate::driver::{
    AnimationDriver, PhaseEvent, PhaseEventKind, PhaseHandle, PhaseRequest, PlayDirection,
};
use crate::easing::CurveSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PhaseStatus {
    Running,
    Finished,
    Cancelled,
}

/// Internal state of one registered phase
struct PhaseEntry {
    request: PhaseRequest,
    direction: PlayDirection,
    elapsed_ms: f32,
    session: CurveSession,
    status: PhaseStatus,
}

impl PhaseEntry {
    fn fraction(&self) -> f32 {
        if self.request.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.request.duration_ms as f32).min(1.0)
    }

    fn event(&self, handle: PhaseHandle, kind: PhaseEventKind) -> PhaseEvent {
        PhaseEvent {
            handle,
            phase: self.request.phase,
            direction: self.direction,
            kind,
        }
    }
}

/// Deterministic driver stepped by [`FrameDriver::tick`]
pub struct FrameDriver {
    phases: SlotMap<PhaseHandle, PhaseEntry>,
    /// Events raised outside of `tick` (cancellations), flushed on the next tick
    pending: Vec<PhaseEvent>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            phases: SlotMap::with_key(),
            pending: Vec::new(),
        }
    }

    /// Advance every running phase by `dt_ms` and collect what happened.
    ///
    /// Events queued since the last tick come first. A phase that reaches its
    /// end reports a final `Progress` followed by `Completed`.
    pub fn tick(&mut self, dt_ms: f32) -> Vec<PhaseEvent> {
        let mut events = std::mem::take(&mut self.pending);

        for (handle, entry) in self.phases.iter_mut() {
            if entry.status != PhaseStatus::Running {
                continue;
            }
            entry.elapsed_ms += dt_ms;
            let fraction = entry.fraction();

            let (linear, eased) = match entry.direction {
                PlayDirection::Forward => {
                    let eased = entry.request.curve.solve(&mut entry.session, fraction);
                    (fraction, eased)
                }
                // Reverse inputs descend, which a session cursor cannot follow
                PlayDirection::Reverse => {
                    let linear = 1.0 - fraction;
                    (linear, entry.request.curve.ease(linear))
                }
            };
            tracing::trace!(
                "FrameDriver: {} {:?} linear={:.3} eased={:.3}",
                entry.request.phase,
                entry.direction,
                linear,
                eased
            );
            events.push(entry.event(handle, PhaseEventKind::Progress { linear, eased }));

            if fraction >= 1.0 {
                entry.status = PhaseStatus::Finished;
                events.push(entry.event(handle, PhaseEventKind::Completed));
            }
        }

        events
    }

    /// Take queued events without advancing time
    pub fn drain_events(&mut self) -> Vec<PhaseEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether any phase still needs ticks
    pub fn has_running(&self) -> bool {
        self.phases
            .values()
            .any(|entry| entry.status == PhaseStatus::Running)
    }

    /// Number of registered phases (running or finished)
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver for FrameDriver {
    fn start_phase(&mut self, request: PhaseRequest) -> PhaseHandle {
        tracing::debug!(
            "FrameDriver: starting {} over {}ms for {} targets",
            request.phase,
            request.duration_ms,
            request.targets.len()
        );
        let session = CurveSession::new(request.phase);
        self.phases.insert(PhaseEntry {
            request,
            direction: PlayDirection::Forward,
            elapsed_ms: 0.0,
            session,
            status: PhaseStatus::Running,
        })
    }

    fn cancel(&mut self, handle: PhaseHandle) {
        if let Some(entry) = self.phases.get_mut(handle) {
            if entry.status == PhaseStatus::Running {
                tracing::debug!("FrameDriver: cancelling {}", entry.request.phase);
                entry.status = PhaseStatus::Cancelled;
                self.pending
                    .push(entry.event(handle, PhaseEventKind::Cancelled));
            }
        }
    }

    fn is_running(&self, handle: PhaseHandle) -> bool {
        self.phases
            .get(handle)
            .is_some_and(|entry| entry.status == PhaseStatus::Running)
    }

    fn supports_reverse(&self) -> bool {
        true
    }

    fn reverse(&mut self, handle: PhaseHandle) -> Option<PhaseHandle> {
        let entry = self.phases.get_mut(handle)?;
        let duration = entry.request.duration_ms as f32;
        entry.elapsed_ms = match entry.status {
            PhaseStatus::Running => (duration - entry.elapsed_ms).max(0.0),
            PhaseStatus::Finished => 0.0,
            PhaseStatus::Cancelled => return None,
        };
        entry.direction = match entry.direction {
            PlayDirection::Forward => PlayDirection::Reverse,
            PlayDirection::Reverse => PlayDirection::Forward,
        };
        entry.session.reset();
        entry.status = PhaseStatus::Running;
        tracing::debug!(
            "FrameDriver: reversing {} ({:?})",
            entry.request.phase,
            entry.direction
        );
        Some(handle)
    }

    fn discard(&mut self, handle: PhaseHandle) {
        self.phases.remove(handle);
    }
}
