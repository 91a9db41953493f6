//! Press sequencing
//!
//! [`PressSequencer`] is the state machine behind a press effect. It turns
//! gesture events into press-in and release-out phases on an
//! [`AnimationDriver`], and turns the driver's [`PhaseEvent`]s back into
//! scale, translation and overlay updates on the group members.
//!
//! ```text
//!            Down                 Up/Cancel
//!   Idle ───────────▶ PressingIn ───────────▶ PressingInPendingRelease
//!    ▲                    │                             │
//!    │                    │ PressInComplete             │ PressInComplete
//!    │                    ▼                             │
//!    │                  Held ──── Up/Cancel ───┐        │
//!    │                                         ▼        ▼
//!    └────────── ReleaseOutComplete ───────── ReleasingOut
//! ```
//!
//! A press that arrives while a phase is still running is suppressed for
//! the whole gesture: it starts nothing and its release is ignored.

use pressfx_animation::{
    AnimationDriver, AnimationPlan, MemberFrame, Phase, PhaseEvent, PhaseEventKind, PhaseHandle,
};
use pressfx_core::{GestureEvent, GestureKind, TargetId, ViewHandle};

use crate::config::{PressConfig, PressPolicy};
use crate::foreground::ForegroundCoordinator;
use crate::group::TargetGroup;

/// Haptic pulse played when a press settles while still touching
const HAPTIC_DURATION_MS: u32 = 100;
const HAPTIC_AMPLITUDE: u8 = 255;

/// Where a press effect is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SequencerState {
    /// Members at rest, overlay transparent
    #[default]
    Idle,
    /// Press-in running
    PressingIn,
    /// Press-in finished, waiting for the release
    Held,
    /// Release-out running
    ReleasingOut,
    /// Press-in running and the gesture already ended
    PressingInPendingRelease,
}

impl SequencerState {
    /// Whether a phase is expected to be running in this state
    pub fn is_animating(&self) -> bool {
        matches!(
            self,
            SequencerState::PressingIn
                | SequencerState::ReleasingOut
                | SequencerState::PressingInPendingRelease
        )
    }
}

/// Input to the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressEvent {
    GestureDown,
    GestureMove { pressed: bool },
    GestureUp,
    GestureCancel,
    PressInComplete,
    ReleaseOutComplete,
}

impl From<GestureKind> for PressEvent {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Down => PressEvent::GestureDown,
            GestureKind::Move { pressed } => PressEvent::GestureMove { pressed },
            GestureKind::Up => PressEvent::GestureUp,
            GestureKind::Cancel => PressEvent::GestureCancel,
        }
    }
}

/// Bookkeeping for the gesture in progress, reset on every down
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureSession {
    /// The down arrived while a phase was running; the release is ignored
    pub suppressed: bool,
    /// This gesture started a press-in
    pub press_started: bool,
    /// The pointer is still down
    pub touching: bool,
}

impl GestureSession {
    fn begin() -> Self {
        Self {
            touching: true,
            ..Default::default()
        }
    }
}

/// Which tracks the release phase handle plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ReleaseMode {
    /// A release-out phase played forward
    #[default]
    Forward,
    /// The press-in phase played backwards
    ReversedPressIn,
}

/// Which of our phases a driver event belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    PressIn,
    ReleaseOut,
}

/// Press state machine for one target group
pub struct PressSequencer<V: ViewHandle> {
    group: TargetGroup<V>,
    config: PressConfig,
    foreground: ForegroundCoordinator,
    plan: Option<AnimationPlan>,
    /// Plan invalidated while a phase was running; dropped when it ends
    plan_stale: bool,
    state: SequencerState,
    gesture: GestureSession,
    waiting_for_release: bool,
    press_in: Option<PhaseHandle>,
    release_out: Option<PhaseHandle>,
    release_mode: ReleaseMode,
    touch_target: Option<TargetId>,
}

impl<V: ViewHandle> PressSequencer<V> {
    pub fn new(group: TargetGroup<V>, config: PressConfig) -> Self {
        let foreground = ForegroundCoordinator::from_config(&config);
        Self {
            group,
            config,
            foreground,
            plan: None,
            plan_stale: false,
            state: SequencerState::Idle,
            gesture: GestureSession::default(),
            waiting_for_release: false,
            press_in: None,
            release_out: None,
            release_mode: ReleaseMode::Forward,
            touch_target: None,
        }
    }

    /// Only accept gestures from this target
    pub fn with_touch_target(mut self, target: TargetId) -> Self {
        self.touch_target = Some(target);
        self
    }

    pub fn set_touch_target(&mut self, target: Option<TargetId>) {
        self.touch_target = target;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    pub fn policy(&self) -> PressPolicy {
        self.config.policy
    }

    pub fn group(&self) -> &TargetGroup<V> {
        &self.group
    }

    /// Mutable access to the members.
    ///
    /// Call [`PressSequencer::invalidate_plan`] after changing membership.
    pub fn group_mut(&mut self) -> &mut TargetGroup<V> {
        &mut self.group
    }

    pub fn gesture(&self) -> &GestureSession {
        &self.gesture
    }

    pub fn overlay_alpha(&self) -> u8 {
        self.foreground.alpha()
    }

    pub fn is_waiting_for_release(&self) -> bool {
        self.waiting_for_release
    }

    pub fn plan(&self) -> Option<&AnimationPlan> {
        self.plan.as_ref()
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Build the plan and attach the overlay ahead of the first press.
    ///
    /// Returns false while the primary is not measured; presses retry.
    pub fn prepare(&mut self) -> bool {
        if !self.ensure_plan() {
            return false;
        }
        self.foreground.attach(self.group.primary_mut());
        true
    }

    /// Discard the plan after a layout change.
    ///
    /// While a phase runs the current plan keeps driving it and is dropped
    /// when the phase ends.
    pub fn invalidate_plan(&mut self) {
        if self.state.is_animating() {
            tracing::debug!("PressSequencer: plan marked stale ({:?})", self.state);
            self.plan_stale = true;
        } else {
            tracing::debug!("PressSequencer: plan invalidated");
            self.plan = None;
            self.plan_stale = false;
        }
    }

    /// Stop running phases and return to rest immediately.
    ///
    /// The handles are discarded, so the driver's later `Cancelled` events
    /// are ignored.
    pub fn cancel<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        for handle in [self.press_in, self.release_out].into_iter().flatten() {
            if driver.is_running(handle) {
                driver.cancel(handle);
            }
        }
        if self.state != SequencerState::Idle {
            tracing::debug!("PressSequencer: cancelled in {:?}, snapping to rest", self.state);
            self.snap_to_rest();
            self.reset_to_idle(driver);
        }
    }

    /// Tear down: stop phases, drop the plan, and leave members at rest.
    ///
    /// Must be called by the host when the owning element goes away.
    pub fn dispose<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        tracing::debug!("PressSequencer: dispose in {:?}", self.state);
        for handle in [self.press_in, self.release_out].into_iter().flatten() {
            if driver.is_running(handle) {
                driver.cancel(handle);
            }
        }
        self.snap_to_rest();
        self.reset_to_idle(driver);
        self.plan = None;
        self.plan_stale = false;
        self.gesture = GestureSession::default();
        self.foreground.detach();
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Feed a gesture event from the host
    pub fn handle_gesture<D: AnimationDriver + ?Sized>(
        &mut self,
        event: GestureEvent,
        driver: &mut D,
    ) {
        if let Some(target) = self.touch_target {
            if event.source != target {
                tracing::trace!(
                    "PressSequencer: ignoring gesture from {} (listening to {})",
                    event.source,
                    target
                );
                return;
            }
        }
        self.handle(event.kind.into(), driver);
    }

    /// Feed a driver event from the host
    pub fn handle_phase_event<D: AnimationDriver + ?Sized>(
        &mut self,
        event: PhaseEvent,
        driver: &mut D,
    ) {
        let role = if Some(event.handle) == self.press_in {
            Role::PressIn
        } else if Some(event.handle) == self.release_out {
            Role::ReleaseOut
        } else {
            tracing::trace!("PressSequencer: ignoring event for foreign {} phase", event.phase);
            return;
        };
        if role == Role::PressIn
            && !matches!(
                self.state,
                SequencerState::PressingIn | SequencerState::PressingInPendingRelease
            )
        {
            tracing::trace!("PressSequencer: ignoring press-in event in {:?}", self.state);
            return;
        }

        match event.kind {
            PhaseEventKind::Progress { eased, .. } => self.apply_progress(role, eased),
            PhaseEventKind::Completed => match role {
                Role::PressIn => {
                    self.apply_progress(role, 1.0);
                    self.handle(PressEvent::PressInComplete, driver);
                }
                Role::ReleaseOut => {
                    let end = match self.release_mode {
                        ReleaseMode::Forward => 1.0,
                        ReleaseMode::ReversedPressIn => 0.0,
                    };
                    self.apply_progress(role, end);
                    self.handle(PressEvent::ReleaseOutComplete, driver);
                }
            },
            PhaseEventKind::Cancelled => {
                tracing::debug!(
                    "PressSequencer: {} cancelled in {:?}",
                    event.phase,
                    self.state
                );
                self.snap_to_rest();
                self.reset_to_idle(driver);
            }
        }
    }

    /// Advance the state machine
    pub fn handle<D: AnimationDriver + ?Sized>(&mut self, event: PressEvent, driver: &mut D) {
        let before = self.state;
        match event {
            PressEvent::GestureDown => self.on_down(driver),
            PressEvent::GestureMove { pressed } => self.on_move(pressed, driver),
            PressEvent::GestureUp | PressEvent::GestureCancel => self.on_release(driver),
            PressEvent::PressInComplete => self.on_press_in_complete(driver),
            PressEvent::ReleaseOutComplete => self.on_release_out_complete(driver),
        }
        if self.state != before {
            tracing::debug!(
                "PressSequencer: {:?} -> {:?} on {:?}",
                before,
                self.state,
                event
            );
        }
    }

    fn on_down<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        self.gesture = GestureSession::begin();
        if self.config.policy == PressPolicy::Deferred {
            return;
        }
        match self.state {
            SequencerState::Idle => self.start_press_in(driver),
            SequencerState::Held => {}
            _ if self.phase_running(driver) => {
                tracing::debug!("PressSequencer: press suppressed in {:?}", self.state);
                self.gesture.suppressed = true;
            }
            _ => {
                tracing::warn!(
                    "PressSequencer: no phase running in {:?}, restarting from rest",
                    self.state
                );
                self.snap_to_rest();
                self.reset_to_idle(driver);
                self.start_press_in(driver);
            }
        }
    }

    fn on_move<D: AnimationDriver + ?Sized>(&mut self, pressed: bool, driver: &mut D) {
        if self.config.policy != PressPolicy::Deferred || !pressed {
            return;
        }
        if self.gesture.press_started || self.gesture.suppressed {
            return;
        }
        if self.state == SequencerState::Idle {
            self.start_press_in(driver);
        }
    }

    fn on_release<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        self.gesture.touching = false;
        if self.gesture.suppressed {
            tracing::debug!("PressSequencer: release of suppressed press ignored");
            return;
        }
        match self.state {
            SequencerState::Idle | SequencerState::ReleasingOut => {}
            SequencerState::PressingIn => {
                self.waiting_for_release = true;
                self.state = SequencerState::PressingInPendingRelease;
            }
            SequencerState::PressingInPendingRelease => {}
            SequencerState::Held => self.start_release(driver),
        }
    }

    fn on_press_in_complete<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        if !matches!(
            self.state,
            SequencerState::PressingIn | SequencerState::PressingInPendingRelease
        ) {
            return;
        }
        self.drop_stale_plan();

        if self.waiting_for_release {
            self.waiting_for_release = false;
            self.start_release(driver);
            return;
        }

        self.state = SequencerState::Held;
        if self.config.haptics && self.gesture.touching {
            if let Some(primary) = self.group.primary_mut() {
                primary.perform_haptic_feedback(HAPTIC_DURATION_MS, HAPTIC_AMPLITUDE);
            }
        }
    }

    fn on_release_out_complete<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        if self.state != SequencerState::ReleasingOut {
            return;
        }
        self.foreground
            .on_phase_end(Phase::ReleaseOut, self.group.primary_mut());
        self.reset_to_idle(driver);
    }

    // =========================================================================
    // Phases
    // =========================================================================

    /// Build the plan if there is none. Returns whether a plan is available.
    fn ensure_plan(&mut self) -> bool {
        if self.plan.is_some() {
            return true;
        }
        let Some(primary) = self.group.resolve_primary() else {
            tracing::debug!("PressSequencer: no measured primary yet");
            return false;
        };
        let snapshot = self.group.snapshot();
        self.plan = AnimationPlan::build(primary, &snapshot, &self.config.plan_settings());
        self.plan.is_some()
    }

    fn start_press_in<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        if !self.ensure_plan() {
            return;
        }
        let Some(plan) = self.plan.as_ref() else {
            return;
        };
        let request = plan.press_in().request();

        self.discard_handles(driver);
        self.foreground.attach(self.group.primary_mut());
        self.press_in = Some(driver.start_phase(request));
        self.release_mode = ReleaseMode::Forward;
        self.waiting_for_release = false;
        self.gesture.press_started = true;
        self.state = SequencerState::PressingIn;
    }

    fn start_release<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        if self.plan.is_none() {
            tracing::warn!("PressSequencer: plan missing at release, rebuilding");
            if !self.ensure_plan() {
                tracing::warn!("PressSequencer: rebuild failed, snapping to rest");
                self.snap_to_rest();
                self.reset_to_idle(driver);
                return;
            }
            if driver.supports_reverse() {
                if let Some(handle) = self.press_in.take() {
                    match driver.reverse(handle) {
                        Some(reversed) => {
                            self.release_out = Some(reversed);
                            self.release_mode = ReleaseMode::ReversedPressIn;
                            self.state = SequencerState::ReleasingOut;
                            return;
                        }
                        None => driver.discard(handle),
                    }
                }
            }
        }

        let Some(plan) = self.plan.as_ref() else {
            return;
        };
        let request = plan.release_out().request();
        if let Some(stale) = self.release_out.take() {
            driver.discard(stale);
        }
        if let Some(press_in) = self.press_in {
            if driver.is_running(press_in) {
                driver.cancel(press_in);
            }
        }
        self.release_out = Some(driver.start_phase(request));
        self.release_mode = ReleaseMode::Forward;
        self.state = SequencerState::ReleasingOut;
    }

    /// Push one frame of a phase to every member and the overlay
    fn apply_progress(&mut self, role: Role, eased: f32) {
        let (tracks, alpha_phase) = match (role, self.release_mode) {
            (Role::PressIn, _) => (Phase::PressIn, Phase::PressIn),
            (Role::ReleaseOut, ReleaseMode::Forward) => (Phase::ReleaseOut, Phase::ReleaseOut),
            (Role::ReleaseOut, ReleaseMode::ReversedPressIn) => (Phase::PressIn, Phase::PressIn),
        };
        let Some(plan) = self.plan.as_ref() else {
            return;
        };
        for (target, frame) in plan.phase(tracks).frames(eased) {
            if let Some(view) = self.group.get_mut(target) {
                apply_frame(view, frame);
            }
        }
        self.foreground
            .on_progress(alpha_phase, eased, self.group.primary_mut());
    }

    fn phase_running<D: AnimationDriver + ?Sized>(&self, driver: &D) -> bool {
        [self.press_in, self.release_out]
            .into_iter()
            .flatten()
            .any(|handle| driver.is_running(handle))
    }

    fn snap_to_rest(&mut self) {
        for view in self.group.iter_mut() {
            apply_frame(view, MemberFrame::REST);
        }
    }

    fn reset_to_idle<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        self.discard_handles(driver);
        self.state = SequencerState::Idle;
        self.waiting_for_release = false;
        self.release_mode = ReleaseMode::Forward;
        self.foreground.reset(self.group.primary_mut());
        self.drop_stale_plan();
    }

    fn discard_handles<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        for handle in [self.press_in.take(), self.release_out.take()]
            .into_iter()
            .flatten()
        {
            driver.discard(handle);
        }
    }

    fn drop_stale_plan(&mut self) {
        if self.plan_stale {
            tracing::debug!("PressSequencer: dropping stale plan");
            self.plan = None;
            self.plan_stale = false;
        }
    }
}

fn apply_frame<V: ViewHandle>(view: &mut V, frame: MemberFrame) {
    view.set_scale(frame.scale.x, frame.scale.y);
    view.set_translation(frame.translation.x, frame.translation.y);
}
