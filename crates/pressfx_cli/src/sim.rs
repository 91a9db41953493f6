//! Headless gesture replay
//!
//! Runs a [`PressSequencer`] against [`FrameDriver`] with a fixed demo layout
//! and records what every member looked like after each frame.

use pressfx_animation::FrameDriver;
use pressfx_core::{
    GestureEvent, Overlay, Point, Size, TargetId, Vec2, ViewHandle, Visibility,
};
use pressfx_interaction::{PressConfig, PressSequencer, SequencerState, TargetGroup};

use crate::script::Step;

/// Frames ticked after the script ends before giving up on settling
const MAX_SETTLE_FRAMES: usize = 10_000;

pub const PRIMARY: TargetId = TargetId(1);

/// In-memory view used by the simulator
#[derive(Clone, Debug)]
pub struct SimView {
    pub id: TargetId,
    pub name: &'static str,
    pub position: Point,
    pub size: Size,
    pub scale: Vec2,
    pub translation: Vec2,
    pub overlay: Option<Overlay>,
    pub alpha: u8,
    pub haptic_pulses: u32,
}

impl SimView {
    pub fn new(id: u64, name: &'static str, position: Point, size: Size) -> Self {
        Self {
            id: TargetId(id),
            name,
            position,
            size,
            scale: Vec2::ONE,
            translation: Vec2::ZERO,
            overlay: None,
            alpha: 0,
            haptic_pulses: 0,
        }
    }
}

impl ViewHandle for SimView {
    fn id(&self) -> TargetId {
        self.id
    }

    fn screen_position(&self) -> Point {
        self.position
    }

    fn size(&self) -> Size {
        self.size
    }

    fn visibility(&self) -> Visibility {
        Visibility::Visible
    }

    fn set_scale(&mut self, x: f32, y: f32) {
        self.scale = Vec2::new(x, y);
    }

    fn set_translation(&mut self, x: f32, y: f32) {
        self.translation = Vec2::new(x, y);
    }

    fn overlay(&self) -> Option<Overlay> {
        self.overlay.clone()
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    fn set_overlay_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    fn perform_haptic_feedback(&mut self, _duration_ms: u32, _amplitude: u8) {
        self.haptic_pulses += 1;
    }
}

/// A card with a leading icon and a trailing badge
pub fn demo_group() -> TargetGroup<SimView> {
    let mut group = TargetGroup::new();
    group.add_primary(SimView::new(
        1,
        "card",
        Point::new(0.0, 0.0),
        Size::new(320.0, 120.0),
    ));
    group.add(SimView::new(
        2,
        "icon",
        Point::new(16.0, 36.0),
        Size::new(48.0, 48.0),
    ));
    group.add(SimView::new(
        3,
        "badge",
        Point::new(272.0, 8.0),
        Size::new(40.0, 24.0),
    ));
    group
}

/// One member after a frame
#[derive(Clone, Debug, PartialEq)]
pub struct MemberSample {
    pub name: &'static str,
    pub scale: Vec2,
    pub translation: Vec2,
}

/// One line of simulation output
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEntry {
    Step {
        time_ms: f32,
        step: Step,
        state: SequencerState,
    },
    Frame {
        time_ms: f32,
        state: SequencerState,
        alpha: u8,
        members: Vec<MemberSample>,
    },
}

/// Summary after a replay
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub trace: Vec<TraceEntry>,
    pub final_state: SequencerState,
    pub final_alpha: u8,
    pub haptic_pulses: u32,
}

pub struct Simulation {
    sequencer: PressSequencer<SimView>,
    driver: FrameDriver,
    frame_ms: f32,
    time_ms: f32,
    trace: Vec<TraceEntry>,
}

impl Simulation {
    pub fn new(config: PressConfig, frame_ms: f32) -> Self {
        Self {
            sequencer: PressSequencer::new(demo_group(), config),
            driver: FrameDriver::new(),
            frame_ms,
            time_ms: 0.0,
            trace: Vec::new(),
        }
    }

    /// Replay the steps, then keep ticking until every phase has finished
    pub fn run(mut self, steps: &[Step]) -> Outcome {
        for step in steps {
            match *step {
                Step::Gesture(kind) => {
                    self.sequencer
                        .handle_gesture(GestureEvent::new(PRIMARY, kind), &mut self.driver);
                }
                Step::Wait(ms) => self.advance(ms),
                Step::Invalidate => self.sequencer.invalidate_plan(),
            }
            self.trace.push(TraceEntry::Step {
                time_ms: self.time_ms,
                step: *step,
                state: self.sequencer.state(),
            });
        }

        let mut frames = 0;
        while self.driver.has_running() && frames < MAX_SETTLE_FRAMES {
            self.tick(self.frame_ms);
            frames += 1;
        }
        if self.driver.has_running() {
            tracing::warn!("Simulation did not settle after {} frames", MAX_SETTLE_FRAMES);
        }
        // Flush cancellations raised by the last step
        self.tick(0.0);

        self.sequencer.dispose(&mut self.driver);
        let haptic_pulses = self
            .sequencer
            .group()
            .iter()
            .map(|view| view.haptic_pulses)
            .sum();
        Outcome {
            trace: self.trace,
            final_state: self.sequencer.state(),
            final_alpha: self.sequencer.overlay_alpha(),
            haptic_pulses,
        }
    }

    fn advance(&mut self, ms: f32) {
        let mut remaining = ms;
        while remaining > 0.0 {
            let dt = remaining.min(self.frame_ms);
            self.tick(dt);
            remaining -= dt;
        }
    }

    fn tick(&mut self, dt: f32) {
        let events = self.driver.tick(dt);
        self.time_ms += dt;
        if events.is_empty() {
            return;
        }
        for event in events {
            self.sequencer.handle_phase_event(event, &mut self.driver);
        }
        self.trace.push(TraceEntry::Frame {
            time_ms: self.time_ms,
            state: self.sequencer.state(),
            alpha: self.sequencer.overlay_alpha(),
            members: self
                .sequencer
                .group()
                .iter()
                .map(|view| MemberSample {
                    name: view.name,
                    scale: view.scale,
                    translation: view.translation,
                })
                .collect(),
        });
    }
}
