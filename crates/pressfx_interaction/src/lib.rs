//! PressFX Interaction Layer
//!
//! Turns pointer gestures into a two-phase press effect on a group of
//! targets:
//!
//! - [`PressSequencer`] - the press state machine (Immediate or Deferred policy)
//! - [`TargetGroup`] - the targets animated together, with one primary
//! - [`ForegroundCoordinator`] - overlay attachment and opacity
//! - [`PressConfig`] - TOML-backed configuration
//!
//! # Example
//!
//! ```ignore
//! use pressfx_animation::FrameDriver;
//! use pressfx_interaction::{PressConfig, PressSequencer, TargetGroup};
//!
//! let mut group = TargetGroup::new();
//! group.add_primary(card);
//! group.add(icon);
//!
//! let mut sequencer = PressSequencer::new(group, PressConfig::default());
//! let mut driver = FrameDriver::new();
//!
//! sequencer.handle_gesture(event, &mut driver);
//! for phase_event in driver.tick(16.0) {
//!     sequencer.handle_phase_event(phase_event, &mut driver);
//! }
//!
//! // Required when the owning element is torn down
//! sequencer.dispose(&mut driver);
//! ```

pub mod config;
pub mod error;
pub mod foreground;
pub mod group;
pub mod sequencer;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{PressConfig, PressPolicy};
pub use error::{ConfigError, Result};
pub use foreground::ForegroundCoordinator;
pub use group::TargetGroup;
pub use sequencer::{GestureSession, PressEvent, PressSequencer, SequencerState};
