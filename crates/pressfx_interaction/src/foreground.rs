//! Foreground overlay coordination
//!
//! The overlay lives on the primary target. Its opacity tracks phase
//! progress: it fades in during press-in and out during release-out.

use pressfx_animation::Phase;
use pressfx_core::{Overlay, ViewHandle};

use crate::config::PressConfig;

/// Fully opaque overlay
const OPAQUE: f32 = 255.0;

/// Owns the overlay opacity for one press effect
#[derive(Clone, Debug, PartialEq)]
pub struct ForegroundCoordinator {
    enabled: bool,
    overlay: Overlay,
    alpha: u8,
    attached: bool,
}

impl ForegroundCoordinator {
    pub fn from_config(config: &PressConfig) -> Self {
        Self {
            enabled: config.need_foreground,
            overlay: config.resolve_overlay(),
            alpha: 0,
            attached: false,
        }
    }

    /// Opacity for a phase at eased progress `progress`
    pub fn alpha_for(phase: Phase, progress: f32) -> u8 {
        let progress = progress.clamp(0.0, 1.0);
        let level = match phase {
            Phase::PressIn => progress,
            Phase::ReleaseOut => 1.0 - progress,
        };
        (OPAQUE * level).round() as u8
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Install the overlay on the primary unless it already has one
    pub fn attach<V: ViewHandle>(&mut self, primary: Option<&mut V>) {
        if !self.enabled || self.attached {
            return;
        }
        let Some(primary) = primary else {
            return;
        };
        if primary.overlay().is_none() {
            tracing::debug!("Attaching press overlay to {}", primary.id());
            primary.set_overlay(self.overlay.clone());
            primary.set_overlay_alpha(0);
            self.alpha = 0;
        }
        self.attached = true;
    }

    pub fn on_progress<V: ViewHandle>(&mut self, phase: Phase, progress: f32, primary: Option<&mut V>) {
        if !self.enabled {
            return;
        }
        let Some(primary) = primary else {
            return;
        };
        self.alpha = Self::alpha_for(phase, progress);
        primary.set_overlay_alpha(self.alpha);
    }

    /// A phase stopped, normally or by cancellation
    pub fn on_phase_end<V: ViewHandle>(&mut self, phase: Phase, primary: Option<&mut V>) {
        if phase == Phase::ReleaseOut {
            self.reset(primary);
        }
    }

    /// Force the overlay transparent
    pub fn reset<V: ViewHandle>(&mut self, primary: Option<&mut V>) {
        if !self.enabled {
            return;
        }
        self.alpha = 0;
        if let Some(primary) = primary {
            primary.set_overlay_alpha(0);
        }
    }

    /// Forget the attachment so the next press re-checks the primary
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockView;
    use pressfx_core::Color;

    #[test]
    fn test_alpha_for_phases() {
        assert_eq!(ForegroundCoordinator::alpha_for(Phase::PressIn, 0.0), 0);
        assert_eq!(ForegroundCoordinator::alpha_for(Phase::PressIn, 0.5), 128);
        assert_eq!(ForegroundCoordinator::alpha_for(Phase::PressIn, 1.0), 255);
        assert_eq!(ForegroundCoordinator::alpha_for(Phase::ReleaseOut, 0.0), 255);
        assert_eq!(ForegroundCoordinator::alpha_for(Phase::ReleaseOut, 1.0), 0);
        assert_eq!(ForegroundCoordinator::alpha_for(Phase::PressIn, 1.5), 255);
    }

    #[test]
    fn test_attach_installs_once() {
        let mut view = MockView::new(1, (0.0, 0.0), (10.0, 10.0));
        let mut foreground = ForegroundCoordinator::from_config(&PressConfig::default());

        foreground.attach(Some(&mut view));
        foreground.attach(Some(&mut view));
        assert!(foreground.is_attached());
        assert_eq!(view.overlay_installs(), 1);
        assert_eq!(view.alpha(), 0);
        assert_eq!(view.installed_overlay().as_ref(), Some(foreground.overlay()));
    }

    #[test]
    fn test_attach_keeps_existing_overlay() {
        let mut view = MockView::new(1, (0.0, 0.0), (10.0, 10.0));
        let existing = Overlay::Drawable("host_ripple".to_string());
        view.set_overlay(existing.clone());

        let config = PressConfig::default().with_overlay_color(Color::WHITE);
        let mut foreground = ForegroundCoordinator::from_config(&config);
        foreground.attach(Some(&mut view));

        assert_eq!(view.installed_overlay(), Some(existing));
        assert_eq!(view.overlay_installs(), 1);
    }

    #[test]
    fn test_progress_and_release_end() {
        let mut view = MockView::new(1, (0.0, 0.0), (10.0, 10.0));
        let mut foreground = ForegroundCoordinator::from_config(&PressConfig::default());

        foreground.on_progress(Phase::PressIn, 1.0, Some(&mut view));
        assert_eq!(view.alpha(), 255);
        foreground.on_phase_end(Phase::PressIn, Some(&mut view));
        assert_eq!(foreground.alpha(), 255);

        foreground.on_progress(Phase::ReleaseOut, 0.25, Some(&mut view));
        assert_eq!(view.alpha(), 191);
        foreground.on_phase_end(Phase::ReleaseOut, Some(&mut view));
        assert_eq!(view.alpha(), 0);
        assert_eq!(foreground.alpha(), 0);
    }

    #[test]
    fn test_disabled_is_inert() {
        let mut view = MockView::new(1, (0.0, 0.0), (10.0, 10.0));
        let config = PressConfig::default().with_need_foreground(false);
        let mut foreground = ForegroundCoordinator::from_config(&config);

        foreground.attach(Some(&mut view));
        foreground.on_progress(Phase::PressIn, 0.8, Some(&mut view));
        foreground.reset(Some(&mut view));

        assert_eq!(view.overlay_installs(), 0);
        assert!(view.alpha_history().is_empty());
        assert_eq!(foreground.alpha(), 0);
    }

    #[test]
    fn test_missing_primary_is_ignored() {
        let mut foreground = ForegroundCoordinator::from_config(&PressConfig::default());
        foreground.attach::<MockView>(None);
        foreground.on_progress::<MockView>(Phase::PressIn, 0.5, None);
        assert!(!foreground.is_attached());
        assert_eq!(foreground.alpha(), 0);
    }
}
