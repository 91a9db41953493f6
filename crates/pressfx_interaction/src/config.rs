//! Press effect configuration
//!
//! A config can be built in code with the `with_*` setters or loaded from
//! TOML. Every key is optional:
//!
//! ```toml
//! scale_ratio = 0.9
//! down_duration_ms = 180
//! up_duration_ms = 240
//! down_curve = [0.33, 0.0, 0.67, 1.0]
//! up_curve = "ease-out"
//! need_foreground = true
//! overlay_color = "#1F000000"
//! circular_overlay = false
//! policy = "deferred"
//! haptics = false
//!
//! [overlay_corner_radii]
//! top_left = 12.0
//! top_right = 12.0
//! bottom_right = 12.0
//! bottom_left = 12.0
//! ```

use std::fs;
use std::path::Path;

use pressfx_animation::{ControlPoints, PlanSettings};
use pressfx_core::{Color, CornerRadius, Overlay, OverlayShape};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

/// Overlay color used when neither a drawable nor a color is configured
pub const DEFAULT_OVERLAY_ARGB: u32 = 0x0F00_0000;

/// Which gesture event starts the press-in phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressPolicy {
    /// Press-in starts on touch-down
    #[default]
    Immediate,
    /// Press-in starts on the first move while the source is still pressed
    Deferred,
}

/// Configuration for one press effect
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PressConfig {
    /// Scale reached at the end of press-in, in (0, 1]. 1.0 disables scaling.
    #[serde(default = "default_scale_ratio")]
    pub scale_ratio: f32,
    #[serde(default = "default_duration_ms")]
    pub down_duration_ms: u32,
    #[serde(default = "default_duration_ms")]
    pub up_duration_ms: u32,
    /// Press-in curve: `[x1, y1, x2, y2]` or a preset name
    #[serde(default, deserialize_with = "deserialize_curve")]
    pub down_curve: ControlPoints,
    /// Release-out curve: `[x1, y1, x2, y2]` or a preset name
    #[serde(default, deserialize_with = "deserialize_curve")]
    pub up_curve: ControlPoints,
    /// Whether to fade an overlay over the primary target
    #[serde(default = "default_true")]
    pub need_foreground: bool,
    /// Host drawable used as overlay; wins over `overlay_color`
    #[serde(default)]
    pub overlay_drawable: Option<String>,
    #[serde(default)]
    pub overlay_color: Option<Color>,
    #[serde(default = "default_corner_radii")]
    pub overlay_corner_radii: CornerRadius,
    /// Use an oval instead of a rounded rectangle for color overlays
    #[serde(default)]
    pub circular_overlay: bool,
    #[serde(default)]
    pub policy: PressPolicy,
    /// Haptic pulse when press-in completes while still touching
    #[serde(default = "default_true")]
    pub haptics: bool,
}

fn default_scale_ratio() -> f32 {
    0.95
}

fn default_duration_ms() -> u32 {
    200
}

fn default_true() -> bool {
    true
}

fn default_corner_radii() -> CornerRadius {
    CornerRadius::uniform(8.0)
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            scale_ratio: default_scale_ratio(),
            down_duration_ms: default_duration_ms(),
            up_duration_ms: default_duration_ms(),
            down_curve: ControlPoints::default(),
            up_curve: ControlPoints::default(),
            need_foreground: true,
            overlay_drawable: None,
            overlay_color: None,
            overlay_corner_radii: default_corner_radii(),
            circular_overlay: false,
            policy: PressPolicy::default(),
            haptics: true,
        }
    }
}

/// Curves may be written as control points or as a preset name
#[derive(Deserialize)]
#[serde(untagged)]
enum CurveSpec {
    Points(ControlPoints),
    Named(String),
}

fn deserialize_curve<'de, D>(deserializer: D) -> std::result::Result<ControlPoints, D::Error>
where
    D: Deserializer<'de>,
{
    match CurveSpec::deserialize(deserializer)? {
        CurveSpec::Points(points) => Ok(points),
        CurveSpec::Named(name) => ControlPoints::named(&name).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown curve preset '{name}'"))
        }),
    }
}

impl PressConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PressConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded press config from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_ratio > 0.0 && self.scale_ratio <= 1.0) {
            return Err(ConfigError::InvalidScaleRatio(self.scale_ratio));
        }
        for (field, curve) in [("down_curve", self.down_curve), ("up_curve", self.up_curve)] {
            if !curve.is_valid() {
                return Err(ConfigError::InvalidCurve {
                    field,
                    points: curve.into(),
                });
            }
        }
        if self.down_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration("down_duration_ms"));
        }
        if self.up_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration("up_duration_ms"));
        }
        Ok(())
    }

    /// The parts of this config that shape an animation plan
    pub fn plan_settings(&self) -> PlanSettings {
        PlanSettings {
            scale_ratio: self.scale_ratio,
            down_curve: self.down_curve,
            up_curve: self.up_curve,
            down_duration_ms: self.down_duration_ms,
            up_duration_ms: self.up_duration_ms,
        }
    }

    /// Overlay to install: drawable, else color, else the default tint
    pub fn resolve_overlay(&self) -> Overlay {
        if let Some(drawable) = &self.overlay_drawable {
            return Overlay::Drawable(drawable.clone());
        }
        let color = self
            .overlay_color
            .unwrap_or_else(|| Color::from_argb(DEFAULT_OVERLAY_ARGB));
        let shape = if self.circular_overlay {
            OverlayShape::Oval
        } else {
            OverlayShape::RoundRect(self.overlay_corner_radii)
        };
        Overlay::Fill { color, shape }
    }

    // =========================================================================
    // Builder-style setters
    // =========================================================================

    pub fn with_scale_ratio(mut self, scale_ratio: f32) -> Self {
        self.scale_ratio = scale_ratio;
        self
    }

    pub fn with_durations(mut self, down_ms: u32, up_ms: u32) -> Self {
        self.down_duration_ms = down_ms;
        self.up_duration_ms = up_ms;
        self
    }

    pub fn with_curves(mut self, down: ControlPoints, up: ControlPoints) -> Self {
        self.down_curve = down;
        self.up_curve = up;
        self
    }

    pub fn with_need_foreground(mut self, need_foreground: bool) -> Self {
        self.need_foreground = need_foreground;
        self
    }

    pub fn with_overlay_drawable(mut self, drawable: impl Into<String>) -> Self {
        self.overlay_drawable = Some(drawable.into());
        self
    }

    pub fn with_overlay_color(mut self, color: Color) -> Self {
        self.overlay_color = Some(color);
        self
    }

    pub fn with_corner_radii(mut self, radii: CornerRadius) -> Self {
        self.overlay_corner_radii = radii;
        self
    }

    pub fn with_circular_overlay(mut self, circular: bool) -> Self {
        self.circular_overlay = circular;
        self
    }

    pub fn with_policy(mut self, policy: PressPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_haptics(mut self, haptics: bool) -> Self {
        self.haptics = haptics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PressConfig::default();
        assert_eq!(config.scale_ratio, 0.95);
        assert_eq!(config.down_duration_ms, 200);
        assert_eq!(config.up_duration_ms, 200);
        assert_eq!(config.down_curve, ControlPoints::new(0.33, 0.0, 0.67, 1.0));
        assert!(config.need_foreground);
        assert_eq!(config.policy, PressPolicy::Immediate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = PressConfig::from_toml_str("").unwrap();
        assert_eq!(config, PressConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = PressConfig::from_toml_str(
            r##"
            scale_ratio = 0.9
            down_duration_ms = 180
            up_curve = "ease-out"
            down_curve = [0.2, 0.0, 0.4, 1.0]
            overlay_color = "#1F000000"
            policy = "deferred"
            haptics = false

            [overlay_corner_radii]
            top_left = 4.0
            top_right = 4.0
            bottom_right = 0.0
            bottom_left = 0.0
            "##,
        )
        .unwrap();

        assert_eq!(config.scale_ratio, 0.9);
        assert_eq!(config.down_duration_ms, 180);
        assert_eq!(config.up_duration_ms, 200);
        assert_eq!(config.up_curve, ControlPoints::EASE_OUT);
        assert_eq!(config.down_curve, ControlPoints::new(0.2, 0.0, 0.4, 1.0));
        assert_eq!(config.overlay_color.unwrap().to_argb(), 0x1F00_0000);
        assert_eq!(config.policy, PressPolicy::Deferred);
        assert!(!config.haptics);
        assert_eq!(config.overlay_corner_radii.bottom_left, 0.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            PressConfig::from_toml_str("scale_ratio = 0.0"),
            Err(ConfigError::InvalidScaleRatio(_))
        ));
        assert!(matches!(
            PressConfig::from_toml_str("scale_ratio = 1.5"),
            Err(ConfigError::InvalidScaleRatio(_))
        ));
        assert!(matches!(
            PressConfig::from_toml_str("up_curve = [1.2, 0.0, 0.5, 1.0]"),
            Err(ConfigError::InvalidCurve {
                field: "up_curve",
                ..
            })
        ));
        assert!(matches!(
            PressConfig::from_toml_str("down_duration_ms = 0"),
            Err(ConfigError::InvalidDuration("down_duration_ms"))
        ));
        assert!(matches!(
            PressConfig::from_toml_str("down_curve = \"wobbly\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PressConfig::from_toml_str("overlay_color = \"#XYZ\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_scale_ratio_one_is_allowed() {
        assert!(PressConfig::default().with_scale_ratio(1.0).validate().is_ok());
    }

    #[test]
    fn test_overlay_resolution_order() {
        let default = PressConfig::default().resolve_overlay();
        assert_eq!(
            default,
            Overlay::Fill {
                color: Color::from_argb(DEFAULT_OVERLAY_ARGB),
                shape: OverlayShape::RoundRect(CornerRadius::uniform(8.0)),
            }
        );

        let colored = PressConfig::default()
            .with_overlay_color(Color::from_argb(0x4F00_0000))
            .with_circular_overlay(true)
            .resolve_overlay();
        assert_eq!(
            colored,
            Overlay::Fill {
                color: Color::from_argb(0x4F00_0000),
                shape: OverlayShape::Oval,
            }
        );

        let drawable = PressConfig::default()
            .with_overlay_color(Color::WHITE)
            .with_overlay_drawable("press_mask")
            .resolve_overlay();
        assert_eq!(drawable, Overlay::Drawable("press_mask".to_string()));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scale_ratio = 0.8\npolicy = \"immediate\"").unwrap();
        let config = PressConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.scale_ratio, 0.8);

        let missing = PressConfig::load_from_path(Path::new("/nonexistent/press.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PressConfig::default()
            .with_policy(PressPolicy::Deferred)
            .with_overlay_color(Color::from_argb(0x2A10_2030));
        let text = config.to_toml_string().unwrap();
        assert_eq!(PressConfig::from_toml_str(&text).unwrap(), config);
    }
}
