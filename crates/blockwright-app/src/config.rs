//! Editor configuration.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use blockwright_core::{ColorIndex, Error, Palette, Result};
use blockwright_input::GestureConfig;
use blockwright_render::{CameraOrbitState, DampingConfig, OrbitLimits};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Target translation per dragged pixel, per unit of camera distance.
pub const DEFAULT_PAN_SPEED: f32 = 0.001;

/// Editor configuration.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Screen size in pixels.
    pub viewport: [u32; 2],
    pub gesture: GestureConfig,
    pub orbit_limits: OrbitLimits,
    pub initial_orbit: CameraOrbitState,
    pub pan_speed: f32,
    /// Camera easing; `None` applies gestures immediately.
    pub damping: Option<DampingConfig>,
    pub initial_color: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: [1280, 720],
            gesture: GestureConfig::default(),
            orbit_limits: OrbitLimits::default(),
            initial_orbit: CameraOrbitState::default(),
            pan_speed: DEFAULT_PAN_SPEED,
            damping: None,
            initial_color: 0,
        }
    }
}

impl EditorConfig {
    /// Set the viewport size.
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = [width, height];
        self
    }

    #[must_use]
    pub const fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    #[must_use]
    pub const fn with_orbit_limits(mut self, limits: OrbitLimits) -> Self {
        self.orbit_limits = limits;
        self
    }

    #[must_use]
    pub const fn with_initial_orbit(mut self, orbit: CameraOrbitState) -> Self {
        self.initial_orbit = orbit;
        self
    }

    #[must_use]
    pub const fn with_pan_speed(mut self, pan_speed: f32) -> Self {
        self.pan_speed = pan_speed;
        self
    }

    /// Enable camera easing with the given per-tick factor.
    #[must_use]
    pub const fn with_damping(mut self, factor: f32) -> Self {
        self.damping = Some(DampingConfig { factor });
        self
    }

    #[must_use]
    pub const fn with_initial_color(mut self, color: u8) -> Self {
        self.initial_color = color;
        self
    }

    /// Validated initial colour.
    pub fn initial_color(&self) -> Result<ColorIndex> {
        Palette::default().index(usize::from(self.initial_color))
    }

    /// Check every field for values the editor cannot work with.
    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(err) = &result {
            warn!(%err, "rejected editor configuration");
        }
        result
    }

    fn check(&self) -> Result<()> {
        if self.viewport.contains(&0) {
            return invalid(format!("viewport {:?} has a zero side", self.viewport));
        }

        let g = &self.gesture;
        if !(g.drag_threshold_px.is_finite() && g.drag_threshold_px >= 0.0) {
            return invalid(format!("drag threshold {} px", g.drag_threshold_px));
        }
        if !g.rotate_sensitivity.is_finite() || !g.wheel_zoom_speed.is_finite() {
            return invalid("gesture sensitivities must be finite".to_string());
        }

        let l = &self.orbit_limits;
        if !(l.min_distance > 0.0 && l.min_distance <= l.max_distance && l.max_distance.is_finite())
        {
            return invalid(format!(
                "distance limits {}..{}",
                l.min_distance, l.max_distance
            ));
        }
        if !(l.pitch_epsilon > 0.0 && l.pitch_epsilon < FRAC_PI_2) {
            return invalid(format!("pitch epsilon {}", l.pitch_epsilon));
        }

        let o = &self.initial_orbit;
        if !(o.target.is_finite() && o.distance.is_finite() && o.yaw.is_finite() && o.pitch.is_finite())
        {
            return invalid("initial orbit must be finite".to_string());
        }

        if !(self.pan_speed.is_finite() && self.pan_speed >= 0.0) {
            return invalid(format!("pan speed {}", self.pan_speed));
        }
        if let Some(damping) = self.damping {
            if !(damping.factor > 0.0 && damping.factor <= 1.0) {
                return invalid(format!("damping factor {}", damping.factor));
            }
        }

        self.initial_color().map(|_| ())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

fn invalid(reason: String) -> Result<()> {
    Err(Error::InvalidConfig(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(
            r#"{ "pan_speed": 0.002, "gesture": { "two_finger_roll": false } }"#,
        )
        .unwrap();
        assert!((config.pan_speed - 0.002).abs() < f32::EPSILON);
        assert!(!config.gesture.two_finger_roll);
        assert_eq!(config.gesture.tap_budget_ms, 400);
        assert_eq!(config.orbit_limits, OrbitLimits::default());
    }

    #[test]
    fn json_round_trip() {
        let config = EditorConfig::default().with_damping(0.1).with_viewport(640, 480);
        let parsed = EditorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn rejects_bad_values() {
        let inverted = EditorConfig::default().with_orbit_limits(OrbitLimits {
            min_distance: 60.0,
            ..OrbitLimits::default()
        });
        assert!(matches!(inverted.validate(), Err(Error::InvalidConfig(_))));

        let zero_viewport = EditorConfig::default().with_viewport(0, 480);
        assert!(matches!(zero_viewport.validate(), Err(Error::InvalidConfig(_))));

        let damping = EditorConfig::default().with_damping(1.5);
        assert!(matches!(damping.validate(), Err(Error::InvalidConfig(_))));

        let color = EditorConfig::default().with_initial_color(4);
        assert!(matches!(
            color.validate(),
            Err(Error::ColorOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        assert!(matches!(
            EditorConfig::from_json("{ not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            EditorConfig::load("/nonexistent/blockwright.json"),
            Err(Error::Io(_))
        ));
    }
}
