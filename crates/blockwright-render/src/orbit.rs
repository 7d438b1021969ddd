//! Orbit camera model.
//!
//! The camera is parameterised by a look-at target, a distance and two
//! angles instead of a free position. All mutation goes through the
//! `apply_*` methods, which keep the state inside its [`OrbitLimits`].

use std::f32::consts::FRAC_PI_2;

use blockwright_world::Block;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Minimum camera distance from the target.
pub const DEFAULT_MIN_DISTANCE: f32 = 5.0;
/// Maximum camera distance from the target.
pub const DEFAULT_MAX_DISTANCE: f32 = 50.0;
/// Margin kept between pitch and the poles, in radians.
pub const DEFAULT_PITCH_EPSILON: f32 = 0.1;

/// Bounds an orbit state must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Gap kept between |pitch| and straight up or down, in radians.
    pub pitch_epsilon: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
            pitch_epsilon: DEFAULT_PITCH_EPSILON,
        }
    }
}

impl OrbitLimits {
    /// Largest allowed absolute pitch.
    #[inline]
    #[must_use]
    pub fn max_pitch(&self) -> f32 {
        FRAC_PI_2 - self.pitch_epsilon
    }

    /// Clamp a pitch into range. Clamps rather than wraps so the camera
    /// never flips over a pole.
    #[inline]
    #[must_use]
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(-self.max_pitch(), self.max_pitch())
    }

    /// Clamp a distance into range.
    #[inline]
    #[must_use]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }
}

/// Spherical camera state around a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOrbitState {
    /// Point the camera looks at and orbits.
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around the world up axis, unbounded.
    pub yaw: f32,
    /// Elevation above the horizontal plane.
    pub pitch: f32,
}

impl Default for CameraOrbitState {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 25.0,
            yaw: 0.8,
            pitch: 0.5,
        }
    }
}

impl CameraOrbitState {
    /// Copy of this state forced inside `limits`.
    #[must_use]
    pub fn clamped(mut self, limits: &OrbitLimits) -> Self {
        self.pitch = limits.clamp_pitch(self.pitch);
        self.distance = limits.clamp_distance(self.distance);
        self
    }

    /// Offset of the camera from the target.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.distance * Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    /// World position of the camera.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.target + self.offset()
    }

    /// Unit vector from the camera towards the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (-self.offset()).normalize_or_zero()
    }

    /// Rotate around the target.
    pub fn apply_delta(&mut self, d_yaw: f32, d_pitch: f32, limits: &OrbitLimits) {
        self.yaw += d_yaw;
        self.pitch = limits.clamp_pitch(self.pitch + d_pitch);
    }

    /// Move towards (negative) or away from (positive) the target.
    pub fn apply_zoom_delta(&mut self, d_distance: f32, limits: &OrbitLimits) {
        self.distance = limits.clamp_distance(self.distance + d_distance);
    }

    /// Slide the target sideways and vertically. Angles and distance are kept.
    ///
    /// `camera_forward` is the current viewing direction; the sideways axis is
    /// `normalize(forward × world_up)`.
    pub fn apply_pan_delta(&mut self, d_right: f32, d_up: f32, camera_forward: Vec3) {
        let right = camera_forward.cross(Vec3::Y).normalize_or_zero();
        self.target += right * d_right + Vec3::Y * d_up;
    }

    /// Point the target at the mean of all block centres, or the origin when
    /// there are none.
    #[allow(clippy::cast_precision_loss)]
    pub fn recenter_on_blocks(&mut self, blocks: &[Block]) {
        self.target = if blocks.is_empty() {
            Vec3::ZERO
        } else {
            let sum: Vec3 = blocks.iter().map(|b| b.cell.center()).sum();
            sum / blocks.len() as f32
        };
    }

    /// Linear blend between two states.
    #[must_use]
    pub fn lerp(&self, goal: &Self, t: f32) -> Self {
        Self {
            target: self.target.lerp(goal.target, t),
            distance: self.distance + (goal.distance - self.distance) * t,
            yaw: self.yaw + (goal.yaw - self.yaw) * t,
            pitch: self.pitch + (goal.pitch - self.pitch) * t,
        }
    }
}
