//! Smoothed camera motion.

use serde::{Deserialize, Serialize};

use crate::orbit::CameraOrbitState;

/// Fraction of the remaining gap closed per tick.
pub const DEFAULT_DAMPING_FACTOR: f32 = 0.05;

/// Damping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DampingConfig {
    pub factor: f32,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            factor: DEFAULT_DAMPING_FACTOR,
        }
    }
}

/// Displayed orbit state easing towards the goal state.
///
/// Runs on a fixed-interval tick independent of input. It only reads the
/// goal, so gestures can keep mutating the goal between ticks.
#[derive(Debug, Clone)]
pub struct OrbitDamping {
    factor: f32,
    current: CameraOrbitState,
}

impl OrbitDamping {
    /// Start at `initial` with the given per-tick factor (clamped to 0..=1).
    #[must_use]
    pub fn new(config: DampingConfig, initial: CameraOrbitState) -> Self {
        Self {
            factor: config.factor.clamp(0.0, 1.0),
            current: initial,
        }
    }

    /// Advance one tick towards `goal` and return the displayed state.
    pub fn tick(&mut self, goal: &CameraOrbitState) -> CameraOrbitState {
        self.current = self.current.lerp(goal, self.factor);
        self.current
    }

    /// Currently displayed state.
    #[must_use]
    pub const fn current(&self) -> &CameraOrbitState {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn converges_towards_goal() {
        let start = CameraOrbitState::default();
        let goal = CameraOrbitState {
            target: Vec3::new(4.0, 0.0, 0.0),
            distance: 10.0,
            yaw: 2.0,
            pitch: -0.2,
        };
        let mut damping = OrbitDamping::new(DampingConfig { factor: 0.5 }, start);

        let first = damping.tick(&goal);
        assert_relative_eq!(first.target.x, 2.0);
        assert_relative_eq!(first.distance, 17.5);

        for _ in 0..60 {
            damping.tick(&goal);
        }
        let settled = damping.current();
        assert_relative_eq!(settled.yaw, goal.yaw, epsilon = 1e-4);
        assert_relative_eq!(settled.pitch, goal.pitch, epsilon = 1e-4);
        assert_relative_eq!(settled.distance, goal.distance, epsilon = 1e-4);
    }
}
