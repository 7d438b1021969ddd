//! Camera and view management.

use blockwright_core::math::Ray;
use glam::{Mat4, Vec2, Vec3};

use crate::orbit::CameraOrbitState;

/// Camera for rendering and picking.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(15.0, 15.0, 15.0),
            direction: Vec3::new(-1.0, -1.0, -1.0).normalize(),
            up: Vec3::Y,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a new camera.
    #[must_use]
    pub fn new(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let direction = (target - position).normalize();
        Self {
            position,
            direction,
            up,
            fov,
            aspect,
            near,
            far,
        }
    }

    /// Create a camera placed by an orbit state.
    #[must_use]
    pub fn from_orbit(orbit: &CameraOrbitState) -> Self {
        let mut camera = Self::default();
        camera.set_from_orbit(orbit);
        camera
    }

    /// Move the camera onto its orbit and look at the orbit target.
    ///
    /// Projection parameters are left untouched.
    pub fn set_from_orbit(&mut self, orbit: &CameraOrbitState) {
        self.position = orbit.position();
        self.look_at(orbit.target);
    }

    /// Look at a target position.
    pub fn look_at(&mut self, target: Vec3) {
        self.direction = (target - self.position).normalize_or_zero();
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction, self.up)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get the view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray through a pixel of a `viewport`-sized screen (origin top-left).
    #[must_use]
    pub fn screen_ray(&self, screen: Vec2, viewport: Vec2) -> Ray {
        let ndc = Vec2::new(
            (screen.x / viewport.x) * 2.0 - 1.0,
            1.0 - (screen.y / viewport.y) * 2.0,
        );
        let inverse = self.view_projection_matrix().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}
