//! Math utilities for picking.

use glam::Vec3;

use crate::coords::GridCell;

/// Ray for raycasting operations.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    #[inline]
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get a point along the ray at distance t
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the horizontal plane at height `y`.
    ///
    /// Returns `None` when the ray is parallel to the plane or points away from it.
    #[must_use]
    pub fn intersect_horizontal_plane(&self, y: f32) -> Option<f32> {
        if self.direction.y.abs() <= f32::EPSILON {
            return None;
        }
        let t = (y - self.origin.y) / self.direction.y;
        (t >= 0.0).then_some(t)
    }
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// AABB of the unit cube occupying a grid cell.
    #[inline]
    #[must_use]
    pub fn of_cell(cell: GridCell) -> Self {
        let center = cell.center();
        Self {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    /// Ray-AABB intersection test, returns (t_near, t_far) or None if no intersection
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let inv_dir = Vec3::ONE / ray.direction;

        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn ray_hits_ground_plane() {
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 1.0));
        let t = ray.intersect_horizontal_plane(-0.5).unwrap();
        let hit = ray.at(t);
        assert_relative_eq!(hit.y, -0.5, epsilon = 1e-5);
        assert_relative_eq!(hit.z, 10.5, epsilon = 1e-4);
    }

    #[test]
    fn ray_pointing_at_sky_misses_ground() {
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert!(ray.intersect_horizontal_plane(-0.5).is_none());

        let flat = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::X);
        assert!(flat.intersect_horizontal_plane(-0.5).is_none());
    }

    #[test]
    fn cell_aabb_is_centred() {
        let aabb = Aabb::of_cell(GridCell::new(1, 0, -1));
        assert_eq!(aabb.min, Vec3::new(0.5, -0.5, -1.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 0.5, -0.5));
    }

    #[test]
    fn aabb_ray_intersection() {
        let aabb = Aabb::of_cell(GridCell::ORIGIN);

        let ray = Ray::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::X);
        let (t_near, t_far) = aabb.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t_near, 1.5, epsilon = 1e-5);
        assert_relative_eq!(t_far, 2.5, epsilon = 1e-5);

        let ray = Ray::new(Vec3::new(-2.0, 2.0, 0.0), Vec3::X);
        assert!(aabb.intersect_ray(&ray).is_none());
    }
}
