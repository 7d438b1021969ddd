//! Analytic ray picking against unit cubes and the ground plane.

use blockwright_core::constants::GROUND_PLANE_Y;
use blockwright_core::math::{Aabb, Ray};
use blockwright_world::{Block, RayHit};
use glam::Vec2;

use crate::camera::Camera;

/// Ray-cast service for a scene made only of placed blocks and an infinite
/// ground plane.
#[derive(Debug, Clone, Copy)]
pub struct GridPicker {
    /// Screen size in pixels.
    pub viewport: Vec2,
    /// Height of the ground plane.
    pub ground_y: f32,
}

impl GridPicker {
    /// Picker for a screen of the given size.
    #[must_use]
    pub const fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ground_y: GROUND_PLANE_Y,
        }
    }

    /// Cast through a screen pixel.
    #[must_use]
    pub fn cast_screen(&self, screen: Vec2, camera: &Camera, blocks: &[Block]) -> Option<RayHit> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        self.cast_ray(&camera.screen_ray(screen, self.viewport), blocks)
    }

    /// Nearest hit along `ray`. Blocks win ties with the ground; `None`
    /// means the ray escapes to the sky.
    #[must_use]
    pub fn cast_ray(&self, ray: &Ray, blocks: &[Block]) -> Option<RayHit> {
        let nearest_block = blocks
            .iter()
            .filter_map(|block| {
                Aabb::of_cell(block.cell)
                    .intersect_ray(ray)
                    .map(|(t_near, _)| (block.id, t_near))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let ground = ray.intersect_horizontal_plane(self.ground_y);

        match (nearest_block, ground) {
            (Some((id, t_block)), Some(t_ground)) if t_block <= t_ground => {
                Some(RayHit::block(id, ray.at(t_block)))
            }
            (Some((id, t_block)), None) => Some(RayHit::block(id, ray.at(t_block))),
            (_, Some(t_ground)) => {
                let mut point = ray.at(t_ground);
                // Remove float drift so ground snapping sees the exact plane.
                point.y = self.ground_y;
                Some(RayHit::ground(point))
            }
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blockwright_core::{BlockId, ColorIndex, GridCell};
    use glam::Vec3;

    fn block(id: u64, cell: GridCell) -> Block {
        Block {
            id: BlockId(id),
            cell,
            color: ColorIndex(0),
        }
    }

    #[test]
    fn downward_ray_hits_ground() {
        let picker = GridPicker::new(Vec2::new(800.0, 600.0));
        let ray = Ray::new(Vec3::new(2.0, 10.0, -3.0), Vec3::NEG_Y);
        let hit = picker.cast_ray(&ray, &[]).unwrap();
        assert_eq!(hit.block, None);
        assert_eq!(hit.point, Vec3::new(2.0, -0.5, -3.0));
    }

    #[test]
    fn nearest_block_wins() {
        let picker = GridPicker::new(Vec2::new(800.0, 600.0));
        let blocks = [
            block(0, GridCell::new(0, 0, 0)),
            block(1, GridCell::new(0, 2, 0)),
        ];
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let hit = picker.cast_ray(&ray, &blocks).unwrap();
        assert_eq!(hit.block, Some(BlockId(1)));
        assert_relative_eq!(hit.point.y, 2.5, epsilon = 1e-5);
    }

    #[test]
    fn sky_ray_misses() {
        let picker = GridPicker::new(Vec2::new(800.0, 600.0));
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.3, 1.0, 0.0));
        assert!(picker.cast_ray(&ray, &[block(0, GridCell::ORIGIN)]).is_none());
    }

    #[test]
    fn screen_cast_through_centre_hits_block_under_camera() {
        let picker = GridPicker::new(Vec2::new(800.0, 800.0));
        let camera = Camera::new(
            Vec3::new(0.0, 10.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0_f32.to_radians(),
            1.0,
            0.1,
            100.0,
        );
        let hit = picker
            .cast_screen(Vec2::new(400.0, 400.0), &camera, &[block(3, GridCell::ORIGIN)])
            .unwrap();
        assert_eq!(hit.block, Some(BlockId(3)));
    }
}
