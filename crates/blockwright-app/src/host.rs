//! Traits the hosting application implements to plug the editor into a
//! renderer.

use blockwright_core::BlockId;
use blockwright_render::{Camera, CameraOrbitState, GridPicker};
use blockwright_world::{Block, GhostPreview, RayHit};
use glam::Vec2;

use crate::editor::ToolMode;

/// Scene ray-casting.
pub trait RayCaster {
    /// Cast from screen position `screen` through `camera`. The nearest of
    /// the placed blocks and the ground plane wins; `None` means the ray
    /// escaped to the sky.
    fn cast(&self, screen: Vec2, camera: &Camera, blocks: &[Block]) -> Option<RayHit>;

    /// The screen was resized.
    #[allow(unused_variables)]
    fn resize(&mut self, viewport: Vec2) {}
}

impl RayCaster for GridPicker {
    fn cast(&self, screen: Vec2, camera: &Camera, blocks: &[Block]) -> Option<RayHit> {
        self.cast_screen(screen, camera, blocks)
    }

    fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }
}

/// Receives camera updates.
pub trait CameraSink {
    /// The displayed camera moved. `orbit` is the state it was built from.
    fn camera_changed(&mut self, camera: &Camera, orbit: &CameraOrbitState);
}

impl CameraSink for () {
    fn camera_changed(&mut self, _camera: &Camera, _orbit: &CameraOrbitState) {}
}

/// Receives scene changes.
///
/// Every method defaults to doing nothing so hosts only implement what they
/// display.
#[allow(unused_variables)]
pub trait SceneSink {
    fn block_added(&mut self, block: &Block) {}

    fn block_removed(&mut self, block: &Block) {}

    fn selection_changed(&mut self, id: BlockId, selected: bool) {}

    fn ghost_changed(&mut self, ghost: GhostPreview) {}

    fn transparency_changed(&mut self, transparent: bool) {}

    fn tool_changed(&mut self, tool: ToolMode) {}
}

impl SceneSink for () {}
