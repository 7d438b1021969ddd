//! Integer grid coordinates.

use crate::constants::NEIGHBOR_COUNT;
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Offsets of the 26-neighbourhood in enumeration order.
///
/// x is the outer loop, y the middle and z the inner one, each ascending
/// from -1 to 1, with the zero offset skipped.
pub const NEIGHBOR_OFFSETS: [IVec3; NEIGHBOR_COUNT] = neighbor_offsets();

const fn neighbor_offsets() -> [IVec3; NEIGHBOR_COUNT] {
    let mut offsets = [IVec3::ZERO; NEIGHBOR_COUNT];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    offsets[i] = IVec3::new(dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
}

/// A cell of the building grid.
///
/// Unit cubes are centred on the cell's integer coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCell {
    /// The cell at the world origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a new grid cell
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset this cell by a delta.
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: IVec3) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }

    /// Iterate the 26 adjacent cells in [`NEIGHBOR_OFFSETS`] order.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        NEIGHBOR_OFFSETS.into_iter().map(move |delta| self.offset(delta))
    }

    /// World-space centre of the cell.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
