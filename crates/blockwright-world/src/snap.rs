//! Ghost preview snapping.
//!
//! Turns a ray-cast hit into the single grid cell a new block would occupy.
//! The resolver is pure and allocation-free so it can run on every pointer
//! move.

use blockwright_core::{BlockId, GridCell};
use glam::Vec3;
use tracing::trace;

use crate::occupancy::OccupancyIndex;
use crate::store::BlockStore;

/// Result of casting a ray from the screen into the scene.
///
/// The nearest surface wins: either a placed block or the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Block struck by the ray, `None` for the ground plane.
    pub block: Option<BlockId>,
    /// World-space hit point.
    pub point: Vec3,
}

impl RayHit {
    /// A hit on a placed block.
    #[must_use]
    pub const fn block(id: BlockId, point: Vec3) -> Self {
        Self {
            block: Some(id),
            point,
        }
    }

    /// A hit on the ground plane.
    #[must_use]
    pub const fn ground(point: Vec3) -> Self {
        Self { block: None, point }
    }

    /// Snap target for this hit.
    ///
    /// Returns `None` if the struck block is no longer in `store`.
    #[must_use]
    pub fn snap_target(&self, store: &BlockStore) -> Option<SnapTarget> {
        match self.block {
            Some(id) => store.get(id).map(|block| SnapTarget::Block {
                cell: block.cell,
                point: self.point,
            }),
            None => Some(SnapTarget::Ground { point: self.point }),
        }
    }
}

/// What the pointing ray struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapTarget {
    /// The ray hit the block occupying `cell` at world point `point`.
    Block { cell: GridCell, point: Vec3 },
    /// The ray hit the ground plane at `point`.
    Ground { point: Vec3 },
}

/// Where the translucent preview cube sits, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GhostPreview {
    /// Previewed cell; meaningless while hidden.
    pub cell: GridCell,
    /// Whether a preview cube should be drawn.
    pub visible: bool,
}

impl GhostPreview {
    /// A visible preview at `cell`.
    #[must_use]
    pub const fn at(cell: GridCell) -> Self {
        Self {
            cell,
            visible: true,
        }
    }

    /// A hidden preview.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            cell: GridCell::ORIGIN,
            visible: false,
        }
    }

    /// The previewed cell when visible.
    #[must_use]
    pub const fn cell(&self) -> Option<GridCell> {
        if self.visible {
            Some(self.cell)
        } else {
            None
        }
    }
}

/// Resolve the preview cell for a ray hit.
///
/// For a block hit this is the free neighbour (of 26) closest to the hit
/// point, the first in enumeration order on ties; a fully enclosed block
/// yields a hidden preview. For a ground hit it is the cell resting on the
/// plane below the hit point, which is not checked against occupancy.
#[must_use]
pub fn resolve_ghost(target: SnapTarget, occupancy: &OccupancyIndex) -> GhostPreview {
    let ghost = match target {
        SnapTarget::Block { cell, point } => nearest_free_neighbor(cell, point, occupancy)
            .map_or_else(GhostPreview::hidden, GhostPreview::at),
        SnapTarget::Ground { point } => GhostPreview::at(ground_cell(point)),
    };
    trace!(?target, ?ghost, "ghost resolved");
    ghost
}

fn nearest_free_neighbor(
    cell: GridCell,
    point: Vec3,
    occupancy: &OccupancyIndex,
) -> Option<GridCell> {
    let mut best: Option<(GridCell, f32)> = None;
    for neighbor in cell.neighbors() {
        if occupancy.is_occupied(neighbor) {
            continue;
        }
        let distance = neighbor.center().distance_squared(point);
        // Strict comparison keeps the earliest neighbour on ties.
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((neighbor, distance));
        }
    }
    best.map(|(neighbor, _)| neighbor)
}

/// Cell resting on the ground below a ground-plane hit point.
///
/// x and z round half away from zero. y picks the layer whose bottom face
/// contains the point, so a hit on the plane at y = -0.5 lands in layer 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn ground_cell(point: Vec3) -> GridCell {
    GridCell::new(
        point.x.round() as i32,
        (point.y + 0.5).floor() as i32,
        point.z.round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(cells: impl IntoIterator<Item = GridCell>) -> OccupancyIndex {
        let mut index = OccupancyIndex::new();
        for cell in cells {
            index.add(cell);
        }
        index
    }

    #[test]
    fn snaps_to_nearest_free_neighbor() {
        let index = occupied([GridCell::ORIGIN]);
        let ghost = resolve_ghost(
            SnapTarget::Block {
                cell: GridCell::ORIGIN,
                point: Vec3::new(0.9, 0.1, 0.1),
            },
            &index,
        );
        assert_eq!(ghost, GhostPreview::at(GridCell::new(1, 0, 0)));
    }

    #[test]
    fn skips_occupied_neighbors() {
        let index = occupied([GridCell::ORIGIN, GridCell::new(1, 0, 0)]);
        let ghost = resolve_ghost(
            SnapTarget::Block {
                cell: GridCell::ORIGIN,
                point: Vec3::new(0.6, 0.4, 0.0),
            },
            &index,
        );
        assert_eq!(ghost.cell(), Some(GridCell::new(1, 1, 0)));
    }

    #[test]
    fn ties_break_by_enumeration_order() {
        // Centre of the block is equidistant from all six face neighbours;
        // (-1, 0, 0) comes first among them.
        let index = occupied([GridCell::ORIGIN]);
        let ghost = resolve_ghost(
            SnapTarget::Block {
                cell: GridCell::ORIGIN,
                point: Vec3::ZERO,
            },
            &index,
        );
        assert_eq!(ghost.cell(), Some(GridCell::new(-1, 0, 0)));
    }

    #[test]
    fn fully_surrounded_block_hides_ghost() {
        let center = GridCell::new(5, 5, 5);
        let index = occupied(std::iter::once(center).chain(center.neighbors()));

        for point in [
            Vec3::new(5.5, 5.0, 5.0),
            Vec3::new(4.5, 5.4, 5.3),
            Vec3::new(5.0, 5.5, 4.6),
        ] {
            let ghost = resolve_ghost(SnapTarget::Block { cell: center, point }, &index);
            assert!(!ghost.visible);
            assert_eq!(ghost.cell(), None);
        }
    }

    #[test]
    fn ground_hit_rounds_to_resting_cell() {
        let ghost = resolve_ghost(
            SnapTarget::Ground {
                point: Vec3::new(2.5, -0.5, -2.4),
            },
            &OccupancyIndex::new(),
        );
        assert_eq!(ghost, GhostPreview::at(GridCell::new(3, 0, -2)));
    }

    #[test]
    fn ground_hit_negative_half_rounds_away_from_zero() {
        assert_eq!(
            ground_cell(Vec3::new(-2.5, -0.5, 0.49)),
            GridCell::new(-3, 0, 0)
        );
    }

    #[test]
    fn ray_hit_resolves_against_store() {
        let mut store = BlockStore::new();
        let id = store
            .place(GridCell::new(2, 0, 0), blockwright_core::ColorIndex(0))
            .unwrap();
        let point = Vec3::new(2.5, 0.0, 0.0);

        assert_eq!(
            RayHit::block(id, point).snap_target(&store),
            Some(SnapTarget::Block {
                cell: GridCell::new(2, 0, 0),
                point
            })
        );
        assert_eq!(
            RayHit::ground(point).snap_target(&store),
            Some(SnapTarget::Ground { point })
        );
        assert_eq!(RayHit::block(BlockId(9), point).snap_target(&store), None);
    }

    #[test]
    fn ground_ghost_ignores_occupancy() {
        let index = occupied([GridCell::new(3, 0, -2)]);
        let ghost = resolve_ghost(
            SnapTarget::Ground {
                point: Vec3::new(2.6, -0.5, -2.2),
            },
            &index,
        );
        assert!(ghost.visible);
        assert_eq!(ghost.cell, GridCell::new(3, 0, -2));
    }
}
