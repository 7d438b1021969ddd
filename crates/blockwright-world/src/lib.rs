//! Placed blocks, grid occupancy and ghost snapping for Blockwright.
//!
//! - [`OccupancyIndex`]: O(1) set of occupied grid cells
//! - [`BlockStore`]: ordered blocks plus the selection subset
//! - [`resolve_ghost`]: picks the cell a new block would land in

pub mod occupancy;
pub mod snap;
pub mod store;

pub use occupancy::OccupancyIndex;
pub use snap::{ground_cell, resolve_ghost, GhostPreview, RayHit, SnapTarget};
pub use store::{Block, BlockStore};
