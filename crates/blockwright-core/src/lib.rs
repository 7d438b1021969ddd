//! Core types, math, and errors for Blockwright.
//!
//! This crate provides the foundational types shared by every other crate:
//! - Integer grid cells and their 26-neighbourhood
//! - Block identifiers and the colour palette
//! - Ray and bounding box math used for picking
//! - The workspace error type

pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use coords::GridCell;
pub use error::{Error, Result};
pub use types::{BlockId, ColorIndex, Palette};

/// Workspace-wide constants
pub mod constants {
    /// Number of cells adjacent to a cell (3^3 - 1).
    pub const NEIGHBOR_COUNT: usize = 26;
    /// Height of the ground plane in world units.
    ///
    /// Unit cubes are centred on integer coordinates, so blocks in layer 0
    /// rest with their bottom face on this plane.
    pub const GROUND_PLANE_Y: f32 = -0.5;
}
