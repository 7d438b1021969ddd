//! Camera and view management for Blockwright.
//!
//! This crate provides:
//! - The orbit camera model and its clamped mutations
//! - Fixed-tick orbit damping
//! - View/projection matrices and screen-ray unprojection
//! - An analytic picker for the block-and-ground scene
//!
//! Rasterisation itself belongs to whatever renderer consumes [`Camera`].

pub mod camera;
pub mod damping;
pub mod orbit;
pub mod picking;

pub use camera::Camera;
pub use damping::{DampingConfig, OrbitDamping};
pub use orbit::{CameraOrbitState, OrbitLimits};
pub use picking::GridPicker;
