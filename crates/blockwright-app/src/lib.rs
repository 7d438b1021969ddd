//! Block editor for Blockwright.
//!
//! This crate ties the pieces together:
//! - [`Editor`]: routes input through the gesture machine and applies the
//!   resulting taps and camera moves to the block store
//! - [`host`]: traits a renderer implements to display the editor
//! - [`EditorConfig`]: serde-backed configuration
//! - [`init_logging`]: `tracing` subscriber setup for binaries
//!
//! # Example
//!
//! ```no_run
//! use blockwright_app::{Editor, EditorConfig};
//! use blockwright_render::GridPicker;
//! use glam::Vec2;
//!
//! fn main() -> anyhow::Result<()> {
//!     blockwright_app::init_logging("info");
//!     let config = EditorConfig::default();
//!     let mut editor = Editor::new(config, GridPicker::new(Vec2::ZERO), (), ())?;
//!     editor.tick();
//!     Ok(())
//! }
//! ```

mod config;
mod editor;
pub mod host;
mod logging;

pub use config::{EditorConfig, DEFAULT_PAN_SPEED};
pub use editor::{Editor, ToolMode};
pub use host::{CameraSink, RayCaster, SceneSink};
pub use logging::init_logging;
