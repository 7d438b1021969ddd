//! Error types for Blockwright.

use thiserror::Error;

/// Workspace-wide error type.
///
/// Editing itself never fails; these errors cover configuration and the
/// externally set inputs that can be rejected up front.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Colour index outside the palette
    #[error("Colour index {index} out of range (palette has {len} colours)")]
    ColorOutOfRange { index: usize, len: usize },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
