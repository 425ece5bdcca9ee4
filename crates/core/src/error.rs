//! Error types for the microbe-forge core.

use thiserror::Error;

/// Errors produced by synthesis operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or overflowed) when creating a canvas or image.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An organism, medicine, world or asset name is not in the known tables.
    #[error("unknown asset id: {0}")]
    UnknownAssetId(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A render configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Encoding or writing an image failed (only raised outside the engine proper).
    #[error("I/O error: {0}")]
    Io(String),
}
