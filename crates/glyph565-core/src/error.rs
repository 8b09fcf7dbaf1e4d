//! Error types for atlas conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from decoding, tiling and persisting a glyph atlas.
///
/// Every variant is fatal for the conversion that raised it. No partial
/// atlas is ever produced alongside an error.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Declared grid geometry does not match the decoded image.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// An expected source image does not exist.
    #[error("Missing input: {}", .0.display())]
    MissingInput(PathBuf),

    /// The image decoder failed or returned a malformed buffer.
    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
}

impl AtlasError {
    pub(crate) fn mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }
}
