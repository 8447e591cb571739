//! Error handling for the TeeForge editor core.
//!
//! All error types use `thiserror` for ergonomic error handling. Editor
//! errors are never fatal to the embedding application; the render pipeline
//! tolerates missing images by skipping the affected draw.

use thiserror::Error;

/// Editor-side error type.
#[derive(Error, Debug, Clone)]
pub enum EditorError {
    /// A raster image failed to decode.
    #[error("failed to decode image: {reason}")]
    ImageDecode {
        /// Decoder message.
        reason: String,
    },

    /// A pixmap allocation or encode step failed.
    #[error("render failed: {reason}")]
    Render {
        /// What went wrong.
        reason: String,
    },

    /// A layer identifier could not be parsed.
    #[error("unknown layer identifier: {id}")]
    UnknownLayerId {
        /// The offending identifier.
        id: String,
    },
}

/// Convenience result alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
