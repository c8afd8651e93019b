//! Error types for sedsize-io.

use std::path::PathBuf;

use sedsize_grain::GrainError;

/// Error type for all fallible operations in the sedsize-io crate.
///
/// Covers missing inputs, image decoding and encoding failures, report write
/// failures, and intensity grids rejected by the grain crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the image library.
    #[error("image error in {}: {reason}", path.display())]
    Image {
        /// Path of the image being read or written.
        path: PathBuf,
        /// Description of the underlying image failure.
        reason: String,
    },

    /// Returned when a report file cannot be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Path of the report file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when the decoded image is not a usable intensity grid.
    #[error(transparent)]
    Grain(#[from] GrainError),
}
