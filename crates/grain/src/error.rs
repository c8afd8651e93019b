//! Error types for the sedsize-grain crate.

use sedsize_wavelet::WaveletError;

/// Error type for all fallible operations in the sedsize-grain crate.
///
/// Every failure of a grain-size computation surfaces as one of these four
/// kinds; nothing is retried or skipped internally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GrainError {
    /// Returned when a tuning parameter is out of range or unsupported.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Returned when the data handed to the computation is unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Returned when the scale-power distribution has no spread or no mass.
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// Returned when the processing of one image row fails.
    #[error("row {row} failed: {reason}")]
    RowTaskFailure {
        /// Index of the failing row in the intensity matrix.
        row: usize,
        /// Description of the numerical failure.
        reason: String,
    },
}

impl From<WaveletError> for GrainError {
    fn from(e: WaveletError) -> Self {
        if e.is_configuration() {
            GrainError::InvalidConfiguration(e.to_string())
        } else {
            GrainError::InvalidInput(e.to_string())
        }
    }
}
