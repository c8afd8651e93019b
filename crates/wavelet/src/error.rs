//! Error types for the sedsize-wavelet crate.

/// Error type for all fallible operations in the sedsize-wavelet crate.
///
/// Variants split into configuration problems (scale generation parameters)
/// and input problems (the signal or scale set handed to the transform).
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Returned when a scaling mode name is neither `log` nor `linear`.
    #[error("unsupported scaling mode '{0}': expected 'log' or 'linear'")]
    UnsupportedScaling(String),

    /// Returned when a scale generation parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when the scale generator derives no scales for a signal length.
    #[error("no scales for signal length {len} with largest-scale divisor {divisor}")]
    NoScales {
        /// Signal length the scales were requested for.
        len: usize,
        /// Largest-scale divisor in use.
        divisor: usize,
    },

    /// Returned when the transform receives a signal whose length is not a power of two.
    #[error("signal length {len} is not a power of two")]
    NotPowerOfTwo {
        /// Length of the offending signal.
        len: usize,
    },

    /// Returned when a planned transform receives a signal of another length.
    #[error("signal has {len} samples, transform is planned for {expected}")]
    LengthMismatch {
        /// Length of the offending signal.
        len: usize,
        /// Length the transform was planned for.
        expected: usize,
    },

    /// Returned when the transform receives an empty scale set.
    #[error("scale set is empty")]
    EmptyScales,

    /// Returned when a signal is too short for the requested operation.
    #[error("signal too short: got {len} samples, need at least {min}")]
    SignalTooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required.
        min: usize,
    },
}

impl WaveletError {
    /// Returns `true` if the error stems from configuration rather than data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedScaling(_) | Self::InvalidConfig(_) | Self::NoScales { .. }
        )
    }
}
