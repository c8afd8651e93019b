//! Analysis scale generation.

use std::fmt;
use std::str::FromStr;

use crate::error::WaveletError;

/// Spacing of the analysis scales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scaling {
    /// Geometric spacing with a fixed number of scales per octave.
    #[default]
    Log,
    /// Integer scales with unit step.
    Linear,
}

impl FromStr for Scaling {
    type Err = WaveletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "linear" => Ok(Self::Linear),
            _ => Err(WaveletError::UnsupportedScaling(s.to_string())),
        }
    }
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => f.write_str("log"),
            Self::Linear => f.write_str("linear"),
        }
    }
}

/// Parameters controlling scale generation.
///
/// # Example
///
/// ```
/// use sedsize_wavelet::{ScaleConfig, Scaling};
///
/// let config = ScaleConfig::new()
///     .with_largest_scale_divisor(3)
///     .with_notes_per_octave(8)
///     .with_scaling(Scaling::Log);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    /// Largest scale as an inverse fraction of the signal length.
    largest_scale_divisor: usize,
    /// Number of scales per octave (log spacing only).
    notes_per_octave: usize,
    /// Scale spacing.
    scaling: Scaling,
}

impl ScaleConfig {
    /// Creates a new `ScaleConfig` with default parameters.
    ///
    /// Defaults: `largest_scale_divisor = 3`, `notes_per_octave = 8`,
    /// `scaling = Log`.
    pub fn new() -> Self {
        Self {
            largest_scale_divisor: 3,
            notes_per_octave: 8,
            scaling: Scaling::Log,
        }
    }

    /// Sets the largest-scale divisor.
    pub fn with_largest_scale_divisor(mut self, divisor: usize) -> Self {
        self.largest_scale_divisor = divisor;
        self
    }

    /// Sets the number of scales per octave.
    pub fn with_notes_per_octave(mut self, notes: usize) -> Self {
        self.notes_per_octave = notes;
        self
    }

    /// Sets the scale spacing.
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Returns the largest-scale divisor.
    pub fn largest_scale_divisor(&self) -> usize {
        self.largest_scale_divisor
    }

    /// Returns the number of scales per octave.
    pub fn notes_per_octave(&self) -> usize {
        self.notes_per_octave
    }

    /// Returns the scale spacing.
    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::InvalidConfig`] if the divisor is zero, or if
    /// log spacing is selected with zero notes per octave.
    pub fn validate(&self) -> Result<(), WaveletError> {
        if self.largest_scale_divisor == 0 {
            return Err(WaveletError::InvalidConfig(
                "largest_scale_divisor must be > 0".to_string(),
            ));
        }
        if self.scaling == Scaling::Log && self.notes_per_octave == 0 {
            return Err(WaveletError::InvalidConfig(
                "notes_per_octave must be > 0 for log scaling".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An ascending set of strictly positive analysis scales.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    scales: Vec<f64>,
}

impl ScaleSet {
    /// Wraps an explicit list of scales.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::EmptyScales`] | `scales` is empty |
    /// | [`WaveletError::InvalidConfig`] | a scale is not finite and positive |
    /// | [`WaveletError::InvalidConfig`] | the list is not strictly increasing |
    pub fn new(scales: Vec<f64>) -> Result<Self, WaveletError> {
        if scales.is_empty() {
            return Err(WaveletError::EmptyScales);
        }
        if !scales.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(WaveletError::InvalidConfig(
                "scales must be finite and > 0".to_string(),
            ));
        }
        if scales.windows(2).any(|w| w[1] <= w[0]) {
            return Err(WaveletError::InvalidConfig(
                "scales must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { scales })
    }

    /// Returns the scales as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.scales
    }

    /// Returns the number of scales.
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// Returns `true` if there are no scales (never the case for a built set).
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Returns the smallest scale.
    pub fn smallest(&self) -> f64 {
        self.scales[0]
    }

    /// Returns the largest scale.
    pub fn largest(&self) -> f64 {
        self.scales[self.scales.len() - 1]
    }
}

impl AsRef<[f64]> for ScaleSet {
    fn as_ref(&self) -> &[f64] {
        &self.scales
    }
}

/// Builds the analysis scales for a signal of length `n`.
///
/// With `b = n / divisor / 2` (integer division):
/// - log spacing yields `notes * floor(log2(b))` scales
///   `n / (divisor * 2^((count - 1 - j) / notes))`, the largest being `n / divisor`;
/// - linear spacing yields the integers `2, 3, ..., b - 1`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::InvalidConfig`] | invalid configuration |
/// | [`WaveletError::NoScales`] | `n` is too short to yield any scale |
pub fn build_scales(n: usize, config: &ScaleConfig) -> Result<ScaleSet, WaveletError> {
    config.validate()?;

    let divisor = config.largest_scale_divisor;
    let half_range = n / divisor / 2;
    let no_scales = WaveletError::NoScales { len: n, divisor };

    let scales: Vec<f64> = match config.scaling {
        Scaling::Log => {
            if half_range == 0 {
                return Err(no_scales);
            }
            let notes = config.notes_per_octave;
            let count = notes * half_range.ilog2() as usize;
            let top = n as f64 / divisor as f64;
            (0..count)
                .map(|j| top / 2.0_f64.powf((count - 1 - j) as f64 / notes as f64))
                .collect()
        }
        Scaling::Linear => (2..half_range).map(|s| s as f64).collect(),
    };

    if scales.is_empty() {
        return Err(no_scales);
    }
    ScaleSet::new(scales)
}
