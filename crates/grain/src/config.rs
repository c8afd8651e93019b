//! Configuration for grain-size distribution estimates.

use sedsize_wavelet::ScaleConfig;

use crate::error::GrainError;

/// Configuration for [`compute_grain_size_distribution`](crate::compute_grain_size_distribution).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use sedsize_grain::GrainConfig;
///
/// let config = GrainConfig::new()
///     .with_resolution(0.05)
///     .with_density(4)
///     .with_workers(2);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GrainConfig {
    /// Physical length per pixel.
    resolution: f64,
    /// Row stride: every `density`-th row is analysed.
    density: usize,
    /// Number of worker threads.
    workers: usize,
    /// Transform scale parameters.
    scale_config: ScaleConfig,
}

impl GrainConfig {
    /// Creates a new configuration with default parameters.
    ///
    /// Defaults: `resolution = 1.0`, `density = 10`, `workers = 8`, and
    /// [`ScaleConfig::default`] (divisor 3, 8 notes per octave, log spacing).
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            density: 10,
            workers: 8,
            scale_config: ScaleConfig::default(),
        }
    }

    /// Sets the physical length per pixel.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the row stride.
    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    /// Sets the number of worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the transform scale parameters.
    pub fn with_scale_config(mut self, scale_config: ScaleConfig) -> Self {
        self.scale_config = scale_config;
        self
    }

    /// Returns the physical length per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns the row stride.
    pub fn density(&self) -> usize {
        self.density
    }

    /// Returns the number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the transform scale parameters.
    pub fn scale_config(&self) -> &ScaleConfig {
        &self.scale_config
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GrainError::InvalidConfiguration`] if the resolution is not
    /// finite and positive, if density or workers is zero, or if the scale
    /// parameters are invalid.
    pub fn validate(&self) -> Result<(), GrainError> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(GrainError::InvalidConfiguration(format!(
                "resolution must be finite and > 0, got {}",
                self.resolution
            )));
        }
        if self.density == 0 {
            return Err(GrainError::InvalidConfiguration(
                "density must be > 0".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(GrainError::InvalidConfiguration(
                "workers must be > 0".to_string(),
            ));
        }
        self.scale_config.validate()?;
        Ok(())
    }
}

impl Default for GrainConfig {
    fn default() -> Self {
        Self::new()
    }
}
