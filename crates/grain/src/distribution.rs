//! Grain-size distribution result type.

use sedsize_stats::{weighted_central_moment, weighted_mean};

use crate::error::GrainError;

/// Divisor applied to the third and fourth weighted moments.
pub const MOMENT_NORMALIZER: f64 = 100.0;

/// A grain-size distribution with its weighted moments.
///
/// Sizes are in the physical units of the resolution used to build it and
/// the weights sum to one.
#[derive(Clone, Debug, PartialEq)]
pub struct GrainSizeDistribution {
    sizes: Vec<f64>,
    weights: Vec<f64>,
    mean: f64,
    spread: f64,
    skewness: f64,
    kurtosis: f64,
}

impl GrainSizeDistribution {
    /// Builds a distribution from sizes and normalized weights.
    ///
    /// - mean = `sum(w * s)`
    /// - spread = `sqrt(sum(w * (s - mean)^2))`
    /// - skewness = `sum(w * (s - mean)^3) / (100 * spread^3)`
    /// - kurtosis = `sum(w * (s - mean)^4) / (100 * spread^4)`
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GrainError::InvalidInput`] | lengths differ or inputs are empty |
    /// | [`GrainError::InvalidInput`] | a weight is negative or non-finite |
    /// | [`GrainError::DegenerateDistribution`] | the spread is zero |
    pub fn from_weighted(sizes: Vec<f64>, weights: Vec<f64>) -> Result<Self, GrainError> {
        if sizes.len() != weights.len() {
            return Err(GrainError::InvalidInput(format!(
                "{} sizes but {} weights",
                sizes.len(),
                weights.len()
            )));
        }
        if sizes.is_empty() {
            return Err(GrainError::InvalidInput(
                "distribution has no sizes".to_string(),
            ));
        }
        if !weights.iter().all(|w| w.is_finite() && *w >= 0.0) {
            return Err(GrainError::InvalidInput(
                "weights must be finite and >= 0".to_string(),
            ));
        }

        let mean = weighted_mean(&sizes, &weights);
        let spread = weighted_central_moment(&sizes, &weights, mean, 2).sqrt();
        if !(spread.is_finite() && spread > 0.0) {
            return Err(GrainError::DegenerateDistribution(format!(
                "zero spread around mean size {mean}; skewness and kurtosis are undefined"
            )));
        }
        let skewness = weighted_central_moment(&sizes, &weights, mean, 3)
            / (MOMENT_NORMALIZER * spread.powi(3));
        let kurtosis = weighted_central_moment(&sizes, &weights, mean, 4)
            / (MOMENT_NORMALIZER * spread.powi(4));

        Ok(Self {
            sizes,
            weights,
            mean,
            spread,
            skewness,
            kurtosis,
        })
    }

    /// Returns the grain sizes in physical units, ascending.
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// Returns the weight of each size.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the weighted mean grain size.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the weighted spread (sorting).
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Returns the weighted skewness.
    pub fn skewness(&self) -> f64 {
        self.skewness
    }

    /// Returns the weighted kurtosis.
    pub fn kurtosis(&self) -> f64 {
        self.kurtosis
    }

    /// Returns the number of size classes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` if there are no size classes (never the case once built).
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Iterates over `(size, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.sizes.iter().copied().zip(self.weights.iter().copied())
    }
}
