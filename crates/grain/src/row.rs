//! Per-row wavelet processing.
//!
//! One row of the intensity matrix is reduced to a normalized vector holding,
//! for every analysis scale, the variance of the smoothed scale-normalized
//! wavelet power along the row.

use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use tracing::trace;

use sedsize_stats::{normalize_sum, variance};
use sedsize_wavelet::{
    Cwt, Kernel, ScaleConfig, ScaleSet, build_scales, detrend, pad_to_power_of_two,
    squared_frequencies,
};

use crate::error::GrainError;

/// Reusable state for processing rows of one fixed length.
///
/// Holds the scale set, the planned transform, the squared frequency axis of
/// the padded length and the FFT plans used for smoothing. Shared read-only
/// by every worker.
pub struct RowPipeline<K> {
    kernel: K,
    row_len: usize,
    padded_len: usize,
    scales: ScaleSet,
    transform: Cwt,
    squared_freqs: Vec<f64>,
    fft_forward: Arc<dyn Fft<f64>>,
    fft_inverse: Arc<dyn Fft<f64>>,
}

impl<K: std::fmt::Debug> std::fmt::Debug for RowPipeline<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowPipeline")
            .field("kernel", &self.kernel)
            .field("row_len", &self.row_len)
            .field("padded_len", &self.padded_len)
            .field("scales", &self.scales)
            .finish_non_exhaustive()
    }
}

impl<K: Kernel> RowPipeline<K> {
    /// Prepares a pipeline for rows of `row_len` samples.
    ///
    /// Scales are generated for the padded length (the next power of two at or
    /// above `row_len`).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GrainError::InvalidInput`] | `row_len` is zero |
    /// | [`GrainError::InvalidConfiguration`] | invalid scale parameters, or no scales |
    pub fn new(
        row_len: usize,
        scale_config: &ScaleConfig,
        kernel: K,
    ) -> Result<Self, GrainError> {
        if row_len == 0 {
            return Err(GrainError::InvalidInput("row length must be > 0".to_string()));
        }
        let padded_len = row_len.next_power_of_two();
        let scales = build_scales(padded_len, scale_config)?;
        let transform = Cwt::new(padded_len)?;

        let mut planner = FftPlanner::new();
        let fft_forward = planner.plan_fft_forward(padded_len);
        let fft_inverse = planner.plan_fft_inverse(padded_len);

        Ok(Self {
            kernel,
            row_len,
            padded_len,
            scales,
            transform,
            squared_freqs: squared_frequencies(padded_len),
            fft_forward,
            fft_inverse,
        })
    }

    /// Returns the analysis scales.
    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    /// Returns the expected (unpadded) row length.
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Returns the padded transform length.
    pub fn padded_len(&self) -> usize {
        self.padded_len
    }

    /// Returns the analyzing kernel.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Reduces one row to its normalized per-scale variance vector.
    ///
    /// `row` is the row's index in the matrix and is only used to label
    /// failures.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GrainError::InvalidInput`] | `samples.len()` differs from the pipeline's row length |
    /// | [`GrainError::RowTaskFailure`] | the row is flat after detrending |
    /// | [`GrainError::RowTaskFailure`] | the variances cannot be normalized |
    pub fn process(&self, row: usize, samples: &[f64]) -> Result<Vec<f64>, GrainError> {
        if samples.len() != self.row_len {
            return Err(GrainError::InvalidInput(format!(
                "row {row} has {} samples, expected {}",
                samples.len(),
                self.row_len
            )));
        }
        let fail = |reason: String| GrainError::RowTaskFailure { row, reason };

        let detrended = detrend(samples).map_err(|e| fail(e.to_string()))?;
        if is_flat(samples, &detrended) {
            return Err(fail("row has no texture: constant or linear ramp".to_string()));
        }
        let padded = pad_to_power_of_two(&detrended);

        let mut coeffs = self
            .transform
            .transform(&padded, &self.scales, &self.kernel)
            .map_err(|e| fail(e.to_string()))?;
        coeffs.truncate(self.row_len);
        let power = coeffs.scaled_power();

        let variances: Vec<f64> = power
            .iter()
            .zip(self.scales.as_slice())
            .map(|(p, &scale)| variance(&self.smooth(p, scale)))
            .collect();

        let normalized = normalize_sum(&variances).ok_or_else(|| {
            fail("per-scale power variance has no positive finite total".to_string())
        })?;
        trace!(row, n_scales = normalized.len(), "row processed");
        Ok(normalized)
    }

    /// Gaussian low-pass of one power row, bandwidth shrinking with `scale`.
    ///
    /// Multiplies the row's spectrum by `exp(-scale^2 * k^2 / 2)` and returns
    /// the real part of the first `row_len` samples.
    fn smooth(&self, power: &[f64], scale: f64) -> Vec<f64> {
        let mut buffer: Vec<Complex<f64>> = power
            .iter()
            .map(|&p| Complex::new(p, 0.0))
            .chain(std::iter::repeat_n(
                Complex::new(0.0, 0.0),
                self.padded_len - power.len(),
            ))
            .collect();

        self.fft_forward.process(&mut buffer);
        let half_s2 = 0.5 * scale * scale;
        for (c, &k2) in buffer.iter_mut().zip(&self.squared_freqs) {
            *c *= (-half_s2 * k2).exp();
        }
        self.fft_inverse.process(&mut buffer);

        let norm = 1.0 / self.padded_len as f64;
        buffer[..self.row_len].iter().map(|c| c.re * norm).collect()
    }
}

/// `true` when the detrended residue of `samples` is rounding noise.
///
/// A constant or exactly linear row detrends to values within a few ulps of
/// the row's magnitude rather than to exact zeros.
fn is_flat(samples: &[f64], detrended: &[f64]) -> bool {
    let magnitude = samples.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let lo = detrended.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = detrended.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tolerance = FLATNESS_ULPS * f64::EPSILON * samples.len() as f64 * magnitude;
    hi - lo <= tolerance
}

/// Rounding allowance, in units of `EPSILON * n * max|sample|`.
const FLATNESS_ULPS: f64 = 16.0;
