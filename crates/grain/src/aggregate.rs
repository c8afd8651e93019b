//! Cross-row aggregation of per-row variance vectors into a distribution.

use ndarray::{Array2, Axis};
use tracing::debug;

use sedsize_stats::{kaiser_window, normalize_sum};

use crate::distribution::GrainSizeDistribution;
use crate::error::GrainError;

/// Empirical factor converting an analysis scale to a grain diameter in pixels.
pub const SIZE_FACTOR: f64 = 1.5;

/// Scales at or above `row_len / RESOLVABLE_DIVISOR` are discarded.
pub const RESOLVABLE_DIVISOR: f64 = 3.0;

/// Kaiser window shape derived from the intensity standard deviation.
///
/// `beta = 6 * trunc(100 / std)`: low-contrast images get a narrower taper
/// across scales.
///
/// # Errors
///
/// Returns [`GrainError::InvalidInput`] if `intensity_std` is not finite
/// and positive, or the resulting shape is not finite.
pub fn kaiser_beta(intensity_std: f64) -> Result<f64, GrainError> {
    if !intensity_std.is_finite() || intensity_std <= 0.0 {
        return Err(GrainError::InvalidInput(format!(
            "intensity standard deviation must be finite and > 0, got {intensity_std}"
        )));
    }
    let beta = 6.0 * (100.0 / intensity_std).trunc();
    if !beta.is_finite() {
        return Err(GrainError::InvalidInput(format!(
            "intensity standard deviation {intensity_std} is too small"
        )));
    }
    Ok(beta)
}

/// Aggregates per-row variance vectors into a grain-size distribution.
///
/// 1. population variance across rows for every scale, normalized to sum 1;
/// 2. tapered by a Kaiser window with shape `beta`, renormalized;
/// 3. scales at or above `row_len / 3` dropped, weights renormalized;
/// 4. scales converted to sizes: `scale * 1.5 * resolution`;
/// 5. weighted moments via [`GrainSizeDistribution::from_weighted`].
///
/// A single row yields zero variance at every scale.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`GrainError::InvalidInput`] | no row vectors, or a length differs from the scale count |
/// | [`GrainError::DegenerateDistribution`] | nothing survives normalization, or zero spread |
pub fn aggregate(
    row_vectors: &[Vec<f64>],
    scales: &[f64],
    row_len: usize,
    beta: f64,
    resolution: f64,
) -> Result<GrainSizeDistribution, GrainError> {
    if row_vectors.is_empty() {
        return Err(GrainError::InvalidInput("no row results to aggregate".to_string()));
    }
    let n_scales = scales.len();
    if let Some(bad) = row_vectors.iter().find(|v| v.len() != n_scales) {
        return Err(GrainError::InvalidInput(format!(
            "row result has {} values, expected one per scale ({n_scales})",
            bad.len()
        )));
    }

    // rows x scales
    let flat: Vec<f64> = row_vectors.iter().flatten().copied().collect();
    let stacked = Array2::from_shape_vec((row_vectors.len(), n_scales), flat)
        .map_err(|e| GrainError::InvalidInput(format!("cannot stack row results: {e}")))?;
    let cross_row = stacked.var_axis(Axis(0), 0.0).to_vec();

    let cross_row = normalize_sum(&cross_row).ok_or_else(|| {
        GrainError::DegenerateDistribution(format!(
            "no variance across {} sampled row(s); sample at least two differing rows",
            row_vectors.len()
        ))
    })?;

    let window = kaiser_window(n_scales, beta);
    let tapered: Vec<f64> = cross_row.iter().zip(&window).map(|(v, w)| v * w).collect();
    let tapered = normalize_sum(&tapered).ok_or_else(|| {
        GrainError::DegenerateDistribution(format!("Kaiser taper (beta {beta}) removed all weight"))
    })?;

    let limit = row_len as f64 / RESOLVABLE_DIVISOR;
    let (kept_scales, kept_weights): (Vec<f64>, Vec<f64>) = scales
        .iter()
        .zip(&tapered)
        .filter(|&(&s, _)| s < limit)
        .map(|(&s, &w)| (s, w))
        .unzip();
    debug!(
        n_scales,
        n_kept = kept_scales.len(),
        limit,
        beta,
        "scales filtered to resolvable range"
    );

    let weights = normalize_sum(&kept_weights).ok_or_else(|| {
        GrainError::DegenerateDistribution(format!("no weight on scales below {limit}"))
    })?;
    let sizes: Vec<f64> = kept_scales
        .iter()
        .map(|&s| s * SIZE_FACTOR * resolution)
        .collect();

    GrainSizeDistribution::from_weighted(sizes, weights)
}
