//! Top-level grain-size distribution estimate.

use tracing::info;

use sedsize_wavelet::{Kernel, Morlet};

use crate::aggregate::{aggregate, kaiser_beta};
use crate::config::GrainConfig;
use crate::distribution::GrainSizeDistribution;
use crate::error::GrainError;
use crate::matrix::IntensityMatrix;
use crate::row::RowPipeline;
use crate::schedule::{process_rows, sampled_rows};

/// Estimates the grain-size distribution of a sediment image with the Morlet
/// wavelet.
///
/// Rows `1, 1 + density, ...` (excluding the border rows) are processed in
/// parallel on `config.workers()` threads, then aggregated into a
/// distribution in the physical units of `config.resolution()`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`GrainError::InvalidConfiguration`] | invalid configuration or rows too short for any scale |
/// | [`GrainError::InvalidInput`] | the intensity matrix has no usable contrast |
/// | [`GrainError::RowTaskFailure`] | any sampled row fails; no partial result is returned |
/// | [`GrainError::DegenerateDistribution`] | no cross-row variance, or zero spread |
pub fn compute_grain_size_distribution(
    matrix: &IntensityMatrix,
    config: &GrainConfig,
) -> Result<GrainSizeDistribution, GrainError> {
    compute_with_kernel(matrix, config, Morlet::new())
}

/// Same as [`compute_grain_size_distribution`] with a caller-supplied
/// analyzing kernel.
///
/// # Errors
///
/// See [`compute_grain_size_distribution`].
#[tracing::instrument(skip_all, fields(rows = matrix.n_rows(), cols = matrix.n_cols()))]
pub fn compute_with_kernel<K: Kernel>(
    matrix: &IntensityMatrix,
    config: &GrainConfig,
    kernel: K,
) -> Result<GrainSizeDistribution, GrainError> {
    config.validate()?;

    let row_len = matrix.n_cols();
    let pipeline = RowPipeline::new(row_len, config.scale_config(), kernel)?;
    let rows = sampled_rows(matrix.n_rows(), config.density());
    info!(
        n_sampled = rows.len(),
        density = config.density(),
        n_scales = pipeline.scales().len(),
        padded_len = pipeline.padded_len(),
        "analysing rows"
    );

    let row_vectors = process_rows(matrix, &pipeline, &rows, config.workers())?;

    let beta = kaiser_beta(matrix.std_dev())?;
    let distribution = aggregate(
        &row_vectors,
        pipeline.scales().as_slice(),
        row_len,
        beta,
        config.resolution(),
    )?;

    info!(
        mean = distribution.mean(),
        spread = distribution.spread(),
        skewness = distribution.skewness(),
        kurtosis = distribution.kurtosis(),
        "grain-size distribution computed"
    );
    Ok(distribution)
}
