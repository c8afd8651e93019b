//! Parallel dispatch of the row pipeline over sampled rows.

use rayon::prelude::*;
use tracing::debug;

use sedsize_wavelet::Kernel;

use crate::error::GrainError;
use crate::matrix::IntensityMatrix;
use crate::row::RowPipeline;

/// Indices of the rows analysed for a matrix with `n_rows` rows.
///
/// Every `density`-th row starting at row 1, excluding the first and last
/// rows. A zero `density` is treated as 1.
pub fn sampled_rows(n_rows: usize, density: usize) -> Vec<usize> {
    (1..n_rows.saturating_sub(1)).step_by(density.max(1)).collect()
}

/// Runs `pipeline` over `rows` of `matrix` on a pool of `workers` threads.
///
/// Results are returned in the order of `rows`, whatever order the workers
/// finish in. The first failing row aborts the whole computation.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`GrainError::InvalidConfiguration`] | `workers` is zero or the thread pool cannot be built |
/// | [`GrainError::InvalidInput`] | a row index is out of bounds |
/// | [`GrainError::RowTaskFailure`] | a row fails in the pipeline |
pub fn process_rows<K: Kernel>(
    matrix: &IntensityMatrix,
    pipeline: &RowPipeline<K>,
    rows: &[usize],
    workers: usize,
) -> Result<Vec<Vec<f64>>, GrainError> {
    if workers == 0 {
        return Err(GrainError::InvalidConfiguration(
            "workers must be > 0".to_string(),
        ));
    }
    if let Some(&bad) = rows.iter().find(|&&r| r >= matrix.n_rows()) {
        return Err(GrainError::InvalidInput(format!(
            "row {bad} out of bounds for {} rows",
            matrix.n_rows()
        )));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| GrainError::InvalidConfiguration(format!("cannot build worker pool: {e}")))?;

    debug!(n_rows = rows.len(), workers, "dispatching rows");
    pool.install(|| {
        rows.par_iter()
            .map(|&r| pipeline.process(r, &matrix.row(r).to_vec()))
            .collect::<Result<Vec<_>, _>>()
    })
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use sedsize_wavelet::{Morlet, ScaleConfig};

    use super::*;

    fn striped_matrix(rows: usize, cols: usize) -> IntensityMatrix {
        let data = Array2::from_shape_fn((rows, cols), |(r, c)| {
            let phase = r as f64 * 0.7;
            let period = 6.0 + (r % 5) as f64;
            120.0 + 50.0 * (2.0 * std::f64::consts::PI * c as f64 / period + phase).sin()
        });
        IntensityMatrix::new(data).unwrap()
    }

    #[test]
    fn sampled_rows_skip_borders() {
        assert_eq!(sampled_rows(10, 1), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(sampled_rows(10, 3), vec![1, 4, 7]);
        assert_eq!(sampled_rows(10, 8), vec![1]);
        assert_eq!(sampled_rows(10, 100), vec![1]);
        assert_eq!(sampled_rows(3, 1), vec![1]);
    }

    #[test]
    fn sampled_rows_degenerate_sizes() {
        assert!(sampled_rows(2, 1).is_empty());
        assert!(sampled_rows(0, 1).is_empty());
        assert_eq!(sampled_rows(10, 0), sampled_rows(10, 1));
    }

    #[test]
    fn results_follow_row_order() {
        let matrix = striped_matrix(12, 64);
        let pipeline = RowPipeline::new(64, &ScaleConfig::default(), Morlet::new()).unwrap();
        let rows = sampled_rows(12, 2);
        let results = process_rows(&matrix, &pipeline, &rows, 3).unwrap();

        assert_eq!(results.len(), rows.len());
        for (&r, result) in rows.iter().zip(&results) {
            let expected = pipeline.process(r, &matrix.row(r).to_vec()).unwrap();
            assert_eq!(result, &expected);
            assert_eq!(result.len(), pipeline.scales().len());
        }
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let matrix = striped_matrix(20, 64);
        let pipeline = RowPipeline::new(64, &ScaleConfig::default(), Morlet::new()).unwrap();
        let rows = sampled_rows(20, 1);
        let one = process_rows(&matrix, &pipeline, &rows, 1).unwrap();
        let four = process_rows(&matrix, &pipeline, &rows, 4).unwrap();
        assert_eq!(one, four);
    }

    #[test]
    fn failing_row_aborts() {
        let mut data = Array2::from_shape_fn((8, 64), |(r, c)| ((r * 31 + c * 17) % 23) as f64);
        data.row_mut(3).fill(9.0);
        let matrix = IntensityMatrix::new(data).unwrap();
        let pipeline = RowPipeline::new(64, &ScaleConfig::default(), Morlet::new()).unwrap();

        let err = process_rows(&matrix, &pipeline, &sampled_rows(8, 1), 2).unwrap_err();
        assert!(matches!(err, GrainError::RowTaskFailure { row: 3, .. }));
    }

    #[test]
    fn zero_workers_rejected() {
        let matrix = striped_matrix(5, 64);
        let pipeline = RowPipeline::new(64, &ScaleConfig::default(), Morlet::new()).unwrap();
        let err = process_rows(&matrix, &pipeline, &[1], 0).unwrap_err();
        assert!(matches!(err, GrainError::InvalidConfiguration(_)));
    }

    #[test]
    fn out_of_bounds_row_rejected() {
        let matrix = striped_matrix(5, 64);
        let pipeline = RowPipeline::new(64, &ScaleConfig::default(), Morlet::new()).unwrap();
        let err = process_rows(&matrix, &pipeline, &[1, 5], 1).unwrap_err();
        assert!(matches!(err, GrainError::InvalidInput(_)));
    }
}
