//! Validated intensity matrix wrapper.

use ndarray::{Array2, ArrayView1};

use crate::error::GrainError;

/// Minimum number of rows and of columns.
const MIN_DIM: usize = 3;

/// A validated greyscale intensity grid (rows x columns).
///
/// Wraps an [`Array2<f64>`] and guarantees:
/// - at least 3 rows and 3 columns
/// - all values are finite
///
/// # Example
///
/// ```
/// use sedsize_grain::IntensityMatrix;
///
/// let m = IntensityMatrix::from_shape_vec(3, 4, (0..12).map(f64::from).collect()).unwrap();
/// assert_eq!(m.n_rows(), 3);
/// assert_eq!(m.n_cols(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct IntensityMatrix {
    data: Array2<f64>,
}

impl IntensityMatrix {
    /// Creates a new `IntensityMatrix` after validating the data.
    ///
    /// # Errors
    ///
    /// Returns [`GrainError::InvalidInput`] if the grid is smaller than 3x3
    /// or contains NaN or infinite values.
    pub fn new(data: Array2<f64>) -> Result<Self, GrainError> {
        let (rows, cols) = data.dim();
        if rows < MIN_DIM || cols < MIN_DIM {
            return Err(GrainError::InvalidInput(format!(
                "intensity matrix is {rows}x{cols}, need at least {MIN_DIM}x{MIN_DIM}"
            )));
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(GrainError::InvalidInput(
                "intensity matrix contains non-finite values".to_string(),
            ));
        }
        Ok(Self { data })
    }

    /// Creates a matrix from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`GrainError::InvalidInput`] if `data.len() != rows * cols` or
    /// the grid fails validation.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, GrainError> {
        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| GrainError::InvalidInput(format!("bad matrix shape: {e}")))?;
        Self::new(array)
    }

    /// Returns the number of rows.
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the number of columns (the row length).
    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// Returns a view of one row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_rows()`.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.row(index)
    }

    /// Population standard deviation of every sample in the grid.
    pub fn std_dev(&self) -> f64 {
        self.data.std(0.0)
    }

    /// Returns the underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Consumes the wrapper, returning the underlying array.
    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }
}
