//! Greyscale image loading into intensity matrices.

use std::path::Path;

use image::{GrayImage, imageops};
use ndarray::Array2;
use tracing::{debug, info};

use sedsize_grain::IntensityMatrix;

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading sediment images.
///
/// Images are always converted to 8-bit greyscale. The [`Default`]
/// implementation keeps the full frame.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Whether to keep only the central square of the frame.
    crop_central: bool,
}

impl ReaderConfig {
    /// Set whether to crop the image to its central square.
    pub fn with_crop_central(mut self, crop: bool) -> Self {
        self.crop_central = crop;
        self
    }

    /// Whether the image is cropped to its central square.
    pub fn crop_central(&self) -> bool {
        self.crop_central
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read an image file as 8-bit greyscale.
///
/// Any format enabled in the `image` dependency is accepted; colour images
/// are converted to luma.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, or
/// [`IoError::Image`] if the file cannot be decoded.
pub fn read_greyscale(path: &Path, config: &ReaderConfig) -> Result<GrayImage, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let decoded = image::open(path).map_err(|e| IoError::Image {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let grey = decoded.to_luma8();
    debug!(width = grey.width(), height = grey.height(), "image decoded");

    if config.crop_central {
        Ok(crop_central_square(&grey))
    } else {
        Ok(grey)
    }
}

/// Read an image file straight into an [`IntensityMatrix`].
///
/// # Errors
///
/// Returns the errors of [`read_greyscale`], or [`IoError::Grain`] if the
/// image is smaller than the minimum matrix size.
pub fn read_intensity_matrix(
    path: &Path,
    config: &ReaderConfig,
) -> Result<IntensityMatrix, IoError> {
    let grey = read_greyscale(path, config)?;
    let matrix = intensity_matrix(&grey)?;
    info!(
        path = %path.display(),
        rows = matrix.n_rows(),
        cols = matrix.n_cols(),
        cropped = config.crop_central,
        "intensity matrix loaded"
    );
    Ok(matrix)
}

/// Convert a greyscale image to an intensity matrix.
///
/// Image rows become matrix rows; pixel values keep their 0..=255 range.
///
/// # Errors
///
/// Returns [`IoError::Grain`] if the image is smaller than 3x3 pixels.
pub fn intensity_matrix(image: &GrayImage) -> Result<IntensityMatrix, IoError> {
    let (width, height) = image.dimensions();
    let data = Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        f64::from(image.get_pixel(c as u32, r as u32).0[0])
    });
    Ok(IntensityMatrix::new(data)?)
}

/// Crop an image to the largest square centred in the frame.
///
/// For odd size differences the extra pixel is dropped from the right or
/// bottom edge.
pub fn crop_central_square(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let side = width.min(height);
    let x = width / 2 - side / 2;
    let y = height / 2 - side / 2;
    imageops::crop_imm(image, x, y, side, side).to_image()
}

/// Save a greyscale image, the format following the file extension.
///
/// # Errors
///
/// Returns [`IoError::Image`] if encoding or writing fails.
pub fn save_greyscale(path: &Path, image: &GrayImage) -> Result<(), IoError> {
    image.save(path).map_err(|e| IoError::Image {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
