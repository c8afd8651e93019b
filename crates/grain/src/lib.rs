//! # sedsize-grain
//!
//! Grain-size distributions of sediment from the wavelet power of image rows.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["IntensityMatrix"] -->|"sampled_rows()"| B["row indices"]
//!     B -->|"RowPipeline::process() on a worker pool"| C["per-row variance vectors"]
//!     C -->|"aggregate()"| D["GrainSizeDistribution"]
//!     D --> E[".sizes() / .weights()"]
//!     D --> F[".mean() .spread() .skewness() .kurtosis()"]
//! ```
//!
//! Each row is detrended, zero-padded to a power of two and transformed with
//! the Morlet CWT. The scale-normalized power is smoothed per scale and
//! reduced to its variance along the row. The variance across rows, tapered
//! by a Kaiser window, gives the weight of each scale. Scales become grain
//! sizes through a fixed factor of 1.5 and the pixel resolution.
//!
//! ## Quick Start
//!
//! ```
//! use sedsize_grain::{GrainConfig, IntensityMatrix, compute_grain_size_distribution};
//!
//! let (rows, cols) = (16, 64);
//! let data: Vec<f64> = (0..rows * cols)
//!     .map(|i| {
//!         let (r, c) = ((i / cols) as f64, (i % cols) as f64);
//!         128.0 + (20.0 + 3.0 * r) * (c * 0.8 + r).sin()
//!     })
//!     .collect();
//! let matrix = IntensityMatrix::from_shape_vec(rows, cols, data).unwrap();
//! let config = GrainConfig::new().with_density(1).with_workers(2);
//!
//! let dist = compute_grain_size_distribution(&matrix, &config).unwrap();
//! assert!((dist.weights().iter().sum::<f64>() - 1.0).abs() < 1e-6);
//! ```

mod aggregate;
mod config;
mod distribution;
mod error;
mod granulometry;
mod matrix;
mod row;
mod schedule;

pub use aggregate::{RESOLVABLE_DIVISOR, SIZE_FACTOR, aggregate, kaiser_beta};
pub use config::GrainConfig;
pub use distribution::{GrainSizeDistribution, MOMENT_NORMALIZER};
pub use error::GrainError;
pub use granulometry::{compute_grain_size_distribution, compute_with_kernel};
pub use matrix::IntensityMatrix;
pub use row::RowPipeline;
pub use schedule::{process_rows, sampled_rows};

pub use sedsize_wavelet::{Kernel, Morlet, ScaleConfig, Scaling};
