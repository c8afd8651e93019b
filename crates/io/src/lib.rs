//! # sedsize-io
//!
//! Load sediment photographs as greyscale intensity matrices and write
//! grain-size reports as plain text. Bridges image files into the
//! `IntensityMatrix` consumed by `sedsize-grain`.

mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{
    ReaderConfig, crop_central_square, intensity_matrix, read_greyscale, read_intensity_matrix,
    save_greyscale,
};
pub use writer::{ReportPaths, write_psd, write_report, write_summary};
