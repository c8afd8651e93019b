//! # sedsize-wavelet
//!
//! Fourier-domain Continuous Wavelet Transform with a pluggable analyzing
//! kernel, plus the scale generation and signal conditioning it relies on.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["row samples"] -->|"detrend()"| B["detrended"]
//!     B -->|"pad_to_power_of_two()"| C["padded signal"]
//!     D["build_scales(n, &config)?"] --> E["ScaleSet"]
//!     C -->|"cwt(&signal, &scales, &Morlet)?"| F["CwtCoefficients"]
//!     E --> F
//!     F --> G[".scaled_power()"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use sedsize_wavelet::{Morlet, ScaleConfig, build_scales, cwt, pad_to_power_of_two};
//!
//! let row: Vec<f64> = (0..100).map(|i| (i as f64 * 0.8).sin()).collect();
//! let signal = pad_to_power_of_two(&row);
//! let scales = build_scales(signal.len(), &ScaleConfig::new()).unwrap();
//! let coeffs = cwt(&signal, &scales, &Morlet::new()).unwrap();
//! assert_eq!(coeffs.n_scales(), scales.len());
//! ```

mod cwt;
mod error;
mod kernel;
mod scales;
mod signal;

pub use cwt::{Cwt, CwtCoefficients, cwt};
pub use error::WaveletError;
pub use kernel::{Kernel, Morlet};
pub use scales::{ScaleConfig, ScaleSet, Scaling, build_scales};
pub use signal::{angular_frequencies, detrend, pad_to_power_of_two, squared_frequencies};
