//! Analyzing wavelets, defined by their Fourier transform.

use std::f64::consts::PI;

use num_complex::Complex;

/// An analyzing wavelet expressed in the frequency domain.
///
/// Implementors map a scaled angular frequency `s * omega` to the wavelet's
/// complex Fourier response. The transform in [`cwt`](crate::cwt) only ever
/// talks to this trait, so new wavelet families plug in without touching it.
pub trait Kernel: Send + Sync {
    /// Evaluates the Fourier response at one scaled angular frequency.
    fn evaluate(&self, scaled_omega: f64) -> Complex<f64>;

    /// Ratio between a scale and its equivalent Fourier period.
    fn fourier_wavelength(&self) -> f64;

    /// Evaluates the Fourier response over an array of scaled frequencies.
    fn response(&self, scaled_omega: &[f64]) -> Vec<Complex<f64>> {
        scaled_omega.iter().map(|&w| self.evaluate(w)).collect()
    }

    /// Converts a scale to its equivalent Fourier period.
    fn scale_to_period(&self, scale: f64) -> f64 {
        scale * self.fourier_wavelength()
    }
}

/// The analytic Morlet wavelet.
///
/// `psi_hat(w) = 0.75112554 * exp(-(w - w0)^2 / 2)` for `w >= 0`, and zero
/// for negative frequencies, with `w0 = 6`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Morlet;

impl Morlet {
    /// Non-dimensional center frequency.
    pub const OMEGA0: f64 = 6.0;

    /// Normalization constant of the Fourier response.
    pub const NORM: f64 = 0.751_125_54;

    /// Creates the Morlet kernel.
    pub fn new() -> Self {
        Self
    }

    /// Returns the center frequency.
    pub fn omega0(&self) -> f64 {
        Self::OMEGA0
    }
}

impl Kernel for Morlet {
    fn evaluate(&self, scaled_omega: f64) -> Complex<f64> {
        if scaled_omega < 0.0 {
            return Complex::new(0.0, 0.0);
        }
        let shifted = scaled_omega - Self::OMEGA0;
        Complex::new(Self::NORM * (-0.5 * shifted * shifted).exp(), 0.0)
    }

    fn fourier_wavelength(&self) -> f64 {
        4.0 * PI / (Self::OMEGA0 + (2.0 + Self::OMEGA0 * Self::OMEGA0).sqrt())
    }
}
