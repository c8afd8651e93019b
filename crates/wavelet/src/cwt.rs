//! Continuous Wavelet Transform via FFT-based convolution.
//!
//! The signal is transformed once; for every scale the kernel's Fourier
//! response at `omega * scale` is multiplied in and the product inverse
//! transformed.

use std::f64::consts::PI;
use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use tracing::trace;

use crate::error::WaveletError;
use crate::kernel::Kernel;
use crate::scales::ScaleSet;
use crate::signal::angular_frequencies;

/// Complex wavelet coefficients `[n_scales][n_times]` with their scales.
#[derive(Clone, Debug)]
pub struct CwtCoefficients {
    coefficients: Vec<Vec<Complex<f64>>>,
    scales: Vec<f64>,
}

impl CwtCoefficients {
    /// Returns the complex wavelet coefficients `[n_scales][n_times]`.
    pub fn coefficients(&self) -> &[Vec<Complex<f64>>] {
        &self.coefficients
    }

    /// Returns the scale values, one per coefficient row.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Returns the number of scales.
    pub fn n_scales(&self) -> usize {
        self.scales.len()
    }

    /// Returns the number of samples per coefficient row.
    pub fn n_times(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    /// Drops every sample at or beyond `len` from each row.
    ///
    /// Used to discard the zero-padded tail of a transformed signal.
    pub fn truncate(&mut self, len: usize) {
        for row in &mut self.coefficients {
            row.truncate(len);
        }
    }

    /// Computes the wavelet power `|W(s,t)|^2`.
    pub fn power(&self) -> Vec<Vec<f64>> {
        self.coefficients
            .iter()
            .map(|row| row.iter().map(|c| c.norm_sqr()).collect())
            .collect()
    }

    /// Computes the scale-normalized power `|W(s,t)|^2 / s`.
    pub fn scaled_power(&self) -> Vec<Vec<f64>> {
        self.coefficients
            .iter()
            .zip(&self.scales)
            .map(|(row, &scale)| row.iter().map(|c| c.norm_sqr() / scale).collect())
            .collect()
    }
}

/// A Continuous Wavelet Transform planned for one signal length.
///
/// Holds the forward and inverse FFT plans and the angular frequency axis so
/// repeated transforms of equal-length signals skip planning. Plans are
/// shared read-only, so one `Cwt` can serve many threads.
#[derive(Clone)]
pub struct Cwt {
    len: usize,
    omega: Vec<f64>,
    fft_forward: Arc<dyn Fft<f64>>,
    fft_inverse: Arc<dyn Fft<f64>>,
}

impl Cwt {
    /// Plans the transform for signals of `len` samples.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::NotPowerOfTwo`] if `len` is not a power of two.
    pub fn new(len: usize) -> Result<Self, WaveletError> {
        if !len.is_power_of_two() {
            return Err(WaveletError::NotPowerOfTwo { len });
        }
        let mut planner = FftPlanner::new();
        Ok(Self {
            len,
            omega: angular_frequencies(len),
            fft_forward: planner.plan_fft_forward(len),
            fft_inverse: planner.plan_fft_inverse(len),
        })
    }

    /// Returns the planned signal length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a planned length is a power of two.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Transforms `signal` with `kernel` at every scale.
    ///
    /// For each scale `s` the coefficient row is
    /// `ifft(kernel(omega * s) * sqrt(2*pi*s) * fft(signal))`, with the
    /// inverse transform normalized by `1/n`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::LengthMismatch`] | `signal.len()` differs from the planned length |
    /// | [`WaveletError::EmptyScales`] | `scales` is empty |
    pub fn transform<K>(
        &self,
        signal: &[f64],
        scales: &ScaleSet,
        kernel: &K,
    ) -> Result<CwtCoefficients, WaveletError>
    where
        K: Kernel + ?Sized,
    {
        let n = signal.len();
        if n != self.len {
            return Err(WaveletError::LengthMismatch {
                len: n,
                expected: self.len,
            });
        }
        if scales.is_empty() {
            return Err(WaveletError::EmptyScales);
        }

        let mut signal_fft: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.fft_forward.process(&mut signal_fft);

        let inv_n = 1.0 / n as f64;
        let mut coefficients = Vec::with_capacity(scales.len());
        let mut scaled_omega = vec![0.0; n];

        for &scale in scales.as_slice() {
            for (dst, &w) in scaled_omega.iter_mut().zip(&self.omega) {
                *dst = w * scale;
            }
            let daughter = kernel.response(&scaled_omega);
            let norm = (2.0 * PI * scale).sqrt() * inv_n;

            let mut row: Vec<Complex<f64>> = signal_fft
                .iter()
                .zip(&daughter)
                .map(|(&s, &d)| s * d * norm)
                .collect();
            self.fft_inverse.process(&mut row);

            coefficients.push(row);
        }
        trace!(n, n_scales = scales.len(), "cwt computed");

        Ok(CwtCoefficients {
            coefficients,
            scales: scales.as_slice().to_vec(),
        })
    }
}

impl std::fmt::Debug for Cwt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cwt").field("len", &self.len).finish_non_exhaustive()
    }
}

/// Computes the Continuous Wavelet Transform of `signal` with `kernel`.
///
/// Plans a [`Cwt`] for `signal.len()` and runs it once. Use [`Cwt`]
/// directly to transform many signals of one length.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::NotPowerOfTwo`] | `signal.len()` is not a power of two |
/// | [`WaveletError::EmptyScales`] | `scales` is empty |
pub fn cwt<K>(
    signal: &[f64],
    scales: &ScaleSet,
    kernel: &K,
) -> Result<CwtCoefficients, WaveletError>
where
    K: Kernel + ?Sized,
{
    Cwt::new(signal.len())?.transform(signal, scales, kernel)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::kernel::Morlet;
    use crate::scales::{ScaleConfig, build_scales};

    fn sine(n: usize, period: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * i as f64 / period).sin())
            .collect()
    }

    #[test]
    fn rejects_non_power_of_two() {
        let scales = ScaleSet::new(vec![2.0, 4.0]).unwrap();
        let err = cwt(&[0.0; 100], &scales, &Morlet).unwrap_err();
        assert!(matches!(err, WaveletError::NotPowerOfTwo { len: 100 }));
    }

    #[test]
    fn output_dimensions() {
        let signal = sine(128, 12.0);
        let scales = build_scales(128, &ScaleConfig::new()).unwrap();
        let result = cwt(&signal, &scales, &Morlet).unwrap();

        assert_eq!(result.n_scales(), scales.len());
        assert_eq!(result.coefficients().len(), scales.len());
        assert_eq!(result.n_times(), 128);
        assert_eq!(result.scales(), scales.as_slice());
    }

    #[test]
    fn truncate_discards_padding() {
        let signal = sine(64, 8.0);
        let scales = build_scales(64, &ScaleConfig::new()).unwrap();
        let mut result = cwt(&signal, &scales, &Morlet).unwrap();
        result.truncate(50);
        assert!(result.coefficients().iter().all(|row| row.len() == 50));
        assert_eq!(result.n_times(), 50);
    }

    #[test]
    fn power_is_nonnegative_and_consistent() {
        let signal = sine(64, 8.0);
        let scales = build_scales(64, &ScaleConfig::new()).unwrap();
        let result = cwt(&signal, &scales, &Morlet).unwrap();

        let power = result.power();
        let scaled = result.scaled_power();
        for (s, (p_row, sp_row)) in power.iter().zip(&scaled).enumerate() {
            for (&p, &sp) in p_row.iter().zip(sp_row) {
                assert!(p >= 0.0);
                assert_relative_eq!(sp, p / scales.as_slice()[s], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn zero_signal_zero_coefficients() {
        let scales = build_scales(64, &ScaleConfig::new()).unwrap();
        let result = cwt(&[0.0; 64], &scales, &Morlet).unwrap();
        for row in result.power() {
            assert!(row.iter().all(|&p| p == 0.0));
        }
    }

    #[test]
    fn sine_peak_at_matching_scale() {
        let kernel = Morlet::new();
        let scales = build_scales(256, &ScaleConfig::new()).unwrap();

        for period in [16.0, 32.0] {
            let result = cwt(&sine(256, period), &scales, &kernel).unwrap();

            let mean_magnitude: Vec<f64> = result
                .coefficients()
                .iter()
                .map(|row| row.iter().map(|c| c.norm()).sum::<f64>() / row.len() as f64)
                .collect();
            let (peak_idx, _) = mean_magnitude
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
                .unwrap();

            // scale whose equivalent Fourier period is closest to the injected one
            let (nearest_idx, _) = scales
                .as_slice()
                .iter()
                .map(|&s| (kernel.scale_to_period(s) - period).abs())
                .enumerate()
                .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
                .unwrap();

            assert!(
                peak_idx.abs_diff(nearest_idx) <= 1,
                "period {period}: peak at scale index {peak_idx}, expected near {nearest_idx}"
            );
            let peak_period = kernel.scale_to_period(scales.as_slice()[peak_idx]);
            let relative_error = ((peak_period - period) / period).abs();
            assert!(
                relative_error < 0.1,
                "peak period {peak_period} is not within 10% of {period}"
            );
        }
    }

    #[test]
    fn planned_transform_matches_one_shot() {
        let scales = build_scales(128, &ScaleConfig::new()).unwrap();
        let planned = Cwt::new(128).unwrap();
        assert_eq!(planned.len(), 128);
        for period in [6.0, 20.0] {
            let signal = sine(128, period);
            let a = planned.transform(&signal, &scales, &Morlet).unwrap();
            let b = cwt(&signal, &scales, &Morlet).unwrap();
            assert_eq!(a.coefficients(), b.coefficients());
        }
    }

    #[test]
    fn planned_transform_rejects_other_lengths() {
        assert!(matches!(
            Cwt::new(96).unwrap_err(),
            WaveletError::NotPowerOfTwo { len: 96 }
        ));
        let scales = ScaleSet::new(vec![2.0, 4.0]).unwrap();
        let err = Cwt::new(64).unwrap().transform(&[0.0; 32], &scales, &Morlet).unwrap_err();
        assert!(matches!(err, WaveletError::LengthMismatch { len: 32, expected: 64 }));
    }

    #[test]
    fn coefficients_are_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CwtCoefficients>();
        assert_impl::<Cwt>();
    }
}
