//! Signal conditioning helpers used ahead of the transform.

use std::f64::consts::PI;

use crate::error::WaveletError;

/// Removes the least-squares linear trend from `data`.
///
/// The fit is against the sample index `0..n`. A single sample detrends to
/// zero.
///
/// # Errors
///
/// Returns [`WaveletError::SignalTooShort`] if `data` is empty.
pub fn detrend(data: &[f64]) -> Result<Vec<f64>, WaveletError> {
    let n = data.len();
    if n == 0 {
        return Err(WaveletError::SignalTooShort { len: 0, min: 1 });
    }
    if n == 1 {
        return Ok(vec![0.0]);
    }

    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = data.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxx += dx * dx;
        sxy += dx * (y - y_mean);
    }
    let slope = sxy / sxx;

    Ok(data
        .iter()
        .enumerate()
        .map(|(i, &y)| y - y_mean - slope * (i as f64 - x_mean))
        .collect())
}

/// Zero-pads `data` to the next power of two at or above its length.
///
/// The original samples occupy the leading positions unchanged.
pub fn pad_to_power_of_two(data: &[f64]) -> Vec<f64> {
    let npad = data.len().next_power_of_two();
    let mut padded = Vec::with_capacity(npad);
    padded.extend_from_slice(data);
    padded.resize(npad, 0.0);
    padded
}

/// Angular frequencies of an `n`-point FFT grid, in FFT order.
///
/// `[0, 1, ..., n/2 - 1, -n/2, ..., -1] * 2*pi/n`; the Nyquist bin of an even
/// grid is counted as negative.
pub fn angular_frequencies(n: usize) -> Vec<f64> {
    let dw = 2.0 * PI / n as f64;
    let half = n / 2;
    (0..n)
        .map(|i| {
            if i < half {
                i as f64 * dw
            } else {
                -((n - i) as f64) * dw
            }
        })
        .collect()
}

/// Squared angular frequencies of an `n`-point FFT grid.
pub fn squared_frequencies(n: usize) -> Vec<f64> {
    angular_frequencies(n).into_iter().map(|w| w * w).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn detrend_removes_line() {
        let data: Vec<f64> = (0..50).map(|i| 3.0 + 0.25 * i as f64).collect();
        let out = detrend(&data).unwrap();
        for v in out {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn detrend_keeps_oscillation() {
        let data: Vec<f64> = (0..64)
            .map(|i| 10.0 + 0.5 * i as f64 + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let out = detrend(&data).unwrap();
        let mean = out.iter().sum::<f64>() / out.len() as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
        assert!(out.iter().all(|v| (v.abs() - 1.0).abs() < 0.05));
    }

    #[test]
    fn detrend_constant_is_exactly_zero() {
        let out = detrend(&[7.5; 16]).unwrap();
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn detrend_edge_lengths() {
        assert!(matches!(
            detrend(&[]).unwrap_err(),
            WaveletError::SignalTooShort { len: 0, min: 1 }
        ));
        assert_eq!(detrend(&[4.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn padding_lengths_and_content() {
        for n in 1..=70 {
            let data: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
            let padded = pad_to_power_of_two(&data);
            let npad = padded.len();
            assert!(npad.is_power_of_two());
            assert!(npad >= n);
            assert!(npad / 2 < n, "{npad} is not the smallest power of two >= {n}");
            assert_eq!(&padded[..n], data.as_slice());
            assert!(padded[n..].iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn angular_frequencies_layout() {
        let w = angular_frequencies(8);
        let dw = 2.0 * PI / 8.0;
        let expected = [0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0];
        for (got, want) in w.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want * dw, epsilon = 1e-15);
        }
    }

    #[test]
    fn squared_frequencies_symmetric() {
        let k2 = squared_frequencies(16);
        assert_eq!(k2[0], 0.0);
        for i in 1..8 {
            assert_abs_diff_eq!(k2[i], k2[16 - i], epsilon = 1e-12);
        }
    }
}
