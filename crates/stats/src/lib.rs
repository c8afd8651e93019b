//! Statistical helper functions for wavelet granulometry.
//!
//! Variances here use the population (N) denominator, so a single sample
//! has zero variance rather than an undefined one.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population variance (N denominator). Returns 0.0 if empty.
pub fn variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation (N denominator). Returns 0.0 if empty.
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Scales `data` so it sums to one.
///
/// Returns `None` if the sum is not finite and strictly positive.
pub fn normalize_sum(data: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = data.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    Some(data.iter().map(|&x| x / total).collect())
}

/// Exponentially scaled modified Bessel function of the first kind, order 0.
///
/// Returns `exp(-|x|) * I0(x)`, which stays finite for large arguments.
/// Polynomial approximations from Abramowitz & Stegun 9.8.1 and 9.8.2.
pub fn bessel_i0e(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 3.75 {
        let y = (x / 3.75).powi(2);
        let i0 = 1.0
            + y * (3.515_622_9
                + y * (3.089_942_4
                    + y * (1.206_749_2
                        + y * (0.265_973_2 + y * (0.036_076_8 + y * 0.004_581_3)))));
        i0 * (-ax).exp()
    } else {
        let y = 3.75 / ax;
        let poly = 0.398_942_28
            + y * (0.013_285_92
                + y * (0.002_253_19
                    + y * (-0.001_575_65
                        + y * (0.009_162_81
                            + y * (-0.020_577_06
                                + y * (0.026_355_37 + y * (-0.016_476_33 + y * 0.003_923_77)))))));
        poly / ax.sqrt()
    }
}

/// Kaiser window of `len` points with shape parameter `beta`.
///
/// `w[n] = I0(beta * sqrt(1 - r^2)) / I0(beta)` with `r = 2n / (len - 1) - 1`.
/// Computed through [`bessel_i0e`] so very large `beta` values do not
/// overflow. A negative `beta` is treated as zero (rectangular window).
pub fn kaiser_window(len: usize, beta: f64) -> Vec<f64> {
    if len <= 1 {
        return vec![1.0; len];
    }

    let beta = beta.max(0.0);
    let denom = bessel_i0e(beta);
    let span = (len - 1) as f64;

    (0..len)
        .map(|n| {
            let ratio = 2.0 * n as f64 / span - 1.0;
            let inside = (1.0 - ratio * ratio).max(0.0).sqrt();
            let arg = beta * inside;
            bessel_i0e(arg) / denom * (arg - beta).exp()
        })
        .collect()
}

/// Weighted mean `sum(w * x)`.
///
/// Weights are expected to sum to one; they are not renormalized.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    values.iter().zip(weights).map(|(&x, &w)| w * x).sum()
}

/// Weighted central moment `sum(w * (x - center)^order)`.
pub fn weighted_central_moment(values: &[f64], weights: &[f64], center: f64, order: i32) -> f64 {
    values
        .iter()
        .zip(weights)
        .map(|(&x, &w)| w * (x - center).powi(order))
        .sum()
}
