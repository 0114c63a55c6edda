//! Statistical primitives.
//!
//! Pearson correlation, OLS slope and z-score standardization over
//! day-aligned series. Degenerate inputs (fewer than two points, zero
//! variance, sums that overflow) resolve to zero rather than NaN.

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// True when every value equals the first one (vacuously true when empty).
///
/// Checked exactly: a floating-point mean of identical values can drift
/// off the value itself and leave a spurious non-zero spread.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Population standard deviation (divisor `n`).
///
/// Zero for constant or empty input, and when the variance overflows.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if is_constant(values) {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    finite_or_zero(variance.sqrt())
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Centered sums over the paired prefix of `x` and `y`: (sxy, sxx, syy).
fn centered_sums(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    let (mx, my) = (mean(x), mean(y));

    x.iter()
        .zip(y)
        .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (xi, yi)| {
            let dx = xi - mx;
            let dy = yi - my;
            (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
        })
}

/// Pearson correlation coefficient of `x` and `y`.
///
/// Returns 0 when fewer than two pairs exist, either side is constant,
/// or the centered sums overflow.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 || is_constant(&x[..n]) || is_constant(&y[..n]) {
        return 0.0;
    }
    let (sxy, sxx, syy) = centered_sums(x, y);
    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }
    // Rounding can push |r| a hair past 1 on perfectly collinear data.
    finite_or_zero(sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

/// Ordinary least squares slope of `y` on `x`.
///
/// Returns 0 when fewer than two pairs exist, `x` is constant, or the
/// sums overflow.
pub fn regression_slope(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 || is_constant(&x[..n]) {
        return 0.0;
    }
    let (sxy, sxx, _) = centered_sums(x, y);
    if sxx == 0.0 {
        return 0.0;
    }
    finite_or_zero(sxy / sxx)
}

/// Z-score transform using the population standard deviation.
///
/// A constant series maps to all zeros of the same length.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let sd = population_std_dev(values);
    if sd == 0.0 {
        return vec![0.0; values.len()];
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) / sd).collect()
}
