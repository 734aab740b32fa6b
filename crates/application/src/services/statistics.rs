//! Small numeric helpers shared by the analysis services

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Ordinary least-squares slope of `ys` against `xs`
///
/// Returns `None` with fewer than two points or when all `xs` coincide.
pub fn linear_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;

    let (covariance, variance) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(cov, var), (x, y)| {
            let dx = x - x_mean;
            (dx.mul_add(y - y_mean, cov), dx.mul_add(dx, var))
        });

    if variance <= f64::EPSILON {
        None
    } else {
        Some(covariance / variance)
    }
}

/// Clamp to [0, 1], mapping NaN to zero
pub fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
