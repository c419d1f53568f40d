//! Descriptive statistics on one-dimensional samples.
//!
//! Extrema, mean and variance are delegated to `statrs`. Moment-based shape
//! statistics and quantiles follow the conventions of the scientific Python
//! stack, so results can be compared against it directly. Missing values are
//! encoded as `NaN`; see [`crate::sample::NanPolicy`].
//!
//! Axis-wise variants for 2-D arrays live in [`axis`].

use crate::sample::{resolve_missing, NanPolicy};
use statrs::statistics::Statistics;
use std::cmp::Ordering;

pub mod axis;

pub use axis::ArrayStats;

/// How a quantile falling between two data points `i < j` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// `i + (j - i) * fraction`
    #[default]
    Linear,
    /// `i`
    Lower,
    /// `j`
    Higher,
    /// Whichever of `i` or `j` is nearest, ties going to the even index.
    Nearest,
    /// `(i + j) / 2`
    Midpoint,
}

/// Which kurtosis convention to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KurtosisDefinition {
    /// Normal distribution has kurtosis 3.
    #[default]
    Pearson,
    /// Excess kurtosis: normal distribution has kurtosis 0.
    Fisher,
}

/// Smallest value of `x`.
///
/// Any `NaN` in the input makes the result `NaN`. Empty input is an error.
pub fn minimum(x: &[f64]) -> anyhow::Result<f64> {
    if x.is_empty() {
        return Err(anyhow::anyhow!(
            "Cannot take the minimum of an empty sample"
        ));
    }
    Ok(Statistics::min(x))
}

/// Largest value of `x`.
///
/// Any `NaN` in the input makes the result `NaN`. Empty input is an error.
pub fn maximum(x: &[f64]) -> anyhow::Result<f64> {
    if x.is_empty() {
        return Err(anyhow::anyhow!(
            "Cannot take the maximum of an empty sample"
        ));
    }
    Ok(Statistics::max(x))
}

/// Spread between the largest and smallest value.
pub fn range(x: &[f64]) -> anyhow::Result<f64> {
    Ok(maximum(x)? - minimum(x)?)
}

/// Biased central moments `(n, m2, m3, m4)` of already-cleaned data.
fn central_moments(values: &[f64]) -> (f64, f64, f64, f64) {
    let n = values.len() as f64;
    let mean = Statistics::mean(values);

    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }

    (n, m2 / n, m3 / n, m4 / n)
}

/// Decimal resolution of `f64`, the relative precision below which a spread is noise.
const RESOLUTION: f64 = 1e-15;

/// Variance indistinguishable from zero at the precision of the mean.
fn is_degenerate(values: &[f64], m2: f64) -> bool {
    let mean = Statistics::mean(values);
    m2 <= (RESOLUTION * mean).powi(2)
}

/// Sample skewness, `m3 / m2^1.5`.
///
/// With `bias == false` the adjusted Fisher-Pearson coefficient is returned when
/// more than two observations are available. Constant data gives `NaN`.
pub fn skewness(x: &[f64], bias: bool, nan_policy: NanPolicy) -> anyhow::Result<f64> {
    let Some(values) = resolve_missing(x, nan_policy)? else {
        return Ok(f64::NAN);
    };
    if values.is_empty() {
        return Ok(f64::NAN);
    }

    let (n, m2, m3, _) = central_moments(&values);
    if is_degenerate(&values, m2) {
        tracing::debug!(n, "skewness undefined for zero variance");
        return Ok(f64::NAN);
    }

    let g1 = m3 / m2.powf(1.5);
    if !bias && n > 2.0 {
        Ok(((n - 1.0) * n).sqrt() / (n - 2.0) * g1)
    } else {
        Ok(g1)
    }
}

/// Sample kurtosis, `m4 / m2^2`.
///
/// With `bias == false` the estimator is corrected for statistical bias when
/// more than three observations are available. [`KurtosisDefinition::Fisher`]
/// subtracts 3 so that a normal distribution scores 0. Constant data gives `NaN`.
pub fn kurtosis(
    x: &[f64],
    definition: KurtosisDefinition,
    bias: bool,
    nan_policy: NanPolicy,
) -> anyhow::Result<f64> {
    let Some(values) = resolve_missing(x, nan_policy)? else {
        return Ok(f64::NAN);
    };
    if values.is_empty() {
        return Ok(f64::NAN);
    }

    let (n, m2, _, m4) = central_moments(&values);
    if is_degenerate(&values, m2) {
        tracing::debug!(n, "kurtosis undefined for zero variance");
        return Ok(f64::NAN);
    }

    let mut g2 = m4 / (m2 * m2);
    if !bias && n > 3.0 {
        let corrected =
            ((n * n - 1.0) * g2 - 3.0 * (n - 1.0).powi(2)) / ((n - 2.0) * (n - 3.0));
        g2 = corrected + 3.0;
    }

    Ok(match definition {
        KurtosisDefinition::Pearson => g2,
        KurtosisDefinition::Fisher => g2 - 3.0,
    })
}

/// Compute the quantiles `qs` of `x`.
///
/// Every `q` must lie in `[0, 1]`. The data is sorted and each quantile is read
/// at the virtual index `q * (n - 1)`, resolved according to `interpolation`.
/// A `NaN` anywhere in `x` makes every result `NaN`.
pub fn quantiles(x: &[f64], qs: &[f64], interpolation: Interpolation) -> anyhow::Result<Vec<f64>> {
    if let Some(&bad) = qs.iter().find(|q| !(0.0..=1.0).contains(*q)) {
        return Err(anyhow::anyhow!(
            "Quantiles must be in the range [0, 1], got {}",
            bad
        ));
    }
    if x.is_empty() {
        return Err(anyhow::anyhow!(
            "Cannot compute quantiles of an empty sample"
        ));
    }
    if x.iter().any(|v| v.is_nan()) {
        return Ok(vec![f64::NAN; qs.len()]);
    }

    let mut sorted = x.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Ok(qs
        .iter()
        .map(|&q| quantile_sorted(&sorted, q, interpolation))
        .collect())
}

/// Single-quantile convenience over [`quantiles`].
pub fn quantile(x: &[f64], q: f64, interpolation: Interpolation) -> anyhow::Result<f64> {
    Ok(quantiles(x, &[q], interpolation)?[0])
}

/// Interquartile range: 75th minus 25th percentile.
pub fn iqr(x: &[f64], interpolation: Interpolation) -> anyhow::Result<f64> {
    let q = quantiles(x, &[0.25, 0.75], interpolation)?;
    Ok(q[1] - q[0])
}

fn quantile_sorted(sorted: &[f64], q: f64, interpolation: Interpolation) -> f64 {
    let last = sorted.len() - 1;
    let virtual_index = q * last as f64;
    let lo = (virtual_index.floor() as usize).min(last);
    let hi = (virtual_index.ceil() as usize).min(last);
    let fraction = virtual_index - lo as f64;
    let (a, b) = (sorted[lo], sorted[hi]);

    match interpolation {
        Interpolation::Linear => {
            // Interpolate from the closer end to keep q=1 exact.
            if fraction >= 0.5 {
                b - (b - a) * (1.0 - fraction)
            } else {
                a + (b - a) * fraction
            }
        }
        Interpolation::Lower => a,
        Interpolation::Higher => b,
        Interpolation::Nearest => {
            if fraction < 0.5 {
                a
            } else if fraction > 0.5 {
                b
            } else if lo % 2 == 0 {
                a
            } else {
                b
            }
        }
        Interpolation::Midpoint => (a + b) / 2.0,
    }
}
