//! Sample containers and missing-value handling.
//!
//! Missing observations are stored as `NaN`. How a computation treats them is
//! decided by a [`NanPolicy`]. Statistics that take no policy argument omit
//! missing values.

use num_traits::ToPrimitive;
use std::borrow::Cow;

/// How missing (`NaN`) observations are handled by a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NanPolicy {
    /// Any missing value makes the result `NaN`.
    Propagate,
    /// Any missing value is an error.
    Raise,
    /// Missing values are dropped before computing.
    #[default]
    Omit,
}

/// An ordered collection of observations, possibly containing missing values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Create a sample from raw values. `NaN` entries are treated as missing.
    pub fn new(values: Vec<f64>) -> Self {
        Sample { values }
    }

    /// Build a sample from any numeric iterator.
    ///
    /// Values that cannot be represented as `f64` are stored as missing.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToPrimitive,
    {
        Sample {
            values: values
                .into_iter()
                .map(|v| v.to_f64().unwrap_or(f64::NAN))
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Total number of entries, missing ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-missing observations.
    pub fn count(&self) -> usize {
        count_observed(&self.values)
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Iterate over the non-missing observations in order.
    pub fn observed(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|v| !v.is_nan())
    }

    /// Apply `policy` to this sample. See [`resolve_missing`].
    pub fn resolve(&self, policy: NanPolicy) -> anyhow::Result<Option<Cow<'_, [f64]>>> {
        resolve_missing(&self.values, policy)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Sample::new(values)
    }
}

impl From<&[f64]> for Sample {
    fn from(values: &[f64]) -> Self {
        Sample::new(values.to_vec())
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Count the non-missing entries of `values`.
pub fn count_observed(values: &[f64]) -> usize {
    values.iter().filter(|v| !v.is_nan()).count()
}

/// Apply a missing-value policy to raw observations.
///
/// Returns `Ok(None)` when the policy is [`NanPolicy::Propagate`] and a missing
/// value is present, meaning the caller should report `NaN`. Otherwise returns
/// the values to compute on, borrowed when nothing had to be dropped.
pub fn resolve_missing(values: &[f64], policy: NanPolicy) -> anyhow::Result<Option<Cow<'_, [f64]>>> {
    let missing = values.len() - count_observed(values);
    if missing == 0 {
        return Ok(Some(Cow::Borrowed(values)));
    }

    match policy {
        NanPolicy::Propagate => Ok(None),
        NanPolicy::Raise => Err(anyhow::anyhow!(
            "Input contains {} missing value(s) and the policy is to raise",
            missing
        )),
        NanPolicy::Omit => {
            tracing::debug!(missing, total = values.len(), "omitting missing values");
            Ok(Some(Cow::Owned(
                values.iter().copied().filter(|v| !v.is_nan()).collect(),
            )))
        }
    }
}
