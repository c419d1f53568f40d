//! Parametric statistical tests.
//!
//! One-sample and two-sample (Student's or Welch's) t-tests. The statistic is
//! always computed two-sided and its p-value converted to the requested tail
//! afterwards, see [`adjust_p_value`]. Degenerate inputs (fewer than two
//! observations, zero variance) produce `NaN` or infinite results instead of
//! errors.

use crate::sample::{count_observed, resolve_missing, NanPolicy};
use crate::testing::utils::{adjust_p_value, pooled_df, t_p_value, welch_satterthwaite_df};
use crate::testing::{Alternative, TTestType, TestResult};
use statrs::statistics::Statistics;

/// Test whether the mean of `x` equals `null_mean`, ignoring missing values.
///
/// Degrees of freedom are the number of non-missing observations minus one.
pub fn one_sample_t_test(
    x: &[f64],
    null_mean: f64,
    alternative: Alternative,
) -> anyhow::Result<TestResult<f64>> {
    one_sample_t_test_with_policy(x, null_mean, alternative, NanPolicy::Omit)
}

/// [`one_sample_t_test`] with an explicit missing-value policy.
///
/// The reported degrees of freedom always count the non-missing observations,
/// whatever the policy.
pub fn one_sample_t_test_with_policy(
    x: &[f64],
    null_mean: f64,
    alternative: Alternative,
    nan_policy: NanPolicy,
) -> anyhow::Result<TestResult<f64>> {
    let df = count_observed(x) as f64 - 1.0;

    let Some(values) = resolve_missing(x, nan_policy)? else {
        return Ok(TestResult::undefined().with_degrees_of_freedom(df));
    };
    let values: &[f64] = &values;

    if values.len() < 2 {
        tracing::debug!(n = values.len(), "one-sample t-test needs at least two observations");
    }

    let n = values.len() as f64;
    let mean = Statistics::mean(values);
    let variance = Statistics::variance(values);

    let std_err = (variance / n).sqrt();
    let t_stat = (mean - null_mean) / std_err;
    let p_value = adjust_p_value(t_stat, t_p_value(t_stat, df), alternative);

    Ok(TestResult::new(t_stat, p_value)
        .with_degrees_of_freedom(df)
        .with_standard_error(std_err)
        .with_metadata("n", n)
        .with_metadata("mean", mean))
}

/// Difference-in-means test with missing values omitted, using Welch's test
/// unless `equal_var` is set.
pub fn difference_in_means(
    x: &[f64],
    y: &[f64],
    equal_var: bool,
    alternative: Alternative,
) -> anyhow::Result<TestResult<f64>> {
    t_test(
        x,
        y,
        TTestType::from_equal_variance(equal_var),
        alternative,
        NanPolicy::Omit,
    )
}

/// Perform a t-test comparing two independent samples.
///
/// This function performs either Student's t-test (assuming equal variances) or
/// Welch's t-test (allowing unequal variances) for the null hypothesis
/// `mean(x) == mean(y)`.
///
/// # Arguments
///
/// * `x` - First sample
/// * `y` - Second sample
/// * `test_type` - Type of t-test to perform
/// * `alternative` - Tail of the test to report
/// * `nan_policy` - Handling of missing (`NaN`) observations
///
/// # Returns
///
/// `TestResult` containing the t-statistic, the tail-adjusted p-value and the
/// degrees of freedom (`nx + ny - 2` for Student, Welch-Satterthwaite otherwise).
pub fn t_test(
    x: &[f64],
    y: &[f64],
    test_type: TTestType,
    alternative: Alternative,
    nan_policy: NanPolicy,
) -> anyhow::Result<TestResult<f64>> {
    let resolved_x = resolve_missing(x, nan_policy)?;
    let resolved_y = resolve_missing(y, nan_policy)?;

    let (Some(x), Some(y)) = (resolved_x, resolved_y) else {
        let df = match test_type {
            TTestType::Student => {
                pooled_df(count_observed(x) as f64, count_observed(y) as f64)
            }
            TTestType::Welch => f64::NAN,
        };
        return Ok(TestResult::undefined().with_degrees_of_freedom(df));
    };
    let (x, y) = (&*x, &*y);

    if x.len() < 2 || y.len() < 2 {
        tracing::debug!(
            nx = x.len(),
            ny = y.len(),
            "two-sample t-test with fewer than two observations in a group"
        );
    }

    Ok(t_test_from_moments(
        Statistics::mean(x),
        Statistics::variance(x),
        x.len() as f64,
        Statistics::mean(y),
        Statistics::variance(y),
        y.len() as f64,
        test_type,
        alternative,
    ))
}

/// Perform a two-sample t-test from per-group means and sample variances.
///
/// # Arguments
///
/// * `mean1`, `var1`, `n1` - Mean, unbiased variance, and count for group 1
/// * `mean2`, `var2`, `n2` - Mean, unbiased variance, and count for group 2
/// * `test_type` - Type of t-test to perform (Student's or Welch's)
/// * `alternative` - Tail of the test to report
#[allow(clippy::too_many_arguments)]
pub fn t_test_from_moments(
    mean1: f64,
    var1: f64,
    n1: f64,
    mean2: f64,
    var2: f64,
    n2: f64,
    test_type: TTestType,
    alternative: Alternative,
) -> TestResult<f64> {
    let mean_diff = mean1 - mean2;

    let (std_err, df) = match test_type {
        TTestType::Student => {
            // Student's t-test (pooled variance)
            let df = pooled_df(n1, n2);
            let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
            ((pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        TTestType::Welch => {
            // Welch's t-test (unequal variances)
            let combined_var = var1 / n1 + var2 / n2;
            (combined_var.sqrt(), welch_satterthwaite_df(var1, n1, var2, n2))
        }
    };

    let t_stat = mean_diff / std_err;
    let p_value = adjust_p_value(t_stat, t_p_value(t_stat, df), alternative);

    TestResult::new(t_stat, p_value)
        .with_degrees_of_freedom(df)
        .with_standard_error(std_err)
        .with_metadata("nx", n1)
        .with_metadata("ny", n2)
}
