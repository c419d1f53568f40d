use crate::testing::Alternative;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Convert a two-sided p-value into the p-value for `alternative`.
///
/// The two-sided p-value is halved when the statistic points in the direction
/// of the alternative, and reflected (`1 - p / 2`) otherwise. A `NaN` statistic
/// or p-value yields `NaN`.
pub fn adjust_p_value(statistic: f64, two_sided_p: f64, alternative: Alternative) -> f64 {
    let toward_alternative = match alternative {
        Alternative::TwoSided => return two_sided_p,
        Alternative::Greater => statistic > 0.0,
        Alternative::Less => statistic < 0.0,
    };

    if statistic.is_nan() {
        return f64::NAN;
    }

    if toward_alternative {
        two_sided_p / 2.0
    } else {
        1.0 - two_sided_p / 2.0
    }
}

/// Welch-Satterthwaite degrees of freedom for two samples with sample
/// variances `vx`, `vy` and sizes `nx`, `ny`.
///
/// Sizes of one or less leave the denominator undefined; the resulting
/// `NaN` or infinity is returned as is.
pub fn welch_satterthwaite_df(vx: f64, nx: f64, vy: f64, ny: f64) -> f64 {
    let term_x = vx / nx;
    let term_y = vy / ny;
    let combined = term_x + term_y;

    let denominator = term_x * term_x / (nx - 1.0) + term_y * term_y / (ny - 1.0);
    if !denominator.is_finite() || denominator == 0.0 {
        tracing::debug!(nx, ny, vx, vy, "Welch-Satterthwaite denominator is degenerate");
    }

    combined * combined / denominator
}

/// Degrees of freedom of the pooled-variance (Student) two-sample test.
pub fn pooled_df(nx: f64, ny: f64) -> f64 {
    nx + ny - 2.0
}

/// Two-sided p-value of a t statistic with `df` degrees of freedom.
///
/// Undefined inputs (`NaN` statistic, non-positive or `NaN` degrees of freedom)
/// give `NaN`. An infinite statistic gives 0.
pub fn t_p_value(t_stat: f64, df: f64) -> f64 {
    if t_stat.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }

    if t_stat.is_infinite() {
        return 0.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => (2.0 * t_dist.sf(t_stat.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}
