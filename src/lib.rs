//! # statkit
//!
//! Descriptive statistics and hypothesis tests with explicit tail selection and
//! missing-value handling.
//!
//! The crate is a thin layer over `statrs` and `ndarray`: distribution functions
//! and basic moments come from `statrs`, while this crate supplies the parameter
//! conventions, the conversion of two-sided p-values into one-sided ones, and the
//! Welch-Satterthwaite degrees of freedom for unequal-variance t-tests.
//!
//! ## Core Features
//!
//! - **Descriptive Statistics**: minimum, maximum, range, skewness, kurtosis, quantiles and IQR
//! - **T-Tests**: one-sample and two-sample (Student's or Welch's), two-sided or one-sided
//! - **Kolmogorov-Smirnov**: two-sample test for equality of distributions
//! - **Missing Values**: `NaN` observations propagated, rejected or omitted via [`sample::NanPolicy`]
//! - **Array Support**: axis-wise variants for 2-D `ndarray` arrays, computed in parallel
//!
//! ## Quick Start
//!
//! ```
//! use statkit::testing::Alternative;
//! use statkit::testing::inference::parametric::one_sample_t_test;
//!
//! let result = one_sample_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0, Alternative::Greater).unwrap();
//! assert_eq!(result.degrees_of_freedom, Some(4.0));
//! assert!((result.p_value - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Module Organization
//!
//! - **[`sample`]**: sample container and missing-value policies
//! - **[`descriptive`]**: descriptive statistics, flat and per axis
//! - **[`testing`]**: hypothesis tests and tail adjustment of p-values

pub mod sample;
pub mod descriptive;
pub mod testing;
