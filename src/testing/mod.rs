use num_traits::Float;
use std::collections::HashMap;

pub mod inference;

pub mod utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TTestType {
    Student, // Equal variance
    #[default]
    Welch,   // Unequal variance
}

impl TTestType {
    /// Pick the test type from an "equal variances assumed" flag.
    pub fn from_equal_variance(equal_var: bool) -> Self {
        if equal_var {
            TTestType::Student
        } else {
            TTestType::Welch
        }
    }
}

/// Which tail(s) of the test distribution count as evidence against the null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    #[default]
    TwoSided,
    /// Lower tail: the first mean is smaller than the second (or the null mean).
    Less,
    /// Upper tail: the first mean is larger than the second (or the null mean).
    Greater,
}

#[derive(Debug, Clone)]
pub struct TestResult<T> {
    /// The test statistic value (e.g., t-statistic, KS distance)
    pub statistic: T,
    /// The p-value of the test, already adjusted to the requested tail
    pub p_value: T,
    /// Degrees of freedom (for parametric inference)
    pub degrees_of_freedom: Option<T>,
    /// Standard error of the test statistic's numerator
    pub standard_error: Option<T>,
    /// Additional test-specific information
    pub metadata: HashMap<String, T>,
}

impl<T> TestResult<T>
where
    T: Float,
{
    /// Create a new test result with minimal information
    pub fn new(statistic: T, p_value: T) -> Self {
        TestResult {
            statistic,
            p_value,
            degrees_of_freedom: None,
            standard_error: None,
            metadata: HashMap::new(),
        }
    }

    /// A result carrying no information: statistic and p-value are `NaN`.
    pub fn undefined() -> Self {
        TestResult::new(T::nan(), T::nan())
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: T) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    /// Add standard error to the result
    pub fn with_standard_error(mut self, se: T) -> Self {
        self.standard_error = Some(se);
        self
    }

    /// Add additional metadata
    pub fn with_metadata(mut self, key: &str, value: T) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Check if the result is statistically significant at the given threshold
    pub fn is_significant(&self, alpha: T) -> bool {
        self.p_value < alpha
    }

    /// `(statistic, p_value, degrees_of_freedom)`, with `NaN` when no degrees of freedom apply.
    pub fn as_tuple(&self) -> (T, T, T) {
        (
            self.statistic,
            self.p_value,
            self.degrees_of_freedom.unwrap_or_else(T::nan),
        )
    }
}
