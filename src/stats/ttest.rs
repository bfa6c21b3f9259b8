use std::fmt;

use serde::Serialize;

use super::descriptive::Descriptive;
use super::special::StudentT;

/// Result of a one-sample two-tailed t-test, H0: population mean = reference.
///
/// When the sample has zero spread the statistic is undefined; both fields
/// are NaN and [`TTest::is_degenerate`] reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTest {
    pub reference: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub df: usize,
}

impl TTest {
    pub fn one_sample(sample: &Descriptive, reference: f64) -> Self {
        let degenerate = Self {
            reference,
            t_statistic: f64::NAN,
            p_value: f64::NAN,
            df: sample.df,
        };
        let Some(dist) = StudentT::standard(sample.df as f64) else {
            return degenerate;
        };
        if sample.is_degenerate() {
            return degenerate;
        }

        let standard_error = sample.std_dev / (sample.n as f64).sqrt();
        let t_statistic = (sample.mean - reference) / standard_error;
        Self {
            reference,
            t_statistic,
            p_value: dist.two_tailed_p(t_statistic),
            df: sample.df,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.t_statistic.is_nan()
    }

    /// Caller policy: compare the p-value against `alpha`.
    pub fn significance(&self, alpha: f64) -> Significance {
        if self.is_degenerate() {
            Significance::Undetermined
        } else if self.p_value < alpha {
            Significance::Significant
        } else {
            Significance::NotSignificant
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Significance {
    /// p < α: the mean differs from the target (inaccurate instrument).
    Significant,
    /// p ≥ α: no evidence the mean differs from the target.
    NotSignificant,
    /// Zero-spread sample; the test statistic is undefined.
    Undetermined,
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Significance::Significant => write!(f, "significant (inaccurate)"),
            Significance::NotSignificant => write!(f, "not significant (accurate)"),
            Significance::Undetermined => write!(f, "undetermined (zero spread)"),
        }
    }
}
