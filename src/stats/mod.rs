//! Statistical core: volume conversion, location/scale estimation, the
//! one-sample t-test, trimmed mean and kernel density estimation.
//!
//! Everything here is a pure function of its inputs. Nothing logs.

pub mod descriptive;
pub mod kde;
pub mod special;
pub mod summary;
pub mod ttest;

pub use descriptive::Descriptive;
pub use summary::{RelativeErrorSummary, StatSummary};
pub use ttest::{Significance, TTest};

use self::special::StudentT;

/// Half-width of a single-instrument plot domain, in standard deviations.
pub const SIGMA_SPAN: f64 = 4.0;

/// A sample plus its location and scale.
///
/// Implemented both in volume space ([`StatSummary`]) and in relative-error
/// space ([`RelativeErrorSummary`]), so the renderer treats them alike.
pub trait SampleDistribution {
    fn label(&self) -> &str;
    fn values(&self) -> &[f64];
    fn location(&self) -> &Descriptive;

    /// The t distribution located at μ and scaled by σ; `None` when σ = 0.
    fn t_distribution(&self) -> Option<StudentT> {
        let loc = self.location();
        StudentT::new(loc.df as f64, loc.mean, loc.std_dev)
    }
}

/// `n` evenly spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let xs = linspace(0.9, 1.1, 1000);
        assert_eq!(xs.len(), 1000);
        assert_eq!(xs[0], 0.9);
        assert_eq!(xs[999], 1.1);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
