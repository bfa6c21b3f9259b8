use serde::Serialize;

use crate::error::EstimationUnavailable;
use crate::stats::kde::{GaussianKde, arg_max};
use crate::stats::special::StudentT;

use super::domain::PlotDomain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CurveKind {
    /// Parametric Student-t density located at μ, scaled by σ.
    TDistribution,
    /// Non-parametric kernel density estimate of the raw sample.
    Kde,
}

/// A density curve sampled over a figure's domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub kind: CurveKind,
    pub label: String,
    /// Index of the instrument this curve belongs to, for colouring.
    pub series: usize,
    /// `(x, density)` pairs; empty for a legend-only entry.
    pub points: Vec<(f64, f64)>,
}

/// A located density maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    pub x: f64,
    pub y: f64,
}

/// Evaluate the location-scale t density at `n` evenly spaced points.
pub fn evaluate_t_curve(domain: &PlotDomain, dist: &StudentT, n: usize) -> Vec<(f64, f64)> {
    domain.grid(n).into_iter().map(|x| (x, dist.pdf(x))).collect()
}

/// Build a KDE from `samples` and evaluate it at `n` evenly spaced points.
pub fn evaluate_kde(
    samples: &[f64],
    domain: &PlotDomain,
    n: usize,
) -> Result<Vec<(f64, f64)>, EstimationUnavailable> {
    let kde = GaussianKde::new(samples)?;
    Ok(kde.evaluate(&domain.grid(n)))
}

/// Exact mode of the t curve: the density at x = μ.
pub fn locate_t_peak(dist: &StudentT) -> Peak {
    let (x, y) = dist.peak();
    Peak { x, y }
}

/// Largest sampled point of a KDE curve. The true mode may sit anywhere
/// within one grid step of it.
pub fn locate_kde_peak(points: &[(f64, f64)]) -> Option<Peak> {
    arg_max(points).map(|(x, y)| Peak { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_curve_peaks_at_location() {
        let dist = StudentT::new(5.0, 0.9897, 0.0112).unwrap();
        let domain = PlotDomain::around(0.9897, 4.0 * 0.0112);
        let curve = evaluate_t_curve(&domain, &dist, 1000);
        assert_eq!(curve.len(), 1000);

        let peak = locate_t_peak(&dist);
        assert_eq!(peak.x, 0.9897);
        assert!(curve.iter().all(|&(_, y)| y <= peak.y));
    }

    #[test]
    fn kde_curve_unavailable_for_constant_sample() {
        let domain = PlotDomain::around(1.0, 0.5);
        let err = evaluate_kde(&[1.0, 1.0, 1.0, 1.0], &domain, 1000).unwrap_err();
        assert_eq!(err, EstimationUnavailable::TooFewDistinctValues(1));
    }

    #[test]
    fn kde_peak_is_a_grid_point() {
        let samples = [0.97, 0.99, 0.995, 1.0, 1.003];
        let domain = PlotDomain::around(0.99, 0.05);
        let curve = evaluate_kde(&samples, &domain, 1000).unwrap();
        let peak = locate_kde_peak(&curve).unwrap();
        assert!(curve.iter().any(|&(x, _)| x == peak.x));
        assert!(curve.iter().all(|&(_, y)| y <= peak.y));
    }
}
