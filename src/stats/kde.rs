use std::f64::consts::PI;

use crate::error::EstimationUnavailable;

use super::descriptive::{Descriptive, distinct_count};

/// Gaussian kernel density estimate of a one-dimensional sample.
///
/// Bandwidth follows Scott's rule, `h = σ · n^(-1/5)` with σ the sample
/// standard deviation, so the kernel variance is `σ² · n^(-2/5)`.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    pub fn new(samples: &[f64]) -> Result<Self, EstimationUnavailable> {
        let distinct = distinct_count(samples);
        if distinct < 2 {
            return Err(EstimationUnavailable::TooFewDistinctValues(distinct));
        }
        let spread = Descriptive::new(samples)
            .map(|d| d.std_dev)
            .unwrap_or(f64::NAN);
        let bandwidth = spread * (samples.len() as f64).powf(-0.2);
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return Err(EstimationUnavailable::DegenerateBandwidth(bandwidth));
        }
        Ok(Self {
            points: samples.to_vec(),
            bandwidth,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / ((2.0 * PI).sqrt() * self.bandwidth * self.points.len() as f64);
        let sum: f64 = self
            .points
            .iter()
            .map(|&xi| {
                let u = (x - xi) / self.bandwidth;
                (-0.5 * u * u).exp()
            })
            .sum();
        norm * sum
    }

    /// Evaluate at each grid point, returning `(x, density)` pairs.
    pub fn evaluate(&self, grid: &[f64]) -> Vec<(f64, f64)> {
        grid.iter().map(|&x| (x, self.density(x))).collect()
    }
}

/// The first point with the largest `y`.
///
/// On a sampled curve this is only as precise as the grid spacing.
pub fn arg_max(curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    curve.iter().copied().fold(None, |best, p| match best {
        Some((_, y)) if y >= p.1 => best,
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::linspace;

    #[test]
    fn scott_bandwidth() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        let kde = GaussianKde::new(&samples).unwrap();
        let sigma = 2.5_f64.sqrt();
        assert!((kde.bandwidth() - sigma * 5.0_f64.powf(-0.2)).abs() < 1e-12);
    }

    #[test]
    fn constant_sample_is_unavailable() {
        let err = GaussianKde::new(&[1.0, 1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err, EstimationUnavailable::TooFewDistinctValues(1));
        assert!(GaussianKde::new(&[]).is_err());
    }

    #[test]
    fn density_integrates_to_one() {
        let kde = GaussianKde::new(&[0.9, 1.0, 1.05, 1.2]).unwrap();
        let grid = linspace(-1.0, 3.0, 4001);
        let dx = grid[1] - grid[0];
        let area: f64 = kde.evaluate(&grid).iter().map(|(_, y)| y * dx).sum();
        assert!((area - 1.0).abs() < 1e-3, "area = {area}");
    }

    #[test]
    fn symmetric_sample_peaks_at_centre() {
        let kde = GaussianKde::new(&[-1.0, 0.0, 1.0]).unwrap();
        let curve = kde.evaluate(&linspace(-3.0, 3.0, 601));
        let (x, _) = arg_max(&curve).unwrap();
        assert!(x.abs() < 1e-9);
    }

    #[test]
    fn arg_max_takes_first_maximum() {
        let curve = [(0.0, 1.0), (1.0, 3.0), (2.0, 3.0), (3.0, 2.0)];
        assert_eq!(arg_max(&curve), Some((1.0, 3.0)));
        assert_eq!(arg_max(&[]), None);
    }
}
