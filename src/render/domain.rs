use serde::Serialize;

use crate::stats::{Descriptive, SIGMA_SPAN, SampleDistribution, linspace};

/// Horizontal extent of one figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotDomain {
    pub x_min: f64,
    pub x_max: f64,
}

impl PlotDomain {
    /// `μ ± 4σ`. `None` when σ = 0 and the band collapses to a point.
    pub fn single(location: &Descriptive) -> Option<Self> {
        if location.is_degenerate() || !location.std_dev.is_finite() {
            return None;
        }
        let half = SIGMA_SPAN * location.std_dev;
        Some(Self {
            x_min: location.mean - half,
            x_max: location.mean + half,
        })
    }

    /// Shared domain for overlaying several samples:
    ///
    /// * `x_min = floor10(min(all values) − 4·max σ)`
    /// * `x_max = ceil10(max(all values) + 4·max σ)`
    ///
    /// where floor10/ceil10 round outward to one decimal place. Every
    /// member's `μ ± 4σ` band lies inside. `None` for an empty group or when
    /// the result has no width.
    pub fn group<D: SampleDistribution>(members: &[D]) -> Option<Self> {
        let values = members.iter().flat_map(|m| m.values().iter().copied());
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let max_sigma = members
            .iter()
            .map(|m| m.location().std_dev)
            .fold(f64::NEG_INFINITY, f64::max);
        if !(lo.is_finite() && hi.is_finite() && max_sigma.is_finite()) {
            return None;
        }

        let domain = Self {
            x_min: floor_tenth(lo - SIGMA_SPAN * max_sigma),
            x_max: ceil_tenth(hi + SIGMA_SPAN * max_sigma),
        };
        (domain.width() > 0.0).then_some(domain)
    }

    /// `center ± half_width`.
    pub fn around(center: f64, half_width: f64) -> Self {
        Self {
            x_min: center - half_width,
            x_max: center + half_width,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x)
    }

    /// `n` evenly spaced evaluation points, both ends included.
    pub fn grid(&self, n: usize) -> Vec<f64> {
        linspace(self.x_min, self.x_max, n)
    }
}

fn floor_tenth(x: f64) -> f64 {
    (x * 10.0).floor() / 10.0
}

fn ceil_tenth(x: f64) -> f64 {
    (x * 10.0).ceil() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Experiment;
    use crate::stats::RelativeErrorSummary;

    #[test]
    fn single_domain_spans_eight_sigma() {
        let loc = Descriptive::new(&[0.99, 1.01, 1.00, 0.98]).unwrap();
        let d = PlotDomain::single(&loc).unwrap();
        assert!((d.width() - 8.0 * loc.std_dev).abs() < 1e-12);
        assert!(((d.x_min + d.x_max) / 2.0 - loc.mean).abs() < 1e-12);
    }

    #[test]
    fn single_domain_is_undefined_for_zero_spread() {
        let loc = Descriptive::new(&[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(PlotDomain::single(&loc), None);
    }

    #[test]
    fn group_domain_contains_every_band_and_is_rounded() {
        let members: Vec<_> = [
            Experiment::new("1mL burette", 1.0, 0.9968, vec![1.1935, 1.0952, 1.0515, 0.9904, 1.0004, 1.0601]),
            Experiment::new("10mL burette", 10.0, 0.9968, vec![10.0740, 10.0338, 9.8277, 10.0358, 9.426, 10.1115]),
        ]
        .iter()
        .map(|e| RelativeErrorSummary::compute(e).unwrap())
        .collect();

        let d = PlotDomain::group(&members).unwrap();
        for m in &members {
            let band = SIGMA_SPAN * m.location.std_dev;
            assert!(d.x_min <= m.location.mean - band);
            assert!(d.x_max >= m.location.mean + band);
        }
        for edge in [d.x_min, d.x_max] {
            assert!((edge * 10.0 - (edge * 10.0).round()).abs() < 1e-9, "{edge}");
        }
    }

    #[test]
    fn rounding_goes_outward() {
        assert_eq!(floor_tenth(-1.23), -1.3);
        assert_eq!(ceil_tenth(1.21), 1.3);
        assert_eq!(ceil_tenth(-1.29), -1.2);
    }

    #[test]
    fn empty_group_has_no_domain() {
        let none: [RelativeErrorSummary; 0] = [];
        assert_eq!(PlotDomain::group(&none), None);
    }
}
