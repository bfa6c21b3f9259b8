/// Location and scale of a small sample.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Descriptive {
    /// Number of observations.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (N−1 divisor).
    pub std_dev: f64,
    /// Degrees of freedom of the t distribution, N−1.
    pub df: usize,
}

impl Descriptive {
    /// Returns `None` for fewer than 2 values, where the sample standard
    /// deviation is undefined.
    pub fn new(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }
        // A constant sample has σ = 0 exactly; `sum / n` may be off by an
        // ulp and must not leak into the spread.
        let first = values[0];
        if values.iter().all(|&v| v == first) {
            return Some(Self {
                n,
                mean: first,
                std_dev: 0.0,
                df: n - 1,
            });
        }
        let mean = mean(values)?;
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        Some(Self {
            n,
            mean,
            std_dev: (sum_sq / (n - 1) as f64).sqrt(),
            df: n - 1,
        })
    }

    /// σ = 0: every observation is identical.
    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }

    /// `(k, mean + k·σ)` for each `k`.
    pub fn sigma_offsets(&self, ks: impl IntoIterator<Item = i8>) -> Vec<(i8, f64)> {
        ks.into_iter()
            .map(|k| (k, self.mean + f64::from(k) * self.std_dev))
            .collect()
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean after dropping `floor(n · fraction)` values from each end of the
/// sorted sample.
///
/// Returns `None` when `fraction` is outside `[0, 0.5)` or nothing would be
/// left to average.
pub fn trimmed_mean(values: &[f64], fraction: f64) -> Option<f64> {
    if !(0.0..0.5).contains(&fraction) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let cut = (sorted.len() as f64 * fraction).floor() as usize;
    let upper = sorted.len().checked_sub(cut)?;
    if cut >= upper {
        return None;
    }
    mean(&sorted[cut..upper])
}

/// Number of distinct values (exact comparison).
pub fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// `Q3 − Q1`, quartiles linearly interpolated between order statistics.
pub fn interquartile_range(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, 0.75)? - quantile_sorted(&sorted, 0.25)?)
}

fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = p * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_dev_uses_bessel_correction() {
        let d = Descriptive::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(d.mean, 5.0);
        assert!((d.std_dev.powi(2) - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(d.df, 7);
    }

    #[test]
    fn constant_sample_has_zero_std_dev() {
        let d = Descriptive::new(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(d.std_dev, 0.0);
        assert!(d.is_degenerate());
    }

    #[test]
    fn needs_two_values() {
        assert!(Descriptive::new(&[1.0]).is_none());
        assert!(Descriptive::new(&[]).is_none());
    }

    #[test]
    fn trimmed_mean_drops_one_from_each_tail_of_six() {
        let v = [0.7517, 0.9122, 0.9343, 0.9174, 1.0165, 1.0071];
        let tm = trimmed_mean(&v, 1.0 / 6.0).unwrap();
        let expected = (0.9122 + 0.9343 + 0.9174 + 1.0071) / 4.0;
        assert!((tm - expected).abs() < 1e-12);
    }

    #[test]
    fn trimmed_mean_unavailable_when_everything_is_cut() {
        assert_eq!(trimmed_mean(&[1.0, 2.0], 0.5), None);
        assert_eq!(trimmed_mean(&[1.0, 2.0, 3.0, 4.0], 0.6), None);
        assert_eq!(trimmed_mean(&[], 0.1), None);
        assert_eq!(trimmed_mean(&[1.0, 2.0, 3.0], 0.0), Some(2.0));
    }

    #[test]
    fn distinct_values() {
        assert_eq!(distinct_count(&[1.0, 1.0, 2.0]), 2);
        assert_eq!(distinct_count(&[3.0; 4]), 1);
    }

    #[test]
    fn iqr_interpolates() {
        assert_eq!(interquartile_range(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(2.0));
        assert_eq!(interquartile_range(&[]), None);
    }

    #[test]
    fn sigma_offsets_are_symmetric() {
        let d = Descriptive::new(&[1.0, 3.0]).unwrap();
        let s = d.std_dev;
        assert_eq!(
            d.sigma_offsets([-1, 0, 1]),
            vec![(-1, 2.0 - s), (0, 2.0), (1, 2.0 + s)]
        );
    }

    #[test]
    fn constant_sample_has_exactly_zero_spread() {
        // Neither mean is representable as sum / n without rounding.
        for (value, n) in [(0.9933 / 0.9968, 6), (0.1, 3)] {
            let d = Descriptive::new(&vec![value; n]).unwrap();
            assert_eq!(d.std_dev, 0.0);
            assert_eq!(d.mean, value);
            assert!(d.is_degenerate());
        }
    }
}
