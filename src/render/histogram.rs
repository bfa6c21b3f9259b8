use serde::Serialize;

use crate::stats::descriptive::interquartile_range;

/// One bar of a density-normalised histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBar {
    /// Left edge.
    pub left: f64,
    pub width: f64,
    /// `count / (n · width)`, so the bar areas sum to one.
    pub density: f64,
    pub count: usize,
}

impl HistogramBar {
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Density histogram with automatically chosen equal-width bins.
///
/// Bin width is the smaller of the Freedman–Diaconis width
/// (`2·IQR·n^(-1/3)`) and the Sturges width (`range / (log2 n + 1)`),
/// falling back to Sturges when the IQR is zero. A constant sample gets a
/// single bin spanning `value ± 0.5`.
pub fn density_histogram(values: &[f64]) -> Vec<HistogramBar> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(lo.is_finite() && hi.is_finite()) {
        return Vec::new();
    }

    let range = hi - lo;
    let (first, last, bins) = if range == 0.0 {
        (lo - 0.5, hi + 0.5, 1)
    } else {
        let sturges = range / ((n as f64).log2() + 1.0);
        let fd = 2.0 * interquartile_range(values).unwrap_or(0.0) * (n as f64).powf(-1.0 / 3.0);
        let width = if fd > 0.0 { fd.min(sturges) } else { sturges };
        (lo, hi, ((range / width).ceil() as usize).max(1))
    };

    let width = (last - first) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        // the right edge belongs to the last bin
        let idx = (((v - first) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBar {
            left: first + i as f64 * width,
            width,
            density: count as f64 / (n as f64 * width),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn areas_sum_to_one() {
        let v = [0.9964, 0.9709, 1.0030, 0.9945, 0.9876, 0.9855];
        let bars = density_histogram(&v);
        let area: f64 = bars.iter().map(|b| b.density * b.width).sum();
        assert!((area - 1.0).abs() < 1e-9);
        assert_eq!(bars.iter().map(|b| b.count).sum::<usize>(), v.len());
    }

    #[test]
    fn constant_sample_gets_one_unit_bin() {
        let bars = density_histogram(&[2.0, 2.0, 2.0]);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].left, 1.5);
        assert_eq!(bars[0].width, 1.0);
        assert_eq!(bars[0].density, 1.0);
    }

    #[test]
    fn sturges_bins_for_six_values() {
        // Sturges: log2(6) + 1 ≈ 3.58 → width = range / 3.58 → 4 bins
        // FD on this sample is wider, so Sturges wins.
        let v = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let bars = density_histogram(&v);
        assert_eq!(bars.len(), 4);
    }

    #[test]
    fn empty_input() {
        assert!(density_histogram(&[]).is_empty());
    }
}
