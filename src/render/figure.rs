use serde::Serialize;

use super::curve::{Curve, Peak};
use super::domain::PlotDomain;
use super::histogram::HistogramBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FigureKind {
    /// Single instrument with KDE and/or trimmed-mean overlays.
    Analysis,
    /// Single instrument with histogram, t curve and sigma lines only.
    Condensed,
    /// Group overlay of t curves in relative-error space.
    GroupTOverlay,
    /// Group overlay of KDE curves in relative-error space.
    GroupKdeOverlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerKind {
    Mean,
    Target,
    TrimmedMean,
    KdeMode,
    /// `μ + k·σ`, `k` in ±1..=3.
    Sigma(i8),
}

/// A vertical reference line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub x: f64,
    pub label: String,
}

/// A point on a curve with a text label next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakLabel {
    pub series: usize,
    pub peak: Peak,
    pub text: String,
}

/// A tick for the secondary "sigma reference" axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SigmaTick {
    pub x: f64,
    pub label: String,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub kind: FigureKind,
    /// Instrument or group name the figure is about.
    pub subject: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub domain: PlotDomain,
    pub histogram: Vec<HistogramBar>,
    pub curves: Vec<Curve>,
    pub markers: Vec<Marker>,
    pub peaks: Vec<PeakLabel>,
    pub sigma_ticks: Vec<SigmaTick>,
    /// Text block drawn in the top-right corner, one entry per line.
    pub annotation: Vec<String>,
    /// Elements that were left out and why.
    pub notes: Vec<String>,
}

impl Figure {
    pub fn new(kind: FigureKind, subject: &str, title: String, x_label: &str, domain: PlotDomain) -> Self {
        Self {
            kind,
            subject: subject.to_string(),
            title,
            x_label: x_label.to_string(),
            y_label: "Probability density".to_string(),
            domain,
            histogram: Vec::new(),
            curves: Vec::new(),
            markers: Vec::new(),
            peaks: Vec::new(),
            sigma_ticks: Vec::new(),
            annotation: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Number of distinct instruments drawn.
    pub fn series_count(&self) -> usize {
        self.curves.iter().map(|c| c.series + 1).max().unwrap_or(0)
    }

    pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|m| m.kind == kind)
    }
}

/// Format with `digits` significant digits, dropping trailing zeros, like
/// C's `%g` for the magnitudes found here.
pub fn format_significant(x: f64, digits: usize) -> String {
    if x.is_nan() {
        return "undefined".to_string();
    }
    if x.is_infinite() || x == 0.0 {
        return format!("{x}");
    }
    let magnitude = x.abs().log10().floor() as i32;
    if magnitude < -4 || magnitude >= digits as i32 {
        return format!("{:.*e}", digits.saturating_sub(1), x);
    }
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    let text = format!("{x:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significant_digits() {
        assert_eq!(format_significant(0.989_683_654, 4), "0.9897");
        assert_eq!(format_significant(-2.264_831, 4), "-2.265");
        assert_eq!(format_significant(10.0, 4), "10");
        assert_eq!(format_significant(0.000_012_34, 4), "1.234e-5");
        assert_eq!(format_significant(f64::NAN, 4), "undefined");
    }
}
