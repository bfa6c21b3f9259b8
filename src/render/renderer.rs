use crate::config::{AnalysisConfig, RenderConfig};
use crate::stats::{RelativeErrorSummary, SampleDistribution, StatSummary};

use super::curve::{
    Curve, CurveKind, evaluate_kde, evaluate_t_curve, locate_kde_peak, locate_t_peak,
};
use super::domain::PlotDomain;
use super::figure::{
    Figure, FigureKind, Marker, MarkerKind, PeakLabel, SigmaTick, format_significant,
};
use super::histogram::density_histogram;

/// Half-width of the fallback domain used when σ = 0.
const DEGENERATE_HALF_WIDTH: f64 = 0.5;

/// Turns statistical summaries into [`Figure`] descriptions.
///
/// Holds the overlay selection and the analysis policy; never draws.
#[derive(Debug, Clone)]
pub struct DistributionRenderer {
    pub render: RenderConfig,
    pub analysis: AnalysisConfig,
}

impl DistributionRenderer {
    pub fn new(render: RenderConfig, analysis: AnalysisConfig) -> Self {
        Self { render, analysis }
    }

    // -----------------------------------------------------------------------
    // Single instrument
    // -----------------------------------------------------------------------

    /// Figure for one instrument in volume units (mL).
    pub fn single(&self, summary: &StatSummary) -> Figure {
        let cfg = &self.render;
        let loc = summary.location;
        let n = self.analysis.grid_points;
        let mut notes = Vec::new();

        let spread_domain = PlotDomain::single(&loc);
        let domain = spread_domain.unwrap_or_else(|| {
            let cause = if loc.is_degenerate() {
                "zero spread".to_string()
            } else {
                format!("spread is not finite (σ = {})", loc.std_dev)
            };
            notes.push(format!(
                "{}: {cause}, t curve and sigma lines omitted",
                summary.spec.name
            ));
            PlotDomain::around(loc.mean, DEGENERATE_HALF_WIDTH)
        });

        let kind = if cfg.show_kde || cfg.show_trimmed_mean {
            FigureKind::Analysis
        } else {
            FigureKind::Condensed
        };
        let mut fig = Figure::new(
            kind,
            &summary.spec.name,
            format!("Distribution and standard deviation ({} measured volume, mL)", summary.spec.name),
            "Measured volume (mL)",
            domain,
        );
        fig.notes = notes;

        if cfg.show_histogram {
            fig.histogram = density_histogram(summary.volumes.values());
        }

        let dist = summary.t_distribution();
        if let (true, Some(_), Some(dist)) = (cfg.show_t_curve, spread_domain, dist.as_ref()) {
            fig.curves.push(Curve {
                kind: CurveKind::TDistribution,
                label: format!("Theoretical t-distribution (df={})", loc.df),
                series: 0,
                points: evaluate_t_curve(&domain, dist, n),
            });
            fig.peaks.push(PeakLabel {
                series: 0,
                peak: locate_t_peak(dist),
                text: format!(" {}", format_significant(loc.mean, 4)),
            });
        }

        if cfg.show_kde {
            match evaluate_kde(summary.volumes.values(), &domain, n) {
                Ok(points) => {
                    if let Some(peak) = locate_kde_peak(&points) {
                        fig.markers.push(Marker {
                            kind: MarkerKind::KdeMode,
                            x: peak.x,
                            label: format!("Sample density peak (KDE mode) = {} mL", format_significant(peak.x, 4)),
                        });
                        fig.peaks.push(PeakLabel {
                            series: 0,
                            peak,
                            text: format!(" {}", format_significant(peak.x, 4)),
                        });
                    }
                    fig.curves.push(Curve {
                        kind: CurveKind::Kde,
                        label: "Sample density (KDE)".to_string(),
                        series: 0,
                        points,
                    });
                }
                Err(e) => fig.notes.push(format!("{}: KDE unavailable: {e}", summary.spec.name)),
            }
        }

        fig.markers.push(Marker {
            kind: MarkerKind::Mean,
            x: loc.mean,
            label: format!("Measured mean (μ) = {} mL", format_significant(loc.mean, 4)),
        });
        fig.markers.push(Marker {
            kind: MarkerKind::Target,
            x: summary.spec.target_volume,
            label: format!("Target volume = {:.2} mL", summary.spec.target_volume),
        });
        if let (true, Some(tm)) = (cfg.show_trimmed_mean, summary.trimmed_mean) {
            fig.markers.push(Marker {
                kind: MarkerKind::TrimmedMean,
                x: tm,
                label: format!("Trimmed mean = {} mL", format_significant(tm, 4)),
            });
        }

        if spread_domain.is_some() {
            let multiples = cfg
                .sigma_multiples()
                .into_iter()
                .flat_map(|k| [k as i8, -(k as i8)]);
            for (k, x) in loc.sigma_offsets(multiples) {
                fig.markers.push(Marker {
                    kind: MarkerKind::Sigma(k),
                    x,
                    label: sigma_label(k),
                });
            }
            fig.sigma_ticks = loc
                .sigma_offsets(-3..=3)
                .into_iter()
                .map(|(k, x)| SigmaTick {
                    x,
                    label: sigma_label(k),
                })
                .collect();
        }

        fig.annotation = self.test_annotation(summary);
        fig
    }

    fn test_annotation(&self, summary: &StatSummary) -> Vec<String> {
        let test = &summary.t_test;
        let alpha = self.analysis.alpha;
        vec![
            "Test: one-sample t-test (two-tailed)".to_string(),
            format!("H0: μ = {:.2} mL", summary.spec.target_volume),
            format!("Relative error: {:.2} %", summary.relative_error_pct),
            format!("t-statistic: {}", format_significant(test.t_statistic, 4)),
            format!("p-value: {}", format_significant(test.p_value, 4)),
            format!("At α = {alpha}: {}", test.significance(alpha)),
        ]
    }

    // -----------------------------------------------------------------------
    // Group overlays
    // -----------------------------------------------------------------------

    /// The overlay figures for one group, as selected by the configuration:
    /// a t-curve overlay and/or a KDE overlay on a shared domain.
    pub fn group(&self, group_name: &str, members: &[RelativeErrorSummary]) -> Vec<Figure> {
        let Some(domain) = PlotDomain::group(members) else {
            return Vec::new();
        };
        let mut figures = Vec::new();
        if self.render.show_t_curve {
            figures.push(self.group_t_overlay(group_name, members, domain));
        }
        if self.render.show_kde {
            figures.push(self.group_kde_overlay(group_name, members, domain));
        }
        figures
    }

    pub fn group_t_overlay(
        &self,
        group_name: &str,
        members: &[RelativeErrorSummary],
        domain: PlotDomain,
    ) -> Figure {
        let mut fig = Figure::new(
            FigureKind::GroupTOverlay,
            group_name,
            format!("{group_name}: relative error distribution (theoretical t)"),
            "Deviation from target volume (%)",
            domain,
        );

        for (series, member) in members.iter().enumerate() {
            let loc = member.location;
            let Some(dist) = member.t_distribution() else {
                fig.notes.push(format!("{}: zero spread, t curve omitted", member.name));
                continue;
            };
            fig.curves.push(Curve {
                kind: CurveKind::TDistribution,
                label: format!(
                    "{} (mean error={:.2}%, σ={:.2}%)",
                    member.name, loc.mean, loc.std_dev
                ),
                series,
                points: evaluate_t_curve(&domain, &dist, self.analysis.grid_points),
            });
            let peak = locate_t_peak(&dist);
            fig.peaks.push(PeakLabel {
                series,
                peak,
                text: format!(" {:.2}%", peak.x),
            });
        }

        fig.markers.push(target_zero_marker());
        fig
    }

    pub fn group_kde_overlay(
        &self,
        group_name: &str,
        members: &[RelativeErrorSummary],
        domain: PlotDomain,
    ) -> Figure {
        let mut fig = Figure::new(
            FigureKind::GroupKdeOverlay,
            group_name,
            format!("{group_name}: relative error distribution (sample KDE)"),
            "Deviation from target volume (%)",
            domain,
        );

        for (series, member) in members.iter().enumerate() {
            match evaluate_kde(member.values(), &domain, self.analysis.grid_points) {
                Ok(points) => {
                    if let Some(peak) = locate_kde_peak(&points) {
                        fig.peaks.push(PeakLabel {
                            series,
                            peak,
                            text: format!(" {:.2}%", peak.x),
                        });
                    }
                    fig.curves.push(Curve {
                        kind: CurveKind::Kde,
                        label: member.name.clone(),
                        series,
                        points,
                    });
                }
                Err(e) => {
                    fig.notes.push(format!("{}: KDE unavailable: {e}", member.name));
                    fig.curves.push(Curve {
                        kind: CurveKind::Kde,
                        label: format!("{} (KDE failed)", member.name),
                        series,
                        points: Vec::new(),
                    });
                }
            }
        }

        fig.markers.push(target_zero_marker());
        fig
    }
}

fn target_zero_marker() -> Marker {
    Marker {
        kind: MarkerKind::Target,
        x: 0.0,
        label: "Target volume (0% error)".to_string(),
    }
}

fn sigma_label(k: i8) -> String {
    match k {
        0 => "μ".to_string(),
        k if k > 0 => format!("μ+{k}σ"),
        k => format!("μ-{}σ", -k),
    }
}
