use eframe::egui::{self, Align2, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Text, VLine};

use rusty_burette::render::curve::CurveKind;
use rusty_burette::render::{Figure, FigureKind, MarkerKind};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Distribution plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected figure in the central panel.
pub fn figure_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(figure) = state.current_figure() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No figure for this selection  (see status / log)");
        });
        state.plot_rect = None;
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.heading(&figure.title);
    });
    annotation_block(ui, figure);
    if !figure.sigma_ticks.is_empty() {
        sigma_strip(ui, figure);
    }

    // Group overlays colour by instrument; single figures use fixed colours.
    let grouped = matches!(
        figure.kind,
        FigureKind::GroupTOverlay | FigureKind::GroupKdeOverlay
    );
    let palette = color::generate_palette(figure.series_count());

    let response = Plot::new("distribution_plot")
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .include_x(figure.domain.x_min)
        .include_x(figure.domain.x_max)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if !figure.histogram.is_empty() {
                let bars = figure
                    .histogram
                    .iter()
                    .map(|b| Bar::new(b.center(), b.density).width(b.width))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name("Probability density (measured)")
                        .color(color::HISTOGRAM.gamma_multiply(0.6)),
                );
            }

            for curve in &figure.curves {
                let tint = if grouped {
                    palette.get(curve.series).copied().unwrap_or(Color32::GRAY)
                } else {
                    match curve.kind {
                        CurveKind::TDistribution => color::T_CURVE,
                        CurveKind::Kde => color::KDE_CURVE,
                    }
                };
                let style = match curve.kind {
                    CurveKind::TDistribution => LineStyle::Solid,
                    CurveKind::Kde => LineStyle::dashed_loose(),
                };
                let points: PlotPoints = curve.points.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&curve.label)
                        .color(tint)
                        .style(style)
                        .width(2.0),
                );
            }

            for marker in &figure.markers {
                let style = match marker.kind {
                    MarkerKind::Target | MarkerKind::Sigma(_) => LineStyle::dashed_dense(),
                    MarkerKind::TrimmedMean | MarkerKind::KdeMode => LineStyle::dotted_dense(),
                    MarkerKind::Mean => LineStyle::Solid,
                };
                plot_ui.vline(
                    VLine::new(marker.x)
                        .name(&marker.label)
                        .color(color::marker_color(marker.kind))
                        .style(style)
                        .width(1.5),
                );
            }

            for label in &figure.peaks {
                let tint = if grouped {
                    palette.get(label.series).copied().unwrap_or(color::PEAK)
                } else {
                    color::PEAK
                };
                plot_ui.points(
                    Points::new(vec![[label.peak.x, label.peak.y]])
                        .radius(4.0)
                        .color(tint),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(label.peak.x, label.peak.y), label.text.as_str())
                        .anchor(Align2::LEFT_BOTTOM)
                        .color(tint),
                );
            }
        });

    state.plot_rect = Some(response.response.rect);
}

/// Statistics text block shown above the plot.
fn annotation_block(ui: &mut Ui, figure: &Figure) {
    if figure.annotation.is_empty() && figure.notes.is_empty() {
        return;
    }
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        for line in &figure.annotation {
            ui.monospace(line);
        }
        for note in &figure.notes {
            ui.label(RichText::new(note).italics().color(Color32::DARK_RED));
        }
    });
}

/// The secondary sigma-reference axis, as a row of labelled positions.
fn sigma_strip(ui: &mut Ui, figure: &Figure) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.strong("Sigma reference:");
        for tick in &figure.sigma_ticks {
            ui.label(format!("{} = {:.4}", tick.label, tick.x));
            ui.separator();
        }
    });
}
