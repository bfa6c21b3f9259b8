use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_burette::render::figure::format_significant;
use rusty_burette::stats::Significance;

use crate::state::AppState;

const HEADERS: [&str; 9] = [
    "Instrument",
    "n",
    "Mean (mL)",
    "Std-dev (mL)",
    "Rel. error (%)",
    "t",
    "p",
    "Trimmed mean (mL)",
    "Verdict",
];

// ---------------------------------------------------------------------------
// Statistics table (bottom panel)
// ---------------------------------------------------------------------------

/// One row per successfully analysed instrument.
pub fn stats_table(ui: &mut Ui, state: &AppState) {
    let alpha = state.config.analysis.alpha;
    let optional = |v: Option<f64>| v.map_or_else(|| "–".to_string(), |x| format_significant(x, 4));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for s in state.report.summaries() {
                let verdict = s.t_test.significance(alpha);
                let verdict_color = match verdict {
                    Significance::Significant => Color32::RED,
                    Significance::NotSignificant => Color32::DARK_GREEN,
                    Significance::Undetermined => Color32::GRAY,
                };
                let cells = [
                    s.spec.name.clone(),
                    s.location.n.to_string(),
                    format_significant(s.mean(), 4),
                    format_significant(s.std_dev(), 4),
                    format!("{:.2}", s.relative_error_pct),
                    format_significant(s.t_test.t_statistic, 4),
                    format_significant(s.t_test.p_value, 4),
                    optional(s.trimmed_mean),
                ];
                body.row(18.0, |mut row| {
                    for cell in &cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(verdict.to_string()).color(verdict_color));
                    });
                });
            }
        });
}
