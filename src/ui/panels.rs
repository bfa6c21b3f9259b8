use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_burette::config::{OverlayMode, RenderConfig};
use rusty_burette::data::loader;
use rusty_burette::export;
use rusty_burette::render::FigureKind;

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – selection and overlay widgets
// ---------------------------------------------------------------------------

/// Render the left panel: instrument list, group list, overlay toggles.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Instruments");
            ui.separator();
            instrument_list(ui, state);

            ui.add_space(8.0);
            ui.heading("Groups");
            ui.separator();
            group_list(ui, state);

            ui.add_space(8.0);
            ui.heading("Overlays");
            ui.separator();
            overlay_toggles(ui, state);
        });
}

fn instrument_list(ui: &mut Ui, state: &mut AppState) {
    let mut clicked = None;
    for (i, report) in state.report.instruments.iter().enumerate() {
        let mut text = RichText::new(&report.name);
        if report.outcome.is_err() {
            text = text.color(Color32::RED);
        }
        let response = ui.selectable_label(state.view == View::Instrument(i), text);
        let response = match &report.outcome {
            Err(e) => response.on_hover_text(e.to_string()),
            Ok(_) => response,
        };
        if response.clicked() {
            clicked = Some(View::Instrument(i));
        }
    }
    if let Some(view) = clicked {
        state.view = view;
    }
}

fn group_list(ui: &mut Ui, state: &mut AppState) {
    if state.report.groups.is_empty() {
        ui.label("No group rule matches an instrument.");
        return;
    }

    let mut clicked = None;
    for (index, group) in state.report.groups.iter().enumerate() {
        let header = format!("{}  ({} instruments)", group.name, group.members.len());
        egui::CollapsingHeader::new(RichText::new(header).strong())
            .id_salt(&group.name)
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                for fig in &group.figures {
                    let label = match fig.kind {
                        FigureKind::GroupTOverlay => "t-distribution overlay",
                        FigureKind::GroupKdeOverlay => "KDE overlay",
                        _ => continue,
                    };
                    let view = View::Group {
                        index,
                        kind: fig.kind,
                    };
                    if ui.selectable_label(state.view == view, label).clicked() {
                        clicked = Some(view);
                    }
                }
                for (name, reason) in &group.skipped {
                    ui.label(RichText::new(format!("skipped {name}: {reason}")).weak());
                }
            });
    }
    if let Some(view) = clicked {
        state.view = view;
    }
}

fn overlay_toggles(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.button("Full analysis").clicked() {
            state.apply_preset(RenderConfig::full_analysis());
        }
        if ui.button("Condensed").clicked() {
            state.apply_preset(RenderConfig::condensed());
        }
    });

    let render = &mut state.config.render;
    let mut changed = false;
    changed |= ui.checkbox(&mut render.show_histogram, "Histogram").changed();
    changed |= ui.checkbox(&mut render.show_t_curve, "Theoretical t curve").changed();
    changed |= ui.checkbox(&mut render.show_kde, "KDE").changed();
    changed |= ui.checkbox(&mut render.show_trimmed_mean, "Trimmed mean").changed();

    let mut sigma_clicked = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("σ lines:");
        let active = render.sigma_multiples();
        for k in 1..=3u8 {
            if ui
                .selectable_label(active.contains(&k), format!("±{k}σ"))
                .clicked()
            {
                sigma_clicked = Some(k);
            }
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("α:");
        changed |= ui
            .add(
                egui::DragValue::new(&mut state.config.analysis.alpha)
                    .range(0.001..=0.5)
                    .speed(0.001),
            )
            .changed();
    });

    if let Some(k) = sigma_clicked {
        state.toggle_sigma(k);
    } else if changed {
        state.refresh();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load built-in data").clicked() {
                state.set_dataset(
                    rusty_burette::data::model::ExperimentSet::builtin(),
                    "built-in data set".to_string(),
                );
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Save figure as PNG…").clicked() {
                request_screenshot(state);
                ui.close_menu();
            }
            if ui.button("Export report").clicked() {
                export_report(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} instruments from {}",
            state.dataset.len(),
            state.source
        ));

        ui.separator();

        let group_mode = state.config.render.overlay_mode == OverlayMode::Group;
        if ui.selectable_label(group_mode, "Group overlays").clicked() {
            state.set_overlay_mode(if group_mode {
                OverlayMode::Single
            } else {
                OverlayMode::Group
            });
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open measurement data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} instruments: {:?}",
                    dataset.len(),
                    dataset.names().collect::<Vec<_>>()
                );
                state.set_dataset(dataset, path.display().to_string());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Ask for a destination, then capture the plot on the next frame.
fn request_screenshot(state: &mut AppState) {
    let Some(figure) = state.current_figure() else {
        state.status_message = Some("Nothing to save".to_string());
        return;
    };
    let default_name = export::figure_file_name(figure, "png");
    let file: Option<PathBuf> = rfd::FileDialog::new()
        .set_title("Save figure")
        .set_directory(&state.config.output_dir)
        .set_file_name(default_name)
        .add_filter("PNG", &["png"])
        .save_file();
    state.pending_screenshot = file;
}

/// Summary CSV plus one JSON description per figure in the output directory.
fn export_report(state: &mut AppState) {
    let dir = state.config.output_dir.clone();
    let result = export::prepare_output_dir(&dir)
        .and_then(|_| {
            export::save_summary_csv(
                &dir.join("summary.csv"),
                state.report.summaries(),
                state.config.analysis.alpha,
            )
        })
        .and_then(|_| {
            state
                .report
                .figures()
                .try_for_each(|fig| export::save_figure_json(&dir, fig).map(|_| ()))
        });

    state.status_message = match result {
        Ok(()) => Some(format!("Report written to {}", dir.display())),
        Err(e) => {
            log::error!("Export failed: {e:#}");
            Some(format!("Error: {e:#}"))
        }
    };
}
