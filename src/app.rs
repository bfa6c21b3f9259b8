use std::sync::Arc;

use eframe::egui;

use rusty_burette::config::AppConfig;
use rusty_burette::export;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyBuretteApp {
    pub state: AppState,
    awaiting_screenshot: bool,
}

impl RustyBuretteApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            awaiting_screenshot: false,
        }
    }

    /// Ask the viewport for a screenshot once a destination is chosen, and
    /// write it out when it arrives.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let Some(path) = self.state.pending_screenshot.clone() else {
            return;
        };

        let shot: Option<Arc<egui::ColorImage>> = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        let Some(image) = shot else {
            if !self.awaiting_screenshot {
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
                self.awaiting_screenshot = true;
            }
            return;
        };
        self.awaiting_screenshot = false;

        let image = match self.state.plot_rect {
            Some(rect) => image.region(&rect, Some(ctx.pixels_per_point())),
            None => (*image).clone(),
        };
        let [w, h] = image.size;
        self.state.status_message = match export::save_png(&path, image.as_raw(), w as u32, h as u32) {
            Ok(()) => Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to save figure: {e:#}");
                Some(format!("Error: {e:#}"))
            }
        };
        self.state.pending_screenshot = None;
    }
}

impl eframe::App for RustyBuretteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection and overlays ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: statistics table ----
        egui::TopBottomPanel::bottom("stats_panel")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                table::stats_table(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_plot(ui, &mut self.state);
        });

        self.handle_screenshot(ctx);
    }
}
