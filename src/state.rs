use std::path::PathBuf;

use eframe::egui;

use rusty_burette::analysis::{run_batch, BatchReport};
use rusty_burette::config::{AppConfig, OverlayMode, RenderConfig};
use rusty_burette::data::model::ExperimentSet;
use rusty_burette::render::{Figure, FigureKind};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which figure the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Instrument(usize),
    Group { index: usize, kind: FigureKind },
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Measurements currently analysed.
    pub dataset: ExperimentSet,

    /// Where `dataset` came from, for the top bar.
    pub source: String,

    /// Results for `dataset` under `config`; rebuilt by [`AppState::refresh`].
    pub report: BatchReport,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Screen area of the last drawn plot, used to crop screenshots.
    pub plot_rect: Option<egui::Rect>,

    /// Destination of a requested screenshot that has not arrived yet.
    pub pending_screenshot: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self {
            config,
            dataset: ExperimentSet::builtin(),
            source: "built-in data set".to_string(),
            report: BatchReport::default(),
            view: View::Instrument(0),
            status_message: None,
            plot_rect: None,
            pending_screenshot: None,
        };
        state.refresh();
        state.view = state.default_view();
        state
    }

    /// Replace the analysed measurements.
    pub fn set_dataset(&mut self, dataset: ExperimentSet, source: String) {
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.refresh();
        self.view = self.default_view();
    }

    /// Re-run the batch after data or settings changed.
    pub fn refresh(&mut self) {
        self.report = run_batch(&self.dataset, &self.config);
        let failures = self.report.failure_count();
        if failures > 0 {
            self.status_message = Some(format!("{failures} instrument(s) rejected, see log"));
        }
        if matches!(self.view, View::Group { .. }) && self.current_figure().is_none() {
            self.view = self.default_view();
        }
    }

    /// First figure of the current overlay mode that was actually produced.
    pub fn default_view(&self) -> View {
        match self.config.render.overlay_mode {
            OverlayMode::Group => self
                .report
                .groups
                .iter()
                .enumerate()
                .find_map(|(index, g)| {
                    g.figures.first().map(|f| View::Group { index, kind: f.kind })
                })
                .unwrap_or(View::Instrument(0)),
            OverlayMode::Single => View::Instrument(0),
        }
    }

    /// Switch between single-instrument and group overlay figures.
    pub fn set_overlay_mode(&mut self, mode: OverlayMode) {
        self.config.render.overlay_mode = mode;
        self.view = self.default_view();
    }

    /// Swap the overlay settings, keeping the user's overlay mode.
    pub fn apply_preset(&mut self, preset: RenderConfig) {
        self.config.render = RenderConfig {
            overlay_mode: self.config.render.overlay_mode,
            ..preset
        };
        self.refresh();
    }

    /// Toggle a ±kσ line pair.
    pub fn toggle_sigma(&mut self, k: u8) {
        let lines = &mut self.config.render.sigma_lines;
        match lines.iter().position(|&s| s == k) {
            Some(i) => {
                lines.remove(i);
            }
            None => lines.push(k),
        }
        self.refresh();
    }

    /// Figure for the current selection, if one was produced.
    pub fn current_figure(&self) -> Option<&Figure> {
        match self.view {
            View::Instrument(i) => self.report.instruments.get(i)?.figure.as_ref(),
            View::Group { index, kind } => self
                .report
                .groups
                .get(index)?
                .figures
                .iter()
                .find(|f| f.kind == kind),
        }
    }
}
