//! Batch driver: runs every instrument and every group through the
//! statistics and rendering pipeline, isolating failures per instrument.

use crate::config::AppConfig;
use crate::data::grouping::partition;
use crate::data::model::{Experiment, ExperimentSet};
use crate::error::AnalysisError;
use crate::render::{DistributionRenderer, Figure};
use crate::render::figure::format_significant;
use crate::stats::{RelativeErrorSummary, StatSummary};

/// Outcome for one instrument. Invalid input leaves `figure` empty.
#[derive(Debug, Clone)]
pub struct InstrumentReport {
    pub name: String,
    pub outcome: Result<StatSummary, AnalysisError>,
    pub figure: Option<Figure>,
}

/// Outcome for one instrument group.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub name: String,
    pub members: Vec<RelativeErrorSummary>,
    /// Members rejected by input validation.
    pub skipped: Vec<(String, AnalysisError)>,
    pub figures: Vec<Figure>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub instruments: Vec<InstrumentReport>,
    pub groups: Vec<GroupReport>,
}

impl BatchReport {
    pub fn summaries(&self) -> impl Iterator<Item = &StatSummary> {
        self.instruments.iter().filter_map(|r| r.outcome.as_ref().ok())
    }

    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.instruments
            .iter()
            .filter_map(|r| r.figure.as_ref())
            .chain(self.groups.iter().flat_map(|g| g.figures.iter()))
    }

    pub fn failure_count(&self) -> usize {
        self.instruments.iter().filter(|r| r.outcome.is_err()).count()
    }
}

/// Analyse and render a single instrument.
pub fn analyze_instrument(exp: &Experiment, renderer: &DistributionRenderer) -> InstrumentReport {
    log::info!("Analysing {}", exp.spec);
    let outcome = StatSummary::compute(exp, &renderer.analysis);

    let figure = match &outcome {
        Ok(summary) => {
            log_summary(summary, renderer.analysis.alpha);
            let figure = renderer.single(summary);
            log_notes(&figure);
            Some(figure)
        }
        Err(e) => {
            log::warn!("Skipping '{}': {e}", exp.name());
            None
        }
    };

    InstrumentReport {
        name: exp.name().to_string(),
        outcome,
        figure,
    }
}

/// Summarise a group in relative-error space and render its overlays.
pub fn analyze_group(
    name: &str,
    members: &[&Experiment],
    renderer: &DistributionRenderer,
) -> GroupReport {
    log::info!("Processing group {name} ({} instruments)", members.len());
    let mut summaries = Vec::with_capacity(members.len());
    let mut skipped = Vec::new();

    for exp in members {
        match RelativeErrorSummary::compute(exp) {
            Ok(s) => {
                log::info!(
                    "  {}: mean error {:.3} %, error std-dev {:.3} %",
                    s.name,
                    s.location.mean,
                    s.location.std_dev
                );
                summaries.push(s);
            }
            Err(e) => {
                log::warn!("  Skipping '{}' in group {name}: {e}", exp.name());
                skipped.push((exp.name().to_string(), e));
            }
        }
    }

    let figures = renderer.group(name, &summaries);
    match figures.first() {
        Some(fig) => log::info!(
            "  {name} shared x range: {:.1} % to {:.1} %",
            fig.domain.x_min,
            fig.domain.x_max
        ),
        None if !summaries.is_empty() => log::warn!("  {name}: no usable plot range"),
        None => {}
    }
    figures.iter().for_each(log_notes);

    GroupReport {
        name: name.to_string(),
        members: summaries,
        skipped,
        figures,
    }
}

/// Run every instrument, then every configured group.
pub fn run_batch(set: &ExperimentSet, config: &AppConfig) -> BatchReport {
    let renderer = DistributionRenderer::new(config.render.clone(), config.analysis.clone());

    let instruments = set
        .experiments
        .iter()
        .map(|exp| analyze_instrument(exp, &renderer))
        .collect();
    let groups = partition(set, &config.groups)
        .into_iter()
        .map(|g| analyze_group(g.name, &g.members, &renderer))
        .collect();

    BatchReport {
        instruments,
        groups,
    }
}

fn log_summary(s: &StatSummary, alpha: f64) {
    log::info!(
        "  {}: mean {} mL, std-dev {} mL, relative error {:.2} %",
        s.spec.name,
        format_significant(s.mean(), 4),
        format_significant(s.std_dev(), 4),
        s.relative_error_pct
    );
    log::info!(
        "  t = {}, p = {} → {}",
        format_significant(s.t_test.t_statistic, 4),
        format_significant(s.t_test.p_value, 4),
        s.t_test.significance(alpha)
    );
    if s.t_test.is_degenerate() {
        log::warn!("  {}: all measurements identical, t-test undefined", s.spec.name);
    }
    match s.trimmed_mean {
        Some(tm) => log::debug!("  trimmed mean {} mL", format_significant(tm, 4)),
        None => log::debug!("  trimmed mean unavailable"),
    }
}

fn log_notes(fig: &Figure) {
    for note in &fig.notes {
        log::warn!("  {note}");
    }
}
