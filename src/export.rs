//! Output collaborator: file naming, output directory, summary tables,
//! figure descriptions and PNG images.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::render::{Figure, FigureKind};
use crate::stats::StatSummary;

/// Make an instrument or group name safe for use in a file name.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            'μ' | 'µ' => 'u',
            c => c,
        })
        .collect()
}

/// Create `dir` (and parents) if needed.
///
/// Failure is returned to the caller; nothing falls back to the current
/// directory behind its back.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    log::info!("Created output directory {}", dir.display());
    Ok(())
}

/// File name (without directory) for a rendered figure, by kind:
///
/// * `{stem}_analysis_plot.png`
/// * `{stem}_condensed_sigma_plot.png`
/// * `overlay_t_error_{group}.png`
/// * `overlay_kde_error_{group}.png`
pub fn figure_file_name(figure: &Figure, extension: &str) -> String {
    let stem = sanitize_file_stem(&figure.subject);
    match figure.kind {
        FigureKind::Analysis => format!("{stem}_analysis_plot.{extension}"),
        FigureKind::Condensed => format!("{stem}_condensed_sigma_plot.{extension}"),
        FigureKind::GroupTOverlay => format!("overlay_t_error_{stem}.{extension}"),
        FigureKind::GroupKdeOverlay => format!("overlay_kde_error_{stem}.{extension}"),
    }
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SummaryRow<'a> {
    instrument: &'a str,
    n: usize,
    target_volume_ml: f64,
    density_g_per_ml: f64,
    mean_ml: f64,
    std_dev_ml: f64,
    df: usize,
    relative_error_pct: f64,
    t_statistic: Option<f64>,
    p_value: Option<f64>,
    significance: String,
    trimmed_mean_ml: Option<f64>,
    kde_peak_ml: Option<f64>,
}

/// One CSV row per instrument. Degenerate t-tests leave `t_statistic` and
/// `p_value` empty.
pub fn write_summary_csv<'a, W, I>(output: W, summaries: I, alpha: f64) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a StatSummary>,
{
    let mut writer = csv::Writer::from_writer(output);
    for s in summaries {
        let defined = |v: f64| (!v.is_nan()).then_some(v);
        writer
            .serialize(SummaryRow {
                instrument: &s.spec.name,
                n: s.location.n,
                target_volume_ml: s.spec.target_volume,
                density_g_per_ml: s.spec.density,
                mean_ml: s.mean(),
                std_dev_ml: s.std_dev(),
                df: s.df(),
                relative_error_pct: s.relative_error_pct,
                t_statistic: defined(s.t_test.t_statistic),
                p_value: defined(s.t_test.p_value),
                significance: s.t_test.significance(alpha).to_string(),
                trimmed_mean_ml: s.trimmed_mean,
                kde_peak_ml: s.kde_peak,
            })
            .with_context(|| format!("writing summary row for '{}'", s.spec.name))?;
    }
    writer.flush().context("flushing summary CSV")?;
    Ok(())
}

pub fn save_summary_csv<'a, I>(path: &Path, summaries: I, alpha: f64) -> Result<()>
where
    I: IntoIterator<Item = &'a StatSummary>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_summary_csv(file, summaries, alpha)?;
    log::info!("Summary table written to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Figures
// ---------------------------------------------------------------------------

/// Write a figure description as pretty JSON next to where its image would
/// go. Returns the path written.
pub fn save_figure_json(dir: &Path, figure: &Figure) -> Result<PathBuf> {
    let path = dir.join(figure_file_name(figure, "json"));
    let text = serde_json::to_string_pretty(figure)
        .with_context(|| format!("serializing figure '{}'", figure.title))?;
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Encode tightly packed RGBA8 pixels as PNG.
pub fn save_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> Result<()> {
    image::save_buffer(path, rgba, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Figure saved to {}", path.display());
    Ok(())
}
