//! Headless batch run: analyse every instrument and group, then write the
//! summary table and figure descriptions to the output directory.
//!
//! Usage: `report [DATA_FILE]` (built-in measurements when omitted).

use std::path::PathBuf;

use anyhow::{Context, Result};

use rusty_burette::analysis::run_batch;
use rusty_burette::config::AppConfig;
use rusty_burette::data::loader::load_file;
use rusty_burette::data::model::ExperimentSet;
use rusty_burette::export;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    let set = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            load_file(&path).with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            log::info!("No data file given, using built-in measurements");
            ExperimentSet::builtin()
        }
    };

    let report = run_batch(&set, &config);

    let dir = &config.output_dir;
    export::prepare_output_dir(dir)?;
    export::save_summary_csv(&dir.join("summary.csv"), report.summaries(), config.analysis.alpha)?;

    let mut written = 0;
    for figure in report.figures() {
        let path = export::save_figure_json(dir, figure)?;
        log::debug!("Wrote {}", path.display());
        written += 1;
    }
    log::info!("{written} figure(s) written to {}", dir.display());

    for failed in report.instruments.iter().filter(|r| r.outcome.is_err()) {
        if let Err(e) = &failed.outcome {
            log::error!("{}: {e}", failed.name);
        }
    }
    if report.failure_count() > 0 {
        log::warn!(
            "{} of {} instruments could not be analysed",
            report.failure_count(),
            report.instruments.len()
        );
    }
    Ok(())
}
