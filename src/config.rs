use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::grouping::GroupRule;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "RUSTY_BURETTE_CONFIG";

// ---------------------------------------------------------------------------
// Analysis policy
// ---------------------------------------------------------------------------

/// Policy constants for the statistical pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance level for classifying t-test results.
    pub alpha: f64,
    /// Fraction trimmed from each tail for the trimmed mean.
    pub trim_fraction: f64,
    /// Evenly spaced evaluation points for density curves.
    pub grid_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            trim_fraction: 1.0 / 6.0,
            grid_points: 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering overlays
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    /// One figure per instrument, in volume units.
    Single,
    /// One figure per group, every member in relative-error space.
    Group,
}

/// Which elements a figure carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub show_histogram: bool,
    pub show_t_curve: bool,
    pub show_kde: bool,
    pub show_trimmed_mean: bool,
    /// Multiples of σ marked on each side of the mean; any of 1, 2, 3.
    pub sigma_lines: Vec<u8>,
    /// Which figures the viewer opens on. The batch always produces both.
    pub overlay_mode: OverlayMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::full_analysis()
    }
}

impl RenderConfig {
    /// Histogram, t curve, KDE with its mode, trimmed mean and ±1/2/3σ.
    pub fn full_analysis() -> Self {
        Self {
            show_histogram: true,
            show_t_curve: true,
            show_kde: true,
            show_trimmed_mean: true,
            sigma_lines: vec![1, 2, 3],
            overlay_mode: OverlayMode::Single,
        }
    }

    /// Histogram, t curve and ±1/2/3σ only.
    pub fn condensed() -> Self {
        Self {
            show_kde: false,
            show_trimmed_mean: false,
            ..Self::full_analysis()
        }
    }

    /// t-curve and KDE overlays per instrument group.
    pub fn group_overlay() -> Self {
        Self {
            show_histogram: false,
            show_t_curve: true,
            show_kde: true,
            show_trimmed_mean: false,
            sigma_lines: Vec::new(),
            overlay_mode: OverlayMode::Group,
        }
    }

    /// `sigma_lines` restricted to 1..=3, sorted, without repeats.
    pub fn sigma_multiples(&self) -> Vec<u8> {
        let mut ks: Vec<u8> = self
            .sigma_lines
            .iter()
            .copied()
            .filter(|k| (1..=3).contains(k))
            .collect();
        ks.sort_unstable();
        ks.dedup();
        ks
    }
}

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub render: RenderConfig,
    pub groups: Vec<GroupRule>,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            render: RenderConfig::default(),
            groups: GroupRule::defaults(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from `$RUSTY_BURETTE_CONFIG` if set, defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
