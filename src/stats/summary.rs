use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::data::model::{Experiment, InstrumentSpec, RelativeErrorSeries, VolumeSeries};
use crate::error::AnalysisError;

use super::descriptive::{Descriptive, trimmed_mean};
use super::kde::{GaussianKde, arg_max};
use super::ttest::TTest;
use super::{SIGMA_SPAN, SampleDistribution, linspace};

/// Statistical summary of one instrument, in volume units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSummary {
    pub spec: InstrumentSpec,
    pub volumes: VolumeSeries,
    pub location: Descriptive,
    /// `(μ − target) / target × 100`
    pub relative_error_pct: f64,
    pub t_test: TTest,
    pub trimmed_mean: Option<f64>,
    /// Arg-max of the KDE over `μ ± 4σ`; `None` when the KDE is unavailable.
    pub kde_peak: Option<f64>,
}

impl StatSummary {
    pub fn compute(experiment: &Experiment, config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        Self::from_parts(&experiment.weights, &experiment.spec, config)
    }

    pub fn from_parts(
        weights: &[f64],
        spec: &InstrumentSpec,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        validate(weights, spec)?;

        let volumes = VolumeSeries::from_weights(weights, spec.density);
        let location =
            Descriptive::new(volumes.values()).ok_or(AnalysisError::TooFewSamples(weights.len()))?;
        let relative_error_pct = (location.mean - spec.target_volume) / spec.target_volume * 100.0;
        let t_test = TTest::one_sample(&location, spec.target_volume);
        let trimmed_mean = trimmed_mean(volumes.values(), config.trim_fraction);
        let kde_peak = kde_peak(volumes.values(), &location, config.grid_points);

        Ok(Self {
            spec: spec.clone(),
            volumes,
            location,
            relative_error_pct,
            t_test,
            trimmed_mean,
            kde_peak,
        })
    }

    pub fn mean(&self) -> f64 {
        self.location.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.location.std_dev
    }

    pub fn df(&self) -> usize {
        self.location.df
    }
}

impl SampleDistribution for StatSummary {
    fn label(&self) -> &str {
        &self.spec.name
    }

    fn values(&self) -> &[f64] {
        self.volumes.values()
    }

    fn location(&self) -> &Descriptive {
        &self.location
    }
}

/// One instrument expressed as percent deviation from its own target, so
/// instruments with different nominal volumes share an axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativeErrorSummary {
    pub name: String,
    pub errors: RelativeErrorSeries,
    pub location: Descriptive,
}

impl RelativeErrorSummary {
    pub fn compute(experiment: &Experiment) -> Result<Self, AnalysisError> {
        validate(&experiment.weights, &experiment.spec)?;

        let volumes = VolumeSeries::from_weights(&experiment.weights, experiment.spec.density);
        let errors = RelativeErrorSeries::from_volumes(&volumes, experiment.spec.target_volume);
        let location = Descriptive::new(errors.values())
            .ok_or(AnalysisError::TooFewSamples(experiment.weights.len()))?;

        Ok(Self {
            name: experiment.spec.name.clone(),
            errors,
            location,
        })
    }
}

impl SampleDistribution for RelativeErrorSummary {
    fn label(&self) -> &str {
        &self.name
    }

    fn values(&self) -> &[f64] {
        self.errors.values()
    }

    fn location(&self) -> &Descriptive {
        &self.location
    }
}

fn validate(weights: &[f64], spec: &InstrumentSpec) -> Result<(), AnalysisError> {
    if weights.len() < 2 {
        return Err(AnalysisError::TooFewSamples(weights.len()));
    }
    if !(spec.target_volume > 0.0) {
        return Err(AnalysisError::NonPositiveTargetVolume(spec.target_volume));
    }
    if !(spec.density > 0.0) {
        return Err(AnalysisError::NonPositiveDensity(spec.density));
    }
    if let Some((index, &value)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
        return Err(AnalysisError::NonFiniteWeight { index, value });
    }
    let volumes = weights.iter().map(|w| w / spec.density);
    if let Some((index, value)) = volumes.enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AnalysisError::NonFiniteVolume { index, value });
    }
    Ok(())
}

fn kde_peak(values: &[f64], location: &Descriptive, grid_points: usize) -> Option<f64> {
    let kde = GaussianKde::new(values).ok()?;
    let half_width = SIGMA_SPAN * location.std_dev;
    let grid = linspace(
        location.mean - half_width,
        location.mean + half_width,
        grid_points,
    );
    arg_max(&kde.evaluate(&grid)).map(|(x, _)| x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn micropipette() -> Experiment {
        Experiment::new(
            "1000μL micropipette",
            1.0,
            0.9968,
            vec![0.9933, 0.9678, 0.9998, 0.9914, 0.9845, 0.9823],
        )
    }

    #[test]
    fn micropipette_reference_values() {
        let s = StatSummary::compute(&micropipette(), &AnalysisConfig::default()).unwrap();
        let expected = [0.9964, 0.9709, 1.0030, 0.9945, 0.9876, 0.9855];
        for (v, e) in s.volumes.values().iter().zip(expected) {
            assert!((v - e).abs() < 1e-4, "{v} vs {e}");
        }
        assert!((s.mean() - 0.9897).abs() < 1e-4);
        assert!((s.relative_error_pct - (-1.03)).abs() < 5e-3);
        assert_eq!(s.df(), 5);
        // t ≈ -2.265 with df = 5: p ≈ 0.07, not significant at α = 0.05
        assert!((s.t_test.t_statistic - (-2.2648)).abs() < 1e-3);
        assert!(s.t_test.p_value > 0.05 && s.t_test.p_value < 0.1);
        assert!(s.trimmed_mean.is_some());
        let peak = s.kde_peak.unwrap();
        assert!((peak - s.mean()).abs() < 4.0 * s.std_dev());
    }

    #[test]
    fn constant_sample_is_degenerate_but_valid() {
        let exp = Experiment::new("flat", 1.0, 1.0, vec![1.0; 4]);
        let s = StatSummary::compute(&exp, &AnalysisConfig::default()).unwrap();
        assert_eq!(s.std_dev(), 0.0);
        assert_eq!(s.relative_error_pct, 0.0);
        assert!(s.t_test.is_degenerate());
        assert_eq!(s.kde_peak, None);
        assert_eq!(s.trimmed_mean, Some(1.0));
    }

    #[test]
    fn input_contract_is_enforced() {
        let cfg = AnalysisConfig::default();
        let short = Experiment::new("short", 1.0, 1.0, vec![1.0]);
        assert_eq!(
            StatSummary::compute(&short, &cfg),
            Err(AnalysisError::TooFewSamples(1))
        );
        let bad_target = Experiment::new("t", 0.0, 1.0, vec![1.0, 1.1]);
        assert_eq!(
            StatSummary::compute(&bad_target, &cfg),
            Err(AnalysisError::NonPositiveTargetVolume(0.0))
        );
        let bad_density = Experiment::new("d", 1.0, -1.0, vec![1.0, 1.1]);
        assert_eq!(
            StatSummary::compute(&bad_density, &cfg),
            Err(AnalysisError::NonPositiveDensity(-1.0))
        );
        let nan = Experiment::new("n", 1.0, 1.0, vec![1.0, f64::NAN]);
        assert!(matches!(
            StatSummary::compute(&nan, &cfg),
            Err(AnalysisError::NonFiniteWeight { index: 1, .. })
        ));
        let tiny_density = Experiment::new("v", 1.0, 1e-320, vec![1.0, 1.1]);
        assert!(matches!(
            StatSummary::compute(&tiny_density, &cfg),
            Err(AnalysisError::NonFiniteVolume { index: 0, .. })
        ));
        assert!(RelativeErrorSummary::compute(&tiny_density).is_err());
    }

    #[test]
    fn summary_is_deterministic() {
        let cfg = AnalysisConfig::default();
        let a = StatSummary::compute(&micropipette(), &cfg).unwrap();
        let b = StatSummary::compute(&micropipette(), &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mean_on_target_has_zero_error() {
        let exp = Experiment::new("exact", 2.0, 1.0, vec![1.5, 2.5, 2.0]);
        let s = StatSummary::compute(&exp, &AnalysisConfig::default()).unwrap();
        assert_eq!(s.relative_error_pct, 0.0);
        assert_eq!(s.t_test.t_statistic, 0.0);
        assert_eq!(s.t_test.p_value, 1.0);
    }

    #[test]
    fn relative_error_summary_tracks_volume_summary() {
        let exp = micropipette();
        let volume = StatSummary::compute(&exp, &AnalysisConfig::default()).unwrap();
        let rel = RelativeErrorSummary::compute(&exp).unwrap();
        assert!((rel.location.mean - volume.relative_error_pct).abs() < 1e-9);
        assert!((rel.location.std_dev - volume.std_dev() * 100.0).abs() < 1e-9);
    }
}
