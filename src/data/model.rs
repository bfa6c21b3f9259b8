use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InstrumentSpec – what an instrument is supposed to deliver
// ---------------------------------------------------------------------------

/// Nominal description of one volumetric instrument run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Display name, also used to derive output file names.
    pub name: String,
    /// Nominal volume the instrument should deliver (mL).
    pub target_volume: f64,
    /// Density of the dispensed liquid (g/mL).
    pub density: f64,
}

impl fmt::Display for InstrumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (target {} mL, density {} g/mL)",
            self.name, self.target_volume, self.density
        )
    }
}

// ---------------------------------------------------------------------------
// Experiment – one input record
// ---------------------------------------------------------------------------

/// Repeated weighings of the liquid delivered by one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    #[serde(flatten)]
    pub spec: InstrumentSpec,
    /// Raw weight measurements (g), in the order they were taken.
    pub weights: Vec<f64>,
}

impl Experiment {
    pub fn new(name: &str, target_volume: f64, density: f64, weights: Vec<f64>) -> Self {
        Self {
            spec: InstrumentSpec {
                name: name.to_string(),
                target_volume,
                density,
            },
            weights,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }
}

// ---------------------------------------------------------------------------
// Derived series
// ---------------------------------------------------------------------------

/// Volumes (mL) derived elementwise from weights: `weight / density`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeSeries(Vec<f64>);

impl VolumeSeries {
    pub fn from_weights(weights: &[f64], density: f64) -> Self {
        Self(weights.iter().map(|w| w / density).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

/// Percent deviation of each volume from the target:
/// `volume / target × 100 − 100`.
///
/// Puts instruments with different nominal volumes on one comparable axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativeErrorSeries(Vec<f64>);

impl RelativeErrorSeries {
    pub fn from_volumes(volumes: &VolumeSeries, target_volume: f64) -> Self {
        Self(
            volumes
                .values()
                .iter()
                .map(|v| (v / target_volume) * 100.0 - 100.0)
                .collect(),
        )
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ExperimentSet – the complete loaded data set
// ---------------------------------------------------------------------------

/// All experiments loaded from one source, in source order.
#[derive(Debug, Clone, Default)]
pub struct ExperimentSet {
    pub experiments: Vec<Experiment>,
}

impl ExperimentSet {
    pub fn from_experiments(experiments: Vec<Experiment>) -> Self {
        Self { experiments }
    }

    /// Reference measurements shipped with the application: five instruments
    /// weighed with water at 0.9968 g/mL.
    pub fn builtin() -> Self {
        const WATER: f64 = 0.9968;
        Self::from_experiments(vec![
            Experiment::new(
                "1mL graduated pipette",
                1.0,
                WATER,
                vec![0.7517, 0.9122, 0.9343, 0.9174, 1.0165, 1.0071],
            ),
            Experiment::new(
                "10mL graduated pipette",
                10.0,
                WATER,
                vec![9.9094, 9.8970, 9.8806, 9.9107, 9.8025, 9.7799],
            ),
            Experiment::new(
                "1mL burette",
                1.0,
                WATER,
                vec![1.1935, 1.0952, 1.0515, 0.9904, 1.0004, 1.0601],
            ),
            Experiment::new(
                "10mL burette",
                10.0,
                WATER,
                vec![10.0740, 10.0338, 9.8277, 10.0358, 9.426, 10.1115],
            ),
            Experiment::new(
                "1000μL micropipette",
                1.0,
                WATER,
                vec![0.9933, 0.9678, 0.9998, 0.9914, 0.9845, 0.9823],
            ),
        ])
    }

    /// Number of experiments.
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.experiments.iter().map(Experiment::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volumes_are_weights_over_density() {
        let weights = [0.9933, 0.9678, 0.9998];
        let volumes = VolumeSeries::from_weights(&weights, 0.9968);
        for (w, v) in weights.iter().zip(volumes.values()) {
            assert!((v - w / 0.9968).abs() < 1e-15);
        }
    }

    #[test]
    fn relative_errors_are_percent_deviation() {
        let volumes = VolumeSeries::from_weights(&[10.1, 9.9, 10.0], 1.0);
        let errors = RelativeErrorSeries::from_volumes(&volumes, 10.0);
        let expected = [1.0, -1.0, 0.0];
        for (e, x) in errors.values().iter().zip(expected) {
            assert!((e - x).abs() < 1e-9, "{e} != {x}");
        }
    }

    #[test]
    fn builtin_set_has_five_instruments() {
        let set = ExperimentSet::builtin();
        assert_eq!(set.len(), 5);
        assert!(set.experiments.iter().all(|e| e.weights.len() == 6));
    }
}
