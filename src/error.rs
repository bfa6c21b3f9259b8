use thiserror::Error;

/// Input-contract violations. Raised before any statistic is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("at least 2 weight measurements are required, got {0}")]
    TooFewSamples(usize),

    #[error("target volume must be positive, got {0}")]
    NonPositiveTargetVolume(f64),

    #[error("density must be positive, got {0}")]
    NonPositiveDensity(f64),

    #[error("weight #{index} is not a finite number ({value})")]
    NonFiniteWeight { index: usize, value: f64 },

    #[error("volume #{index} is not a finite number ({value}); check the density")]
    NonFiniteVolume { index: usize, value: f64 },
}

/// Kernel density estimation could not be built for a sample.
///
/// This is a soft failure: the KDE curve and its peak are omitted, every
/// other part of the analysis stays valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationUnavailable {
    #[error("KDE needs at least 2 distinct values, got {0}")]
    TooFewDistinctValues(usize),

    #[error("KDE bandwidth is not positive ({0})")]
    DegenerateBandwidth(f64),
}
