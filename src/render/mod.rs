/// Figure descriptions: domains, density curves, peaks and reference lines.
///
/// Nothing in here draws. A [`Figure`] is handed to the egui viewer or
/// serialized by the headless report.
///
/// ```text
///  StatSummary / RelativeErrorSummary
///        │
///        ▼
///   ┌──────────┐
///   │  domain   │  μ ± 4σ, or shared group range rounded to 0.1
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  curve    │  t pdf / KDE on 1000 points, peaks
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ renderer  │  histogram + curves + markers + annotation → Figure
///   └──────────┘
/// ```

pub mod curve;
pub mod domain;
pub mod figure;
pub mod histogram;
pub mod renderer;

pub use domain::PlotDomain;
pub use figure::{Figure, FigureKind, MarkerKind};
pub use renderer::DistributionRenderer;
