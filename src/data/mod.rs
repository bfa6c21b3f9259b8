/// Data layer: input records, loading, and grouping.
///
/// Architecture:
/// ```text
///  .json / .csv / built-in set
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ExperimentSet
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ExperimentSet  │  Vec<Experiment> (spec + weights)
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ grouping  │  name rules → instrument groups for overlays
///   └──────────┘
/// ```

pub mod grouping;
pub mod loader;
pub mod model;
