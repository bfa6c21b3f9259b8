//! Measurement-uncertainty analysis for laboratory volumetric instruments.
//!
//! ```text
//!  weights (g) + InstrumentSpec
//!        │
//!        ▼
//!   ┌────────┐
//!   │ stats  │  volumes, μ, σ, t-test, trimmed mean, KDE peak → StatSummary
//!   └────────┘
//!        │
//!        ▼
//!   ┌────────┐
//!   │ render │  domain, t / KDE curves, peaks, markers → Figure
//!   └────────┘
//!        │
//!        ▼
//!   egui viewer / export (PNG, CSV, JSON)
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod render;
pub mod stats;
