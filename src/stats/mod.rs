//! Stats module - per-series summary statistics

mod calculator;

pub use calculator::{SeriesSummary, StatsCalculator};
