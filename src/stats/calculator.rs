//! Statistics Calculator Module
//! Descriptive statistics for each plotted country series.

use crate::charts::CountrySeries;
use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Summary of one country series over the selected years.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub country: String,
    pub count: usize,
    pub first_year: i32,
    pub last_year: i32,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    /// Compound annual growth rate between first and last point
    pub growth_rate: Option<f64>,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize one series. Returns `None` for a series without points.
    pub fn summarize_series(series: &CountrySeries) -> Option<SeriesSummary> {
        let (first_year, first_value) = *series.points.first()?;
        let (last_year, last_value) = *series.points.last()?;
        let values: Vec<f64> = series.points.iter().map(|&(_, v)| v).collect();
        let n = values.len();

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let std = if n > 1 {
            Statistics::std_dev(values.iter())
        } else {
            0.0
        };

        Some(SeriesSummary {
            country: series.country.clone(),
            count: n,
            first_year,
            last_year,
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            mean: Statistics::mean(values.iter()),
            median: Self::percentile(&sorted, 50.0),
            std,
            growth_rate: Self::growth_rate(first_value, last_value, last_year - first_year),
        })
    }

    /// Summarize all series in parallel, preserving series order.
    pub fn summarize(series: &[CountrySeries]) -> Vec<SeriesSummary> {
        series
            .par_iter()
            .filter_map(Self::summarize_series)
            .collect()
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Compound annual growth rate, defined for positive endpoints a year or more apart.
    fn growth_rate(first: f64, last: f64, years: i32) -> Option<f64> {
        if years <= 0 || first <= 0.0 || last <= 0.0 {
            return None;
        }
        Some((last / first).powf(1.0 / years as f64) - 1.0)
    }
}
