//! Series Module
//! Groups long records into one line series per country.

use crate::data::LongRecord;

/// Line colors, assigned by series position.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (231, 76, 60),   // Red
    (52, 152, 219),  // Blue
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
];

pub fn series_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// Points of one country, in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<(i32, f64)>,
}

/// Plot area bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Group records by country, keeping first-appearance order.
pub fn build_series(records: &[LongRecord]) -> Vec<CountrySeries> {
    let mut series: Vec<CountrySeries> = Vec::new();

    for record in records {
        match series.iter_mut().find(|s| s.country == record.country) {
            Some(s) => s.points.push((record.year, record.value)),
            None => series.push(CountrySeries {
                country: record.country.clone(),
                points: vec![(record.year, record.value)],
            }),
        }
    }

    series
}

/// Bounds covering every point, with 5% vertical padding.
///
/// Returns `None` when there are no finite points.
pub fn series_bounds(series: &[CountrySeries]) -> Option<SeriesBounds> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(year, value) in series.iter().flat_map(|s| s.points.iter()) {
        if !value.is_finite() {
            continue;
        }
        x_min = x_min.min(year as f64);
        x_max = x_max.max(year as f64);
        y_min = y_min.min(value);
        y_max = y_max.max(value);
    }

    if x_min.is_infinite() {
        return None;
    }

    // Single year or flat line still needs a non-empty range
    if x_max - x_min < 1.0 {
        x_min -= 0.5;
        x_max += 0.5;
    }
    let pad = ((y_max - y_min) * 0.05).max(y_max.abs() * 0.05).max(1.0);

    Some(SeriesBounds {
        x_min,
        x_max,
        y_min: y_min - pad,
        y_max: y_max + pad,
    })
}
