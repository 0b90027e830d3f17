//! Export Module
//! Writes the current long records to CSV or JSON.

use crate::data::LongRecord;
use polars::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Collect long records into a `country, year, value` DataFrame.
pub fn records_to_dataframe(records: &[LongRecord]) -> PolarsResult<DataFrame> {
    let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let values: Vec<f64> = records.iter().map(|r| r.value).collect();

    DataFrame::new(vec![
        Column::new("country".into(), countries),
        Column::new("year".into(), years),
        Column::new("value".into(), values),
    ])
}

/// Write records as CSV with a header row.
pub fn write_records_csv(path: &Path, records: &[LongRecord]) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut df = records_to_dataframe(records)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!(path = %path.display(), records = records.len(), "records exported as csv");
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_records_json(path: &Path, records: &[LongRecord]) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, records)?;

    info!(path = %path.display(), records = records.len(), "records exported as json");
    Ok(())
}
