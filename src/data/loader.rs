//! CSV Data Loader Module
//! Loads the wide GDP table with Polars and parses every year column.

use super::cell::{parse_cell, ParseError, RawCell};
use super::query::YearRange;
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Name of the column holding the country label.
pub const COUNTRY_COLUMN: &str = "country";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column {:?}", COUNTRY_COLUMN)]
    MissingCountryColumn,
    #[error("Unparsable cell in column {column:?}, row {row}: {source}")]
    Cell {
        column: String,
        row: usize,
        source: ParseError,
    },
}

/// Year encoded by a column header, if the header is a year token.
///
/// Headers made only of ASCII digits are years; everything else is metadata.
pub fn year_of(header: &str) -> Option<i32> {
    if header.is_empty() || !header.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    header.parse().ok()
}

/// Immutable, fully parsed GDP table.
///
/// Year columns are `Float64`; the country column and any other metadata
/// columns are kept as read.
#[derive(Debug, Clone)]
pub struct GdpTable {
    df: DataFrame,
    /// Year columns sorted by year: (year, column name)
    year_columns: Vec<(i32, String)>,
}

impl GdpTable {
    /// Load a CSV file and parse all year columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading csv");

        // Every column is read as text so cells reach the k-suffix parser untouched
        let raw = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let table = Self::from_raw(raw)?;
        info!(
            path = %path.display(),
            rows = table.height(),
            year_columns = table.year_columns.len(),
            domain = ?table.year_domain(),
            "loaded gdp table"
        );
        Ok(table)
    }

    /// Build a table from an already-read raw DataFrame.
    ///
    /// Year columns may be text (parsed cell by cell) or numeric (cast).
    /// The first bad cell in column order fails the whole load.
    pub fn from_raw(raw: DataFrame) -> Result<Self, LoaderError> {
        if raw.column(COUNTRY_COLUMN).is_err() {
            return Err(LoaderError::MissingCountryColumn);
        }

        let parsed: Vec<Result<Column, LoaderError>> = raw
            .get_columns()
            .par_iter()
            .map(|col| {
                let name = col.name().as_str();
                if name == COUNTRY_COLUMN {
                    Ok(col.cast(&DataType::String)?)
                } else if year_of(name).is_some() {
                    parse_year_column(col)
                } else {
                    Ok(col.clone())
                }
            })
            .collect();
        let columns = parsed.into_iter().collect::<Result<Vec<_>, _>>()?;
        let df = DataFrame::new(columns)?;

        let mut year_columns: Vec<(i32, String)> = df
            .get_column_names()
            .iter()
            .filter_map(|name| year_of(name.as_str()).map(|y| (y, name.to_string())))
            .collect();
        year_columns.sort_by_key(|(year, _)| *year);

        Ok(Self { df, year_columns })
    }

    /// Get a reference to the parsed DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub(crate) fn year_columns(&self) -> &[(i32, String)] {
        &self.year_columns
    }

    /// Sorted year domain.
    pub fn years(&self) -> Vec<i32> {
        self.year_columns.iter().map(|(year, _)| *year).collect()
    }

    /// Full selectable range, `None` when the table has no year columns.
    pub fn year_domain(&self) -> Option<YearRange> {
        let low = self.year_columns.first()?.0;
        let high = self.year_columns.last()?.0;
        Some(YearRange::new(low, high))
    }

    /// Unique country names in order of first appearance.
    pub fn countries(&self) -> Vec<String> {
        let Ok(col) = self.df.column(COUNTRY_COLUMN) else {
            return Vec::new();
        };
        let Ok(ca) = col.str() else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        ca.into_iter()
            .flatten()
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}

fn parse_year_column(col: &Column) -> Result<Column, LoaderError> {
    let column = col.name().to_string();
    let cell_error = |row: usize, source: ParseError| LoaderError::Cell {
        column: column.clone(),
        row,
        source,
    };

    let values: Vec<f64> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                parse_cell(RawCell::Text(cell.unwrap_or_default()))
                    .map_err(|source| cell_error(row, source))
            })
            .collect::<Result<_, _>>()?,
        _ => col
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Some(v) => {
                    parse_cell(RawCell::Number(v)).map_err(|source| cell_error(row, source))
                }
                None => Err(cell_error(row, ParseError::Empty)),
            })
            .collect::<Result<_, _>>()?,
    };

    Ok(Column::new(col.name().clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_headers_are_digit_only() {
        assert_eq!(year_of("1800"), Some(1800));
        assert_eq!(year_of("2100"), Some(2100));
        assert_eq!(year_of("country"), None);
        assert_eq!(year_of("2000a"), None);
        assert_eq!(year_of("-200"), None);
        assert_eq!(year_of(""), None);
        assert_eq!(year_of("99999999999"), None);
    }

    #[test]
    fn parses_text_and_numeric_year_columns() {
        let raw = df!(
            "country" => ["A", "B"],
            "2000" => ["1k", "500"],
            "2001" => [2000.0, 500.0]
        )
        .unwrap();

        let table = GdpTable::from_raw(raw).unwrap();
        let df = table.dataframe();
        let values = |name: &str| -> Vec<Option<f64>> {
            df.column(name).unwrap().f64().unwrap().into_iter().collect()
        };
        let y2000 = values("2000");
        let y2001 = values("2001");

        assert_eq!(y2000, vec![Some(1000.0), Some(500.0)]);
        assert_eq!(y2001, vec![Some(2000.0), Some(500.0)]);
        assert_eq!(table.years(), vec![2000, 2001]);
        assert_eq!(table.year_domain(), Some(YearRange::new(2000, 2001)));
    }

    #[test]
    fn years_are_sorted_regardless_of_header_order() {
        let raw = df!(
            "country" => ["A"],
            "2002" => ["3"],
            "region" => ["Europe"],
            "2000" => ["1"],
            "2001" => ["2"]
        )
        .unwrap();

        let table = GdpTable::from_raw(raw).unwrap();
        assert_eq!(table.years(), vec![2000, 2001, 2002]);
        // Metadata columns are passed through untouched
        assert_eq!(
            table.dataframe().column("region").unwrap().dtype(),
            &DataType::String
        );
    }

    #[test]
    fn reports_location_of_bad_cell() {
        let raw = df!(
            "country" => ["A", "B", "C"],
            "1990" => ["1", "2", "3"],
            "1991" => ["1", "abc", "3"]
        )
        .unwrap();

        match GdpTable::from_raw(raw) {
            Err(LoaderError::Cell {
                column,
                row,
                source,
            }) => {
                assert_eq!(column, "1991");
                assert_eq!(row, 1);
                assert_eq!(source, ParseError::InvalidNumber("abc".to_string()));
            }
            other => panic!("expected cell error, got {other:?}"),
        }
    }

    #[test]
    fn missing_cells_fail_the_load() {
        let raw = df!(
            "country" => ["A", "B"],
            "2000" => [Some("1"), None]
        )
        .unwrap();

        assert!(matches!(
            GdpTable::from_raw(raw),
            Err(LoaderError::Cell {
                row: 1,
                source: ParseError::Empty,
                ..
            })
        ));
    }

    #[test]
    fn requires_country_column() {
        let raw = df!("nation" => ["A"], "2000" => ["1"]).unwrap();
        assert!(matches!(
            GdpTable::from_raw(raw),
            Err(LoaderError::MissingCountryColumn)
        ));
    }

    #[test]
    fn countries_keep_first_appearance_order() {
        let raw = df!(
            "country" => ["Norway", "Chad", "Norway", "Albania"],
            "2000" => ["1", "2", "3", "4"]
        )
        .unwrap();

        let table = GdpTable::from_raw(raw).unwrap();
        assert_eq!(table.countries(), vec!["Norway", "Chad", "Albania"]);
    }

    #[test]
    fn table_without_years_has_no_domain() {
        let raw = df!("country" => ["A"]).unwrap();
        let table = GdpTable::from_raw(raw).unwrap();
        assert!(table.years().is_empty());
        assert_eq!(table.year_domain(), None);
    }
}
