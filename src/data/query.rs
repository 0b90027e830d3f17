//! Query Module
//! Filters the wide table by country and year range and reshapes it to long records.

use super::loader::{GdpTable, COUNTRY_COLUMN};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid year range: {low} is after {high}")]
    InvalidRange { low: i32, high: i32 },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Inclusive year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.low <= year && year <= self.high
    }
}

/// One (country, year, value) observation, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

impl GdpTable {
    /// Select countries and years and melt the result into long records.
    ///
    /// An empty selection yields no records; a missing range means the full
    /// year domain. Records are ordered by source row, then by year. Country
    /// names that are not in the table are ignored.
    pub fn query(
        &self,
        selected_countries: &[String],
        selected_year_range: Option<YearRange>,
    ) -> Result<Vec<LongRecord>, QueryError> {
        if selected_countries.is_empty() {
            return Ok(Vec::new());
        }

        let Some(range) = selected_year_range.or_else(|| self.year_domain()) else {
            return Ok(Vec::new());
        };
        if range.low > range.high {
            return Err(QueryError::InvalidRange {
                low: range.low,
                high: range.high,
            });
        }

        let df = self.dataframe();
        let countries = df.column(COUNTRY_COLUMN)?.str()?;
        let year_values = self
            .year_columns()
            .iter()
            .filter(|(year, _)| range.contains(*year))
            .map(|(year, name)| Ok((*year, df.column(name)?.f64()?)))
            .collect::<PolarsResult<Vec<_>>>()?;

        let selected: HashSet<&str> = selected_countries.iter().map(String::as_str).collect();
        let mut matched: HashSet<&str> = HashSet::new();
        let mut records = Vec::new();

        for (row, country) in countries.into_iter().enumerate() {
            let Some(country) = country.filter(|c| selected.contains(c)) else {
                continue;
            };
            matched.insert(country);

            for (year, values) in &year_values {
                if let Some(value) = values.get(row) {
                    records.push(LongRecord {
                        country: country.to_string(),
                        year: *year,
                        value,
                    });
                }
            }
        }

        let unknown: Vec<&str> = selected.difference(&matched).copied().collect();
        if !unknown.is_empty() {
            debug!(?unknown, "ignoring countries not present in table");
        }
        debug!(
            countries = selected_countries.len(),
            low = range.low,
            high = range.high,
            records = records.len(),
            "query complete"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> GdpTable {
        let raw = df!(
            "country" => ["A", "B"],
            "2000" => ["1k", "500"],
            "2001" => ["2000", "0.5k"]
        )
        .unwrap();
        GdpTable::from_raw(raw).unwrap()
    }

    fn record(country: &str, year: i32, value: f64) -> LongRecord {
        LongRecord {
            country: country.to_string(),
            year,
            value,
        }
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reshapes_selected_rows_to_long_records() {
        let table = sample_table();
        let records = table
            .query(&names(&["A", "B"]), Some(YearRange::new(2000, 2001)))
            .unwrap();

        assert_eq!(
            records,
            vec![
                record("A", 2000, 1000.0),
                record("A", 2001, 2000.0),
                record("B", 2000, 500.0),
                record("B", 2001, 500.0),
            ]
        );
    }

    #[test]
    fn empty_selection_yields_nothing_for_any_range() {
        let table = sample_table();
        assert!(table.query(&[], None).unwrap().is_empty());
        assert!(table
            .query(&[], Some(YearRange::new(2000, 2001)))
            .unwrap()
            .is_empty());
        // Even an inverted range is not an error when nothing is selected
        assert!(table
            .query(&[], Some(YearRange::new(2001, 2000)))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_range_defaults_to_full_domain() {
        let table = sample_table();
        let records = table.query(&names(&["B"]), None).unwrap();
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2001]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let table = sample_table();
        let err = table
            .query(&names(&["A"]), Some(YearRange::new(2001, 2000)))
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidRange {
                low: 2001,
                high: 2000
            }
        ));
    }

    #[test]
    fn range_limits_are_inclusive() {
        let table = sample_table();
        let records = table
            .query(&names(&["A"]), Some(YearRange::new(2001, 2001)))
            .unwrap();
        assert_eq!(records, vec![record("A", 2001, 2000.0)]);
    }

    #[test]
    fn range_outside_domain_is_empty() {
        let table = sample_table();
        let records = table
            .query(&names(&["A"]), Some(YearRange::new(1800, 1900)))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn unknown_countries_are_ignored() {
        let table = sample_table();
        let records = table
            .query(&names(&["Atlantis", "B"]), None)
            .unwrap();
        assert_eq!(
            records,
            vec![record("B", 2000, 500.0), record("B", 2001, 500.0)]
        );
        assert!(table.query(&names(&["Atlantis"]), None).unwrap().is_empty());
    }

    #[test]
    fn order_follows_source_rows_not_selection() {
        let table = sample_table();
        let records = table.query(&names(&["B", "A"]), None).unwrap();
        let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["A", "A", "B", "B"]);
    }

    #[test]
    fn years_ascend_even_when_headers_do_not() {
        let raw = df!(
            "country" => ["A"],
            "2001" => ["2"],
            "1999" => ["0"],
            "2000" => ["1"]
        )
        .unwrap();
        let table = GdpTable::from_raw(raw).unwrap();
        let records = table.query(&names(&["A"]), None).unwrap();
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1999, 2000, 2001]);
    }

    #[test]
    fn duplicate_country_rows_are_all_kept() {
        let raw = df!(
            "country" => ["A", "B", "A"],
            "2000" => ["1", "2", "3"]
        )
        .unwrap();
        let table = GdpTable::from_raw(raw).unwrap();
        let records = table.query(&names(&["A"]), None).unwrap();
        assert_eq!(records, vec![record("A", 2000, 1.0), record("A", 2000, 3.0)]);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let table = sample_table();
        let selection = names(&["A", "B"]);
        let first = table.query(&selection, Some(YearRange::new(2000, 2001))).unwrap();
        let second = table.query(&selection, Some(YearRange::new(2000, 2001))).unwrap();
        assert_eq!(first, second);
    }
}
