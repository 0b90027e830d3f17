//! Data module - CSV loading, cell parsing and querying

mod cell;
mod loader;
mod query;

pub use cell::{parse_cell, parse_value, ParseError, RawCell, THOUSANDS};
pub use loader::{year_of, GdpTable, LoaderError, COUNTRY_COLUMN};
pub use query::{LongRecord, QueryError, YearRange};
