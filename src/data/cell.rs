//! Cell Parser Module
//! Converts raw year cells (plain or "k"-suffixed numbers) into f64 values.

use thiserror::Error;

/// Multiplier applied to values written in k-suffix notation.
pub const THOUSANDS: f64 = 1000.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty cell")]
    Empty,
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
    #[error("invalid thousands value: {0:?}")]
    InvalidThousands(String),
}

/// A raw cell as it comes out of the source table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCell<'a> {
    Number(f64),
    Text(&'a str),
}

/// Parse a raw cell into a number.
pub fn parse_cell(cell: RawCell<'_>) -> Result<f64, ParseError> {
    match cell {
        RawCell::Number(v) => Ok(v),
        RawCell::Text(text) => parse_value(text),
    }
}

/// Parse cell text, expanding a trailing `k`/`K` to thousands.
///
/// Any text containing the letter k is treated as k-suffixed: its last
/// character is dropped and the remainder must be a valid number.
pub fn parse_value(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    if text.contains(['k', 'K']) {
        let mut chars = text.chars();
        chars.next_back();
        return chars
            .as_str()
            .trim_end()
            .parse::<f64>()
            .map(|v| v * THOUSANDS)
            .map_err(|_| ParseError::InvalidThousands(text.to_string()));
    }

    text.parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}
