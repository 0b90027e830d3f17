//! GDP Explorer - GDP per capita dashboard
//!
//! Loads a wide GDP-per-capita table (one column per year, cells optionally
//! written as `45.2k`), filters it by country and year range, and reshapes
//! the selection into long `(country, year, value)` records for plotting.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;
