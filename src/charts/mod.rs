//! Charts module - Series building and chart rendering

mod plotter;
mod renderer;
mod series;

pub use plotter::{ChartPlotter, CHART_TITLE, X_LABEL, Y_LABEL};
pub use renderer::StaticChartRenderer;
pub use series::{build_series, series_bounds, series_color, CountrySeries, SeriesBounds, PALETTE};
