//! Static Chart Renderer
//! Writes the current line chart to a PNG file with plotters.
//!
//! Layout: centered title, mesh with year/GDP axes, one colored line per
//! country and a legend box in the upper left corner.

use crate::charts::plotter::{ChartPlotter, CHART_TITLE, X_LABEL, Y_LABEL};
use crate::charts::series::{series_bounds, series_color, CountrySeries};
use crate::export::ExportError;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `series` to a PNG of `(width, height)` pixels.
    pub fn write_png(
        path: &Path,
        series: &[CountrySeries],
        (width, height): (u32, u32),
    ) -> Result<(), ExportError> {
        let bounds = series_bounds(series).ok_or(ExportError::NoData)?;

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(30)
            .caption(CHART_TITLE, ("sans-serif", 24))
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)
            .map_err(render_error)?;

        let x_formatter = |v: &f64| ChartPlotter::format_year(v.round());
        let y_formatter = |v: &f64| ChartPlotter::format_gdp(*v);
        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .draw()
            .map_err(render_error)?;

        for (idx, s) in series.iter().enumerate() {
            if s.points.is_empty() {
                continue;
            }
            let (r, g, b) = series_color(idx);
            let color = RGBColor(r, g, b);

            chart
                .draw_series(LineSeries::new(
                    s.points.iter().map(|&(year, value)| (year as f64, value)),
                    color.stroke_width(2),
                ))
                .map_err(render_error)?
                .label(s.country.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        info!(path = %path.display(), series = series.len(), "chart exported");
        Ok(())
    }
}

fn render_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ExportError {
    ExportError::Render(err.to_string())
}
