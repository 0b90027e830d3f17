//! Chart Plotter Module
//! Draws the interactive GDP line chart and summary table using egui_plot.

use crate::charts::series::{series_bounds, series_color, CountrySeries};
use crate::stats::SeriesSummary;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints};

pub const CHART_TITLE: &str = "GDP Per Capita Over Time";
pub const X_LABEL: &str = "Years";
pub const Y_LABEL: &str = "GDP per Capita";

/// Creates the dashboard line chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the series at `index`.
    pub fn series_color(index: usize) -> Color32 {
        let (r, g, b) = series_color(index);
        Color32::from_rgb(r, g, b)
    }

    /// Format an axis value as a whole year.
    pub fn format_year(value: f64) -> String {
        if (value - value.round()).abs() < 1e-6 {
            format!("{}", value.round() as i64)
        } else {
            String::new()
        }
    }

    /// Format a GDP value with thousands shorthand for axis ticks.
    pub fn format_gdp(value: f64) -> String {
        if value.abs() >= 1000.0 {
            let k = format!("{:.1}", value / 1000.0);
            format!("{}k", k.trim_end_matches(".0"))
        } else {
            format!("{:.0}", value)
        }
    }

    /// Draw the multi-series line chart.
    /// X-axis: year, Y-axis: GDP per capita, one line per country.
    pub fn draw_line_chart(ui: &mut egui::Ui, series: &[CountrySeries], height: f32) {
        let mut plot = Plot::new("gdp_line_chart")
            .height(height)
            .legend(Legend::default())
            .x_axis_label(X_LABEL)
            .y_axis_label(Y_LABEL)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| Self::format_year(mark.value))
            .y_axis_formatter(|mark, _range| Self::format_gdp(mark.value))
            .label_formatter(|name, point| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!(
                        "{}\n{}: {:.0}",
                        name,
                        Self::format_year(point.x.round()),
                        point.y
                    )
                }
            });

        if let Some(bounds) = series_bounds(series) {
            plot = plot
                .include_x(bounds.x_min)
                .include_x(bounds.x_max)
                .include_y(bounds.y_min)
                .include_y(bounds.y_max);
        }

        plot.show(ui, |plot_ui| {
            for (idx, s) in series.iter().enumerate() {
                let points: PlotPoints = s
                    .points
                    .iter()
                    .map(|&(year, value)| [year as f64, value])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .color(Self::series_color(idx))
                        .width(2.0)
                        .name(&s.country),
                );
            }
        });
    }

    /// Draw summary statistics table
    pub fn draw_summary_table(
        ui: &mut egui::Ui,
        series: &[CountrySeries],
        summaries: &[SeriesSummary],
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("series_summary_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Country", "Years", "N", "Min", "Max", "Mean", "Median", "Std", "CAGR",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for summary in summaries {
                            let color = series
                                .iter()
                                .position(|s| s.country == summary.country)
                                .map(Self::series_color)
                                .unwrap_or_else(|| ui.visuals().text_color());

                            ui.label(RichText::new(&summary.country).size(11.0).color(color));
                            let years = format!("{}-{}", summary.first_year, summary.last_year);
                            ui.label(RichText::new(years).size(11.0));
                            ui.label(RichText::new(summary.count.to_string()).size(11.0));
                            ui.label(RichText::new(format!("{:.0}", summary.min)).size(11.0));
                            ui.label(RichText::new(format!("{:.0}", summary.max)).size(11.0));
                            ui.label(RichText::new(format!("{:.0}", summary.mean)).size(11.0));
                            ui.label(RichText::new(format!("{:.0}", summary.median)).size(11.0));
                            ui.label(RichText::new(format!("{:.0}", summary.std)).size(11.0));

                            match summary.growth_rate {
                                Some(rate) => {
                                    let rate_color = if rate < 0.0 {
                                        Color32::from_rgb(220, 53, 69)
                                    } else {
                                        Color32::from_rgb(40, 167, 69)
                                    };
                                    ui.label(
                                        RichText::new(format!("{:+.2}%", rate * 100.0))
                                            .size(11.0)
                                            .color(rate_color),
                                    );
                                }
                                None => {
                                    ui.label(RichText::new("-").size(11.0));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_ticks_only_on_whole_years() {
        assert_eq!(ChartPlotter::format_year(1990.0), "1990");
        assert_eq!(ChartPlotter::format_year(1990.5), "");
    }

    #[test]
    fn gdp_ticks_use_thousands_shorthand() {
        assert_eq!(ChartPlotter::format_gdp(500.0), "500");
        assert_eq!(ChartPlotter::format_gdp(45200.0), "45.2k");
        assert_eq!(ChartPlotter::format_gdp(2000.0), "2k");
    }
}
