//! Chart Viewer Widget
//! Central panel showing the GDP line chart and per-country summary table.

use crate::charts::{build_series, ChartPlotter, CountrySeries, CHART_TITLE};
use crate::data::LongRecord;
use crate::stats::{SeriesSummary, StatsCalculator};
use egui::{RichText, ScrollArea};

const MIN_CHART_HEIGHT: f32 = 300.0;
const TABLE_ROW_HEIGHT: f32 = 22.0;

/// Line chart of the current query result.
#[derive(Default)]
pub struct ChartViewer {
    pub series: Vec<CountrySeries>,
    pub summaries: Vec<SeriesSummary>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the chart
    pub fn clear(&mut self) {
        self.series.clear();
        self.summaries.clear();
    }

    /// Rebuild series and statistics from a query result.
    pub fn set_records(&mut self, records: &[LongRecord]) {
        self.series = build_series(records);
        self.summaries = StatsCalculator::summarize(&self.series);
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Draw the chart viewer
    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(CHART_TITLE).size(20.0).strong());
        });
        ui.add_space(8.0);

        if self.series.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Select one or more countries").size(18.0));
            });
            return;
        }

        // Leave room for the summary table below the chart
        let table_height = (self.summaries.len() as f32 + 1.0) * TABLE_ROW_HEIGHT + 30.0;
        let chart_height = (ui.available_height() - table_height).max(MIN_CHART_HEIGHT);

        ChartPlotter::draw_line_chart(ui, &self.series, chart_height);
        ui.add_space(10.0);

        ScrollArea::vertical()
            .id_salt("summary_table")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ChartPlotter::draw_summary_table(ui, &self.series, &self.summaries);
            });
    }
}
