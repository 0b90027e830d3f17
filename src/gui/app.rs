//! GDP Explorer Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{GdpTable, LongRecord};
use crate::export::{write_records_csv, write_records_json, ExportError};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, warn};

/// Export formats offered by the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Png,
    Csv,
    Json,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Png => "png",
            ExportKind::Csv => "csv",
            ExportKind::Json => "json",
        }
    }

    pub fn filter_name(self) -> &'static str {
        match self {
            ExportKind::Png => "PNG Image",
            ExportKind::Csv => "CSV Files",
            ExportKind::Json => "JSON Files",
        }
    }
}

/// Main application window.
pub struct DashboardApp {
    table: Arc<GdpTable>,
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    records: Vec<LongRecord>,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        table: Arc<GdpTable>,
        config: DashboardConfig,
    ) -> Self {
        let mut control_panel =
            ControlPanel::new(table.countries(), &table.years(), config.year_mark_step);
        control_panel.select(&config.initial_countries);

        let mut app = Self {
            table,
            config,
            control_panel,
            chart_viewer: ChartViewer::new(),
            records: Vec::new(),
        };
        app.refresh();
        app
    }

    /// Re-run the query for the current selection
    fn refresh(&mut self) {
        let countries = self.control_panel.selected_countries();
        let range = self.control_panel.year_range();

        match self.table.query(&countries, range) {
            Ok(records) => {
                self.chart_viewer.set_records(&records);
                let status = if records.is_empty() {
                    "Ready".to_string()
                } else {
                    format!(
                        "{} countries, {} points",
                        self.chart_viewer.series.len(),
                        records.len()
                    )
                };
                self.control_panel.set_status(&status);
                self.records = records;
            }
            Err(e) => {
                warn!(error = %e, "query failed");
                self.chart_viewer.clear();
                self.records.clear();
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }

        self.control_panel.export_enabled = !self.records.is_empty();
    }

    /// Ask for a destination and write the current result
    fn handle_export(&mut self, kind: ExportKind) {
        if self.records.is_empty() {
            self.control_panel.set_status("No data to export");
            return;
        }

        let output_path = match rfd::FileDialog::new()
            .add_filter(kind.filter_name(), &[kind.extension()])
            .set_file_name(format!("gdp_per_capita.{}", kind.extension()))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match self.write_export(kind, &output_path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if self.config.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        warn!(error = %e, path = %output_path.display(), "could not open export");
                    }
                }
            }
            Err(e) => {
                error!(error = %e, path = %output_path.display(), "export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn write_export(&self, kind: ExportKind, path: &Path) -> Result<(), ExportError> {
        match kind {
            ExportKind::Png => {
                let [width, height] = self.config.export_size;
                StaticChartRenderer::write_png(path, &self.chart_viewer.series, (width, height))
            }
            ExportKind::Csv => write_records_csv(path, &self.records),
            ExportKind::Json => write_records_json(path, &self.records),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::SelectionChanged => self.refresh(),
                        ControlPanelAction::ExportPng => self.handle_export(ExportKind::Png),
                        ControlPanelAction::ExportCsv => self.handle_export(ExportKind::Csv),
                        ControlPanelAction::ExportJson => self.handle_export(ExportKind::Json),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
