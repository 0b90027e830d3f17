//! Control Panel Widget
//! Left side panel with the country selector, year range selector and exports.

use crate::data::YearRange;
use egui::{Color32, RichText, ScrollArea};

/// Every `step`-th year of the domain, starting with the first.
pub fn year_marks(years: &[i32], step: usize) -> Vec<i32> {
    years.iter().step_by(step.max(1)).copied().collect()
}

/// Left side control panel with country and year range selection.
pub struct ControlPanel {
    pub countries: Vec<String>,
    pub selected: Vec<bool>,
    pub search: String,
    /// Full domain, `None` when the table has no year columns
    pub domain: Option<YearRange>,
    pub full_range: bool,
    pub range_low: i32,
    pub range_high: i32,
    pub marks: Vec<i32>,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(countries: Vec<String>, years: &[i32], mark_step: usize) -> Self {
        let domain = match (years.first(), years.last()) {
            (Some(&low), Some(&high)) => Some(YearRange::new(low, high)),
            _ => None,
        };
        let (range_low, range_high) = domain.map(|d| (d.low, d.high)).unwrap_or((0, 0));

        Self {
            selected: vec![false; countries.len()],
            countries,
            search: String::new(),
            domain,
            full_range: true,
            range_low,
            range_high,
            marks: year_marks(years, mark_step),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Tick the given countries; names not offered by the panel are ignored.
    pub fn select(&mut self, names: &[String]) {
        for (country, selected) in self.countries.iter().zip(self.selected.iter_mut()) {
            if names.contains(country) {
                *selected = true;
            }
        }
    }

    /// Selected countries in list order
    pub fn selected_countries(&self) -> Vec<String> {
        self.countries
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| selected)
            .map(|(country, _)| country.clone())
            .collect()
    }

    /// Requested range, `None` while the full range is selected.
    pub fn year_range(&self) -> Option<YearRange> {
        if self.full_range {
            None
        } else {
            Some(YearRange::new(self.range_low, self.range_high))
        }
    }

    fn matches_search(&self, country: &str) -> bool {
        self.search.is_empty() || country.to_lowercase().contains(&self.search.to_lowercase())
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 GDP Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("UI Components for Gapminder Dataset")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(6.0);
        ui.label(
            RichText::new(
                "Explore GDP per capita: select one or more countries and a range of years \
                 to see the trend as a line graph.",
            )
            .size(11.0),
        );
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Country Section =====
        let selected_count = self.selected.iter().filter(|&&s| s).count();
        ui.label(
            RichText::new(format!("🌍 Countries ({} selected)", selected_count))
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Select One or More Countries")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(5.0);

        let visible: Vec<usize> = (0..self.countries.len())
            .filter(|&i| self.matches_search(&self.countries[i]))
            .collect();

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("country_list")
                    .max_height(260.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for &i in &visible {
                            if ui
                                .checkbox(&mut self.selected[i], &self.countries[i])
                                .changed()
                            {
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select Shown").clicked() {
                for &i in &visible {
                    self.selected[i] = true;
                }
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear").clicked() {
                self.selected.iter_mut().for_each(|v| *v = false);
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Range Section =====
        ui.label(RichText::new("📅 Years").size(14.0).strong());
        ui.add_space(5.0);

        match self.domain {
            Some(domain) => {
                if ui.checkbox(&mut self.full_range, "Full range").changed() {
                    action = ControlPanelAction::SelectionChanged;
                }

                ui.add_enabled_ui(!self.full_range, |ui| {
                    let from = ui.add(
                        egui::Slider::new(&mut self.range_low, domain.low..=domain.high)
                            .text("From"),
                    );
                    let to = ui.add(
                        egui::Slider::new(&mut self.range_high, domain.low..=domain.high)
                            .text("To"),
                    );
                    if from.changed() || to.changed() {
                        action = ControlPanelAction::SelectionChanged;
                    }
                });

                if !self.marks.is_empty() {
                    let marks: Vec<String> = self.marks.iter().map(|y| y.to_string()).collect();
                    ui.label(RichText::new(marks.join(" · ")).size(10.0).color(Color32::GRAY));
                }
            }
            None => {
                ui.label(RichText::new("No year columns").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.add_enabled_ui(self.export_enabled, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🖼 PNG").clicked() {
                    action = ControlPanelAction::ExportPng;
                }
                if ui.button("📄 CSV").clicked() {
                    action = ControlPanelAction::ExportCsv;
                }
                if ui.button("🧾 JSON").clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    ExportPng,
    ExportCsv,
    ExportJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        let countries = vec!["Chad".to_string(), "Peru".to_string(), "Norway".to_string()];
        let years: Vec<i32> = (1800..=2100).collect();
        ControlPanel::new(countries, &years, 50)
    }

    #[test]
    fn marks_every_fiftieth_year() {
        let years: Vec<i32> = (1800..=2100).collect();
        assert_eq!(
            year_marks(&years, 50),
            vec![1800, 1850, 1900, 1950, 2000, 2050, 2100]
        );
        assert_eq!(year_marks(&[2000, 2001], 0), vec![2000, 2001]);
    }

    #[test]
    fn starts_empty_with_full_range() {
        let panel = panel();
        assert!(panel.selected_countries().is_empty());
        assert_eq!(panel.year_range(), None);
        assert_eq!(panel.domain, Some(YearRange::new(1800, 2100)));
    }

    #[test]
    fn select_ignores_unknown_names() {
        let mut panel = panel();
        panel.select(&["Norway".to_string(), "Atlantis".to_string(), "Chad".to_string()]);
        assert_eq!(panel.selected_countries(), vec!["Chad", "Norway"]);
    }

    #[test]
    fn custom_range_is_reported_as_is() {
        let mut panel = panel();
        panel.full_range = false;
        panel.range_low = 1990;
        panel.range_high = 1950;
        assert_eq!(panel.year_range(), Some(YearRange::new(1990, 1950)));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut panel = panel();
        panel.search = "per".to_string();
        assert!(panel.matches_search("Peru"));
        assert!(!panel.matches_search("Chad"));
    }
}
