//! Control Panel Widget
//! Left side panel with the section selector and the filter lists.

use crate::charts::to_color32;
use crate::data::{Dimension, FilterState};
use crate::view::{palette, Section};
use egui::{Color32, ComboBox, RichText, ScrollArea};

const LIST_HEIGHT: f32 = 140.0;

/// Left side control panel with section and filter controls.
pub struct ControlPanel {
    pub section: Section,
    pub filters: FilterState,
    pub status: String,
}

impl ControlPanel {
    pub fn new(section: Section, filters: FilterState) -> Self {
        Self {
            section,
            filters,
            status: "Ready".to_string(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚗 Road Accident Dashboard")
                    .size(20.0)
                    .color(to_color32(palette::PRIMARY)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Section =====
        ui.label(RichText::new("Select Analysis Section").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("section")
            .width(ui.available_width() - 10.0)
            .selected_text(self.section.label())
            .show_ui(ui, |ui| {
                for section in Section::ALL {
                    if ui
                        .selectable_label(self.section == section, section.label())
                        .clicked()
                        && self.section != section
                    {
                        self.section = section;
                        action = ControlPanelAction::SectionChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters =====
        ui.label(RichText::new("Filters").size(14.0).strong());
        ui.add_space(5.0);

        if self.filter_list(ui, Dimension::Year) {
            action = ControlPanelAction::FiltersChanged;
        }
        if self.filter_list(ui, Dimension::Cause) {
            action = ControlPanelAction::FiltersChanged;
        }
        if self.filter_list(ui, Dimension::Region) {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            if ui.button("Reset filters").clicked() {
                self.filters.reset();
                action = ControlPanelAction::FiltersChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Checkbox list for one dimension. Returns true when the selection changed.
    fn filter_list(&mut self, ui: &mut egui::Ui, dimension: Dimension) -> bool {
        let title = match dimension {
            Dimension::Year => "Select Years",
            Dimension::Cause => "Select Accident Causes",
            Dimension::Region => "Select Regions",
        };
        let mut changed = false;

        ui.collapsing(title, |ui| {
            ui.horizontal(|ui| {
                if ui.small_button("All").clicked() {
                    self.filters.select_all(dimension);
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    self.filters.clear(dimension);
                    changed = true;
                }
            });

            ScrollArea::vertical()
                .id_salt(title)
                .max_height(LIST_HEIGHT)
                .show(ui, |ui| match dimension {
                    Dimension::Year => {
                        for year in self.filters.options().years.clone() {
                            let mut checked = self.filters.selection().years.contains(&year);
                            if ui.checkbox(&mut checked, year.to_string()).changed() {
                                self.filters.toggle_year(year);
                                changed = true;
                            }
                        }
                    }
                    Dimension::Cause => {
                        for cause in self.filters.options().causes.clone() {
                            let mut checked = self.filters.selection().causes.contains(&cause);
                            if ui.checkbox(&mut checked, cause.as_str()).changed() {
                                self.filters.toggle_cause(&cause);
                                changed = true;
                            }
                        }
                    }
                    Dimension::Region => {
                        for region in self.filters.options().regions.clone() {
                            let mut checked = self.filters.selection().regions.contains(&region);
                            if ui.checkbox(&mut checked, region.as_str()).changed() {
                                self.filters.toggle_region(&region);
                                changed = true;
                            }
                        }
                    }
                });
        });

        changed
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SectionChanged,
    FiltersChanged,
}
