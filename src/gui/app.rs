//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::config::Config;
use crate::data::{AccidentRecord, DataLoadError, Dataset, FilterState};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::view::resolve;
use egui::SidePanel;
use std::sync::Arc;

/// Main application window.
pub struct DashboardApp {
    dataset: Option<Arc<Dataset>>,
    filtered: Vec<AccidentRecord>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(loaded: Result<Arc<Dataset>, DataLoadError>, config: &Config) -> Self {
        match loaded {
            Ok(dataset) => {
                let filters = config.filter_state(&dataset.records);
                let mut app = Self {
                    dataset: Some(dataset),
                    filtered: Vec::new(),
                    control_panel: ControlPanel::new(config.section, filters),
                    chart_viewer: ChartViewer::new(),
                };
                app.refresh();
                app
            }
            Err(e) => {
                let mut chart_viewer = ChartViewer::new();
                chart_viewer.set_error(e.to_string());
                let mut control_panel = ControlPanel::new(config.section, FilterState::default());
                control_panel.set_status(&format!("Error: {e}"));
                Self {
                    dataset: None,
                    filtered: Vec::new(),
                    control_panel,
                    chart_viewer,
                }
            }
        }
    }

    /// Re-filter the primary records and re-resolve the active section.
    fn refresh(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };

        self.filtered = self.control_panel.filters.apply(&dataset.records);
        let section = self.control_panel.section;
        let view = resolve(section, &self.filtered, dataset);
        log::debug!(
            "Resolved \"{}\" with {} filtered rows",
            section,
            self.filtered.len()
        );

        self.control_panel.set_status(&format!(
            "{} of {} records match the filters",
            self.filtered.len(),
            dataset.records.len()
        ));
        self.chart_viewer.set_view(view);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SectionChanged | ControlPanelAction::FiltersChanged => {
                            self.refresh()
                        }
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
