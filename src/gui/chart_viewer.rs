//! Chart Viewer Widget
//! Central scrollable panel showing the resolved section.

use crate::charts::{to_color32, ChartPlotter};
use crate::view::palette;
use crate::view::{ChartKind, SectionView};
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;

/// Scrollable display of one section: header, charts, narrative, footer.
#[derive(Default)]
pub struct ChartViewer {
    pub view: Option<SectionView>,
    pub error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view(&mut self, view: SectionView) {
        self.view = Some(view);
    }

    /// Show a fatal error instead of charts.
    pub fn set_error(&mut self, error: String) {
        self.view = None;
        self.error = Some(error);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!("Could not load data\n\n{error}"))
                        .size(16.0)
                        .color(to_color32(palette::RED)),
                );
            });
            return;
        }

        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(
                    RichText::new("Road Accident Analysis Dashboard")
                        .size(26.0)
                        .strong(),
                );
                ui.add_space(5.0);
                ui.label(RichText::new(view.header).size(20.0).strong());
                ui.add_space(CHART_SPACING);

                for (idx, chart) in view.charts.iter().enumerate() {
                    let empty_filtered = chart.kind == ChartKind::Bar
                        && view.filtered_rows == Some(0);

                    egui::Frame::none()
                        .rounding(8.0)
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            if empty_filtered {
                                ui.label(RichText::new(&chart.title).size(16.0).strong());
                                ui.label(
                                    RichText::new("No data for the current filters")
                                        .size(14.0)
                                        .color(Color32::GRAY),
                                );
                            } else {
                                let id = format!("{}_{idx}", view.section.label());
                                ChartPlotter::draw_chart(ui, chart, &id);
                            }
                        });
                    ui.add_space(CHART_SPACING);
                }

                Self::draw_narrative(ui, view.narrative);

                ui.add_space(20.0);
                ui.separator();
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Road accident statistics dashboard")
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                });
            });
    }

    /// Headings ("### ") and bullets ("- ") of the narrative text.
    fn draw_narrative(ui: &mut egui::Ui, narrative: &str) {
        for line in narrative.lines().map(str::trim) {
            if let Some(heading) = line.strip_prefix("### ") {
                ui.add_space(8.0);
                ui.label(RichText::new(heading).size(17.0).strong());
            } else if let Some(bullet) = line.strip_prefix("- ") {
                ui.label(RichText::new(format!("•  {bullet}")).size(14.0));
            } else if !line.is_empty() {
                ui.label(RichText::new(line).size(14.0));
            }
        }
    }
}
