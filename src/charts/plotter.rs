//! Chart Plotter Module
//! Draws resolved chart specs using egui_plot.

use crate::view::palette::{self, Rgb};
use crate::view::{ChartKind, ChartSpec};
use egui::{Color32, RichText};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, PlotUi, Points, Polygon,
    Text,
};

const CHART_HEIGHT: f32 = 340.0;
const BAR_WIDTH: f64 = 0.6;

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Bottom-of-segment offsets for a stacked bar chart: `offsets[s][c]` is the
/// sum of series `0..s` at category `c`.
pub fn stack_offsets(spec: &ChartSpec) -> Vec<Vec<f64>> {
    let mut running = vec![0.0; spec.categories.len()];
    spec.series
        .iter()
        .map(|series| {
            let base = running.clone();
            for (acc, &v) in running.iter_mut().zip(&series.values) {
                *acc += v as f64;
            }
            base
        })
        .collect()
}

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a chart with its title and legend caption.
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, id: &str) {
        ui.label(
            RichText::new(&spec.title)
                .size(16.0)
                .strong()
                .color(to_color32(palette::TEXT)),
        );
        if !spec.legend_title.is_empty() {
            ui.label(RichText::new(&spec.legend_title).size(11.0).color(Color32::GRAY));
        }

        match spec.kind {
            ChartKind::StackedBar | ChartKind::Bar => Self::draw_bar_chart(ui, spec, id),
            ChartKind::Line | ChartKind::SplineLine => Self::draw_line_chart(ui, spec, id),
            ChartKind::Heatmap => Self::draw_heatmap(ui, spec, id),
        }
    }

    /// Show a plot with the spec's categories labelled along the x axis.
    fn show_category_plot(
        ui: &mut egui::Ui,
        spec: &ChartSpec,
        id: &str,
        add_contents: impl FnOnce(&mut PlotUi),
    ) {
        let labels = spec.categories.clone();
        let count = labels.len();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .include_y(0.0)
            .x_grid_spacer(move |_input| {
                (0..count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx - mark.value).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, add_contents);
    }

    fn draw_bar_chart(ui: &mut egui::Ui, spec: &ChartSpec, id: &str) {
        let offsets = stack_offsets(spec);
        let stacked = spec.kind == ChartKind::StackedBar;

        Self::show_category_plot(ui, spec, id, |plot_ui| {
            for (series, base) in spec.series.iter().zip(&offsets) {
                let bars: Vec<Bar> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        let bar = Bar::new(i as f64, v as f64)
                            .width(BAR_WIDTH)
                            .name(&series.name);
                        if stacked {
                            bar.base_offset(base[i])
                        } else {
                            bar
                        }
                    })
                    .collect();

                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(&series.name)
                        .color(to_color32(series.color)),
                );
            }
        });
    }

    fn draw_line_chart(ui: &mut egui::Ui, spec: &ChartSpec, id: &str) {
        let width = if spec.kind == ChartKind::SplineLine { 2.5 } else { 1.5 };

        Self::show_category_plot(ui, spec, id, |plot_ui| {
            for series in &spec.series {
                let points: Vec<[f64; 2]> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [i as f64, v as f64])
                    .collect();
                let color = to_color32(series.color);

                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(width)
                        .name(&series.name),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(color)
                        .name(&series.name),
                );
            }
        });
    }

    /// Rows are the categories (top to bottom), columns are the series.
    fn draw_heatmap(ui: &mut egui::Ui, spec: &ChartSpec, id: &str) {
        let columns: Vec<String> = spec.series.iter().map(|s| s.name.clone()).collect();
        let rows = spec.categories.clone();
        let n_cols = columns.len();
        let n_rows = rows.len();
        let max = spec.max_value().max(1) as f64;

        Plot::new(id.to_string())
            .height(CHART_HEIGHT.max(40.0 * n_rows as f32))
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .show_grid(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .x_grid_spacer(move |_input| {
                (0..n_cols)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_grid_spacer(move |_input| {
                (0..n_rows)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| cell_label(&columns, mark.value))
            .y_axis_formatter(move |mark, _range| {
                // Row 0 is drawn at the top.
                let flipped = n_rows as f64 - 1.0 - mark.value;
                cell_label(&rows, flipped)
            })
            .show(ui, |plot_ui| {
                for (col, series) in spec.series.iter().enumerate() {
                    for (row, &value) in series.values.iter().enumerate() {
                        let y = (n_rows - 1 - row) as f64;
                        Self::draw_cell(plot_ui, col as f64, y, value, value as f64 / max);
                    }
                }
            });
    }

    fn draw_cell(plot_ui: &mut PlotUi, x: f64, y: f64, value: u64, intensity: f64) {
        let fill = to_color32(palette::heat_color(intensity));
        let corners = vec![
            [x - 0.5, y - 0.5],
            [x + 0.5, y - 0.5],
            [x + 0.5, y + 0.5],
            [x - 0.5, y + 0.5],
        ];
        plot_ui.polygon(
            Polygon::new(PlotPoints::new(corners))
                .fill_color(fill)
                .stroke(egui::Stroke::new(1.0, Color32::WHITE)),
        );

        let text_color = if intensity > 0.6 {
            Color32::WHITE
        } else {
            Color32::BLACK
        };
        plot_ui.text(
            Text::new(
                PlotPoint::new(x, y),
                RichText::new(value.to_string()).size(13.0),
            )
            .color(text_color),
        );
    }
}

fn cell_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if idx >= 0.0 && (idx - value).abs() < 1e-6 {
        labels.get(idx as usize).cloned().unwrap_or_default()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::SeriesData;

    fn spec(series: Vec<Vec<u64>>) -> ChartSpec {
        ChartSpec {
            title: "t".into(),
            kind: ChartKind::StackedBar,
            x_label: String::new(),
            y_label: String::new(),
            legend_title: String::new(),
            categories: vec!["a".into(), "b".into()],
            series: series
                .into_iter()
                .enumerate()
                .map(|(i, values)| SeriesData {
                    name: format!("s{i}"),
                    values,
                    color: palette::SERIES[i],
                })
                .collect(),
        }
    }

    #[test]
    fn offsets_accumulate_series() {
        let offsets = stack_offsets(&spec(vec![vec![1, 2], vec![3, 4], vec![5, 6]]));
        assert_eq!(
            offsets,
            vec![vec![0.0, 0.0], vec![1.0, 2.0], vec![4.0, 6.0]]
        );
    }

    #[test]
    fn category_labels_only_on_whole_marks() {
        let labels = vec!["Minor".to_string(), "Severe".to_string()];
        assert_eq!(cell_label(&labels, 1.0), "Severe");
        assert_eq!(cell_label(&labels, 0.5), "");
        assert_eq!(cell_label(&labels, 4.0), "");
        assert_eq!(cell_label(&labels, -1.0), "");
    }

    #[test]
    fn color_conversion() {
        assert_eq!(
            to_color32(palette::PRIMARY),
            Color32::from_rgb(0x1E, 0x3A, 0x8A)
        );
    }
}
