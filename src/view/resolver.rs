//! View Resolver Module
//! Turns a section choice plus the filtered records into the charts to draw.
//!
//! Every section but Weather Conditions plots one fixed aggregate table and
//! ignores the filter. Weather Conditions draws two charts: live counts from
//! the filtered records, and the static severity-by-weather table.

use crate::data::{AccidentRecord, AggregateTable, Dataset};
use crate::view::palette::{self, Rgb};
use crate::view::section::{Section, UnknownSectionError};
use serde::Serialize;

/// Weather categories in plotting order.
pub const WEATHER_ORDER: [&str; 5] = ["Windy", "Rainy", "Clear", "Snowy", "Foggy"];

/// Cause rows plotted when a table is transposed (days or times on the x axis).
const DAILY_CAUSES: [&str; 5] = [
    "Weather",
    "Drunk Driving",
    "Mechanical Failure",
    "Speeding",
    "Distracted Driving",
];
const TIME_CAUSES: [&str; 5] = [
    "Mechanical Failure",
    "Drunk Driving",
    "Speeding",
    "Distracted Driving",
    "Weather",
];

const CAUSE_SERIES: [&str; 5] = [
    "Weather",
    "Drunk Driving",
    "Mechanical Failure",
    "Speeding",
    "Distracted Driving",
];
const SEVERITY_SERIES: [&str; 3] = ["Minor", "Moderate", "Severe"];

const Y_ACCIDENTS: &str = "Number of Accidents";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    StackedBar,
    Bar,
    Line,
    /// Smoothed line with markers.
    SplineLine,
    Heatmap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesData {
    pub name: String,
    pub values: Vec<u64>,
    pub color: Rgb,
}

/// One chart, ready to paint. `series[i].values[j]` belongs to `categories[j]`.
/// For heatmaps the categories are rows and each series is a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub categories: Vec<String>,
    pub series: Vec<SeriesData>,
}

impl ChartSpec {
    /// True when there is nothing but zeros to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.values.iter().all(|&v| v == 0))
    }

    pub fn max_value(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Resolved description of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub header: &'static str,
    /// Value columns of the section's aggregate table.
    pub columns: Vec<String>,
    pub charts: Vec<ChartSpec>,
    pub narrative: &'static str,
    /// Rows of the filtered view that fed the charts, when the section uses them.
    pub filtered_rows: Option<usize>,
}

/// Occurrences of each weather category, in `WEATHER_ORDER`.
/// Blank and unrecognised values are ignored.
pub fn weather_counts(records: &[AccidentRecord]) -> [u64; 5] {
    let mut counts = [0u64; 5];
    for weather in records.iter().filter_map(|r| r.weather_condition.as_deref()) {
        if let Some(idx) = WEATHER_ORDER.iter().position(|w| *w == weather) {
            counts[idx] += 1;
        }
    }
    counts
}

/// Resolve a section by its sidebar label.
pub fn resolve_named(
    name: &str,
    filtered: &[AccidentRecord],
    dataset: &Dataset,
) -> Result<SectionView, UnknownSectionError> {
    let section: Section = name.parse()?;
    Ok(resolve(section, filtered, dataset))
}

pub fn resolve(section: Section, filtered: &[AccidentRecord], dataset: &Dataset) -> SectionView {
    let tables = &dataset.tables;

    let charts = match section {
        Section::YearlyTrends => {
            let t = &tables.yearly;
            vec![
                stacked(t, "Accident Causes by Year", "Year", "Accident Cause", &CAUSE_SERIES),
                ChartSpec {
                    title: "Total Road Accidents Per Year".to_string(),
                    kind: ChartKind::SplineLine,
                    x_label: "Year".to_string(),
                    y_label: Y_ACCIDENTS.to_string(),
                    legend_title: String::new(),
                    categories: t.key_labels(),
                    series: vec![series_from_column(t, "Total", palette::ACCENT)],
                },
            ]
        }
        Section::MonthlyTrends => {
            let t = &tables.monthly;
            let names = t.kind.value_columns();
            vec![
                stacked(t, "Accident Causes by Month", "Month", "Accident Cause", names),
                ChartSpec {
                    kind: ChartKind::Line,
                    ..stacked(
                        t,
                        "Monthly Trends of Road Accidents by Cause",
                        "Month",
                        "Accident Cause",
                        names,
                    )
                },
            ]
        }
        Section::DailyTrends => {
            let t = &tables.daily;
            vec![
                stacked(
                    t,
                    "Accident Causes by Day of Week",
                    "Accident Cause",
                    "Day of Week",
                    t.kind.value_columns(),
                ),
                transposed(
                    t,
                    "Accident Causes by Day of the Week",
                    "Day of Week",
                    &DAILY_CAUSES,
                ),
            ]
        }
        Section::TimeOfDay => {
            let t = &tables.time_of_day;
            vec![
                stacked(
                    t,
                    "Accident Causes by Time of Day",
                    "Accident Cause",
                    "Time of Day",
                    t.kind.value_columns(),
                ),
                transposed(
                    t,
                    "Accident Causes by Time of Day",
                    "Time of Day",
                    &TIME_CAUSES,
                ),
            ]
        }
        Section::RoadTypeAndLocation => {
            let t = &tables.road_type;
            vec![ChartSpec {
                kind: ChartKind::Heatmap,
                x_label: "Accident Severity".to_string(),
                y_label: "Urban/Rural & Road Type".to_string(),
                ..stacked(
                    t,
                    "Accident Severity by Road Type and Location",
                    "",
                    "Accident Severity",
                    &SEVERITY_SERIES,
                )
            }]
        }
        Section::WeatherConditions => {
            let t = &tables.weather_severity;
            vec![
                ChartSpec {
                    title: "Accident Frequency by Weather Condition".to_string(),
                    kind: ChartKind::Bar,
                    x_label: "Weather Condition".to_string(),
                    y_label: Y_ACCIDENTS.to_string(),
                    legend_title: String::new(),
                    categories: WEATHER_ORDER.iter().map(|w| w.to_string()).collect(),
                    series: vec![SeriesData {
                        name: "Accidents".to_string(),
                        values: weather_counts(filtered).to_vec(),
                        color: palette::PRIMARY,
                    }],
                },
                stacked(
                    t,
                    "Accident Severity Distribution by Weather Condition",
                    "Weather Conditions",
                    "Accident Severity",
                    &SEVERITY_SERIES,
                ),
            ]
        }
        Section::OutcomesByCause => {
            let t = &tables.cause_severity;
            vec![
                stacked(
                    t,
                    "Accident Severity by Accident Cause",
                    "Accident Cause",
                    "Accident Severity",
                    &SEVERITY_SERIES,
                ),
                ChartSpec {
                    kind: ChartKind::Line,
                    ..stacked(
                        t,
                        "Accident Severity by Accident Cause",
                        "Accident Cause",
                        "Severity Level",
                        &SEVERITY_SERIES,
                    )
                },
            ]
        }
    };

    SectionView {
        section,
        header: section.header(),
        columns: section
            .table_kind()
            .value_columns()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        charts,
        narrative: section.narrative(),
        filtered_rows: section.uses_filtered_records().then_some(filtered.len()),
    }
}

/// Stacked bar over the table's rows, one series per named column.
fn stacked(
    table: &AggregateTable,
    title: &str,
    x_label: &str,
    legend_title: &str,
    names: &[&str],
) -> ChartSpec {
    let series = names
        .iter()
        .zip(palette::series_colors(names.len()))
        .map(|(name, &color)| series_from_column(table, name, color))
        .collect();

    ChartSpec {
        title: title.to_string(),
        kind: ChartKind::StackedBar,
        x_label: x_label.to_string(),
        y_label: Y_ACCIDENTS.to_string(),
        legend_title: legend_title.to_string(),
        categories: table.key_labels(),
        series,
    }
}

/// Line chart with the table's value columns on the x axis and one series per cause row.
fn transposed(table: &AggregateTable, title: &str, x_label: &str, causes: &[&str]) -> ChartSpec {
    let series = causes
        .iter()
        .zip(palette::series_colors(causes.len()))
        .map(|(cause, &color)| {
            let values = match table.find_row(cause) {
                Some(row) => table.row_counts(row),
                None => {
                    log::warn!("{} has no row for \"{}\"; plotting zeros", table.kind, cause);
                    vec![0; table.columns.len()]
                }
            };
            SeriesData {
                name: cause.to_string(),
                values,
                color,
            }
        })
        .collect();

    ChartSpec {
        title: title.to_string(),
        kind: ChartKind::Line,
        x_label: x_label.to_string(),
        y_label: Y_ACCIDENTS.to_string(),
        legend_title: "Accident Cause".to_string(),
        categories: table.columns.iter().map(|c| c.name.clone()).collect(),
        series,
    }
}

fn series_from_column(table: &AggregateTable, name: &str, color: Rgb) -> SeriesData {
    let values = table
        .column(name)
        .map(|c| c.counts.clone())
        .unwrap_or_else(|| vec![0; table.row_count()]);

    SeriesData {
        name: name.to_string(),
        values,
        color,
    }
}
