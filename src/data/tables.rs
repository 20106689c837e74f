//! Typed Tables Module
//! In-memory shapes of the eight dashboard tables.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Primary table column names.
pub const YEAR_COL: &str = "Year";
pub const CAUSE_COL: &str = "Accident Cause";
pub const REGION_COL: &str = "Region";
pub const WEATHER_COL: &str = "Weather Conditions";

/// The eight tables the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TableKind {
    Primary,
    Yearly,
    Monthly,
    Daily,
    TimeOfDay,
    RoadType,
    WeatherSeverity,
    CauseSeverity,
}

impl TableKind {
    pub const ALL: [TableKind; 8] = [
        TableKind::Primary,
        TableKind::Yearly,
        TableKind::Monthly,
        TableKind::Daily,
        TableKind::TimeOfDay,
        TableKind::RoadType,
        TableKind::WeatherSeverity,
        TableKind::CauseSeverity,
    ];

    /// File name inside the data directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            TableKind::Primary => "sample_road_accident_data.csv",
            TableKind::Yearly => "yearly_accidents.csv",
            TableKind::Monthly => "monthly_accidents.csv",
            TableKind::Daily => "daily_accidents.csv",
            TableKind::TimeOfDay => "time_accidents.csv",
            TableKind::RoadType => "road_type_severity.csv",
            TableKind::WeatherSeverity => "weather_severity.csv",
            TableKind::CauseSeverity => "severity_by_cause.csv",
        }
    }

    pub const fn key_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Primary => &[YEAR_COL, CAUSE_COL, REGION_COL, WEATHER_COL],
            TableKind::Yearly => &["Year"],
            TableKind::Monthly => &["Month"],
            TableKind::Daily | TableKind::TimeOfDay | TableKind::CauseSeverity => {
                &["Accident Cause"]
            }
            TableKind::RoadType => &["Urban/Rural", "Road Type"],
            TableKind::WeatherSeverity => &["Weather Conditions"],
        }
    }

    /// Count columns, in the order they are plotted.
    pub const fn value_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Primary => &[],
            TableKind::Yearly => &[
                "Weather",
                "Drunk Driving",
                "Mechanical Failure",
                "Speeding",
                "Distracted Driving",
                "Total",
            ],
            TableKind::Monthly => &[
                "Distracted Driving",
                "Drunk Driving",
                "Mechanical Failure",
                "Speeding",
                "Weather",
            ],
            TableKind::Daily => &[
                "Friday",
                "Monday",
                "Saturday",
                "Sunday",
                "Thursday",
                "Tuesday",
                "Wednesday",
            ],
            TableKind::TimeOfDay => &["Afternoon", "Evening", "Morning", "Night"],
            TableKind::RoadType | TableKind::WeatherSeverity | TableKind::CauseSeverity => {
                &["Minor", "Moderate", "Severe"]
            }
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// One row of the primary accident table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccidentRecord {
    pub year: i64,
    pub accident_cause: String,
    pub region: String,
    /// `None` when the cell was blank.
    pub weather_condition: Option<String>,
}

/// A named column of non-negative counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountColumn {
    pub name: String,
    pub counts: Vec<u64>,
}

/// A precomputed count table: one key tuple per row, one count column per
/// value column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateTable {
    pub kind: TableKind,
    pub key_columns: Vec<String>,
    pub keys: Vec<Vec<String>>,
    pub columns: Vec<CountColumn>,
}

impl AggregateTable {
    pub fn row_count(&self) -> usize {
        self.keys.len()
    }

    /// Key of a row, multi-part keys joined with " - ".
    pub fn key_label(&self, row: usize) -> String {
        self.keys
            .get(row)
            .map(|parts| parts.join(" - "))
            .unwrap_or_default()
    }

    pub fn key_labels(&self) -> Vec<String> {
        (0..self.row_count()).map(|row| self.key_label(row)).collect()
    }

    pub fn column(&self, name: &str) -> Option<&CountColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Row index whose first key part equals `key`.
    pub fn find_row(&self, key: &str) -> Option<usize> {
        self.keys
            .iter()
            .position(|parts| parts.first().map(String::as_str) == Some(key))
    }

    /// Counts of one row across all value columns.
    pub fn row_counts(&self, row: usize) -> Vec<u64> {
        self.columns
            .iter()
            .map(|c| c.counts.get(row).copied().unwrap_or(0))
            .collect()
    }
}

/// The seven aggregate tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTables {
    pub yearly: AggregateTable,
    pub monthly: AggregateTable,
    pub daily: AggregateTable,
    pub time_of_day: AggregateTable,
    pub road_type: AggregateTable,
    pub weather_severity: AggregateTable,
    pub cause_severity: AggregateTable,
}

/// Immutable snapshot of everything loaded from the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub source_dir: PathBuf,
    pub records: Vec<AccidentRecord>,
    pub tables: AggregateTables,
}

impl Dataset {
    /// Aggregate table for `kind`; `None` for the primary table.
    pub fn table(&self, kind: TableKind) -> Option<&AggregateTable> {
        let t = &self.tables;
        match kind {
            TableKind::Primary => None,
            TableKind::Yearly => Some(&t.yearly),
            TableKind::Monthly => Some(&t.monthly),
            TableKind::Daily => Some(&t.daily),
            TableKind::TimeOfDay => Some(&t.time_of_day),
            TableKind::RoadType => Some(&t.road_type),
            TableKind::WeatherSeverity => Some(&t.weather_severity),
            TableKind::CauseSeverity => Some(&t.cause_severity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road_table() -> AggregateTable {
        AggregateTable {
            kind: TableKind::RoadType,
            key_columns: vec!["Urban/Rural".into(), "Road Type".into()],
            keys: vec![
                vec!["Rural".into(), "Highway".into()],
                vec!["Urban".into(), "Main Road".into()],
            ],
            columns: vec![
                CountColumn { name: "Minor".into(), counts: vec![3, 4] },
                CountColumn { name: "Moderate".into(), counts: vec![5, 6] },
                CountColumn { name: "Severe".into(), counts: vec![7, 8] },
            ],
        }
    }

    #[test]
    fn key_label_joins_parts() {
        let table = road_table();
        assert_eq!(table.key_labels(), vec!["Rural - Highway", "Urban - Main Road"]);
        assert_eq!(table.key_label(9), "");
    }

    #[test]
    fn row_lookup() {
        let table = road_table();
        assert_eq!(table.find_row("Urban"), Some(1));
        assert_eq!(table.find_row("Suburban"), None);
        assert_eq!(table.row_counts(1), vec![4, 6, 8]);
        assert_eq!(table.column("Severe").map(|c| c.counts.clone()), Some(vec![7, 8]));
    }

    #[test]
    fn every_kind_has_distinct_file() {
        let mut names: Vec<_> = TableKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TableKind::ALL.len());
    }
}
