//! CSV Data Loader Module
//! Loads the eight dashboard tables with Polars and converts them to typed tables.

use crate::data::tables::{
    AccidentRecord, AggregateTable, AggregateTables, CountColumn, Dataset, TableKind, CAUSE_COL,
    REGION_COL, WEATHER_COL, YEAR_COL,
};
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Required data file missing: {path}")]
    Missing { path: PathBuf },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{path} has no column \"{column}\"")]
    MissingColumn { path: PathBuf, column: String },
    #[error("{path}: invalid value in column \"{column}\" at row {row}")]
    InvalidValue {
        path: PathBuf,
        column: String,
        row: usize,
    },
}

/// Loads the dashboard dataset once and hands out shared snapshots.
pub struct DataLoader {
    dir: PathBuf,
    dataset: Option<Arc<Dataset>>,
}

impl DataLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            dataset: None,
        }
    }

    /// Load all tables, or return the snapshot from an earlier load.
    pub fn load(&mut self) -> Result<Arc<Dataset>, DataLoadError> {
        if let Some(dataset) = &self.dataset {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load_dataset(&self.dir)?);
        self.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the memoized snapshot and read the files again.
    pub fn reload(&mut self) -> Result<Arc<Dataset>, DataLoadError> {
        self.dataset = None;
        self.load()
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }
}

/// Read and validate all eight tables from `dir`. Nothing is returned unless
/// every table loads.
pub fn load_dataset(dir: &Path) -> Result<Dataset, DataLoadError> {
    for kind in TableKind::ALL {
        let path = dir.join(kind.file_name());
        if !path.is_file() {
            return Err(DataLoadError::Missing { path });
        }
    }

    let mut frames: HashMap<TableKind, DataFrame> = TableKind::ALL
        .par_iter()
        .map(|&kind| {
            let path = dir.join(kind.file_name());
            let df = read_frame(&path)?;
            log::debug!("Read {} ({} rows)", path.display(), df.height());
            Ok::<_, DataLoadError>((kind, df))
        })
        .collect::<Result<_, DataLoadError>>()?;

    let mut take = |kind: TableKind| -> Result<DataFrame, DataLoadError> {
        frames.remove(&kind).ok_or_else(|| DataLoadError::Missing {
            path: dir.join(kind.file_name()),
        })
    };

    let primary = take(TableKind::Primary)?;
    let records = records_from_frame(&primary, &dir.join(TableKind::Primary.file_name()))?;
    let mut aggregate = |kind: TableKind| -> Result<AggregateTable, DataLoadError> {
        let df = take(kind)?;
        aggregate_from_frame(kind, &df, &dir.join(kind.file_name()))
    };

    let tables = AggregateTables {
        yearly: aggregate(TableKind::Yearly)?,
        monthly: aggregate(TableKind::Monthly)?,
        daily: aggregate(TableKind::Daily)?,
        time_of_day: aggregate(TableKind::TimeOfDay)?,
        road_type: aggregate(TableKind::RoadType)?,
        weather_severity: aggregate(TableKind::WeatherSeverity)?,
        cause_severity: aggregate(TableKind::CauseSeverity)?,
    };

    log::info!(
        "Loaded {} accident records and {} aggregate tables from {}",
        records.len(),
        TableKind::ALL.len() - 1,
        dir.display()
    );

    Ok(Dataset {
        source_dir: dir.to_path_buf(),
        records,
        tables,
    })
}

fn read_frame(path: &Path) -> Result<DataFrame, DataLoadError> {
    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()
        .and_then(|lazy| lazy.collect())
        .map_err(|source| DataLoadError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Rows missing a year, cause or region are skipped with a warning. A blank
/// weather cell is kept as `None`.
fn records_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<AccidentRecord>, DataLoadError> {
    let years = optional_integer_column(df, path, YEAR_COL)?;
    let causes = optional_string_column(df, path, CAUSE_COL)?;
    let regions = optional_string_column(df, path, REGION_COL)?;
    let weather = optional_string_column(df, path, WEATHER_COL)?;

    let records: Vec<AccidentRecord> = years
        .into_iter()
        .zip(causes)
        .zip(regions)
        .zip(weather)
        .enumerate()
        .filter_map(|(row, (((year, cause), region), weather_condition))| {
            match (year, cause, region) {
                (Some(year), Some(accident_cause), Some(region)) => Some(AccidentRecord {
                    year,
                    accident_cause,
                    region,
                    weather_condition,
                }),
                _ => {
                    log::warn!(
                        "{}: skipping row {row} with a blank year, cause or region",
                        path.display()
                    );
                    None
                }
            }
        })
        .collect();

    Ok(records)
}

fn aggregate_from_frame(
    kind: TableKind,
    df: &DataFrame,
    path: &Path,
) -> Result<AggregateTable, DataLoadError> {
    let key_parts = kind
        .key_columns()
        .iter()
        .map(|name| string_column(df, path, name))
        .collect::<Result<Vec<_>, _>>()?;

    let keys = (0..df.height())
        .map(|row| key_parts.iter().map(|part| part[row].clone()).collect())
        .collect();

    let columns = kind
        .value_columns()
        .iter()
        .map(|name| {
            let counts = integer_column(df, path, name)?
                .into_iter()
                .enumerate()
                .map(|(row, v)| u64::try_from(v).map_err(|_| invalid(path, name, row)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, DataLoadError>(CountColumn {
                name: (*name).to_string(),
                counts,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AggregateTable {
        kind,
        key_columns: kind.key_columns().iter().map(|s| s.to_string()).collect(),
        keys,
        columns,
    })
}

fn column<'a>(df: &'a DataFrame, path: &Path, name: &str) -> Result<&'a Column, DataLoadError> {
    df.column(name).map_err(|_| DataLoadError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn read_err(path: &Path) -> impl Fn(PolarsError) -> DataLoadError + '_ {
    move |source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn invalid(path: &Path, column: &str, row: usize) -> DataLoadError {
    DataLoadError::InvalidValue {
        path: path.to_path_buf(),
        column: column.to_string(),
        row,
    }
}

/// Values of a column as trimmed strings. Null and blank cells are `None`.
fn optional_string_column(
    df: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Vec<Option<String>>, DataLoadError> {
    let strings = column(df, path, name)?
        .cast(&DataType::String)
        .map_err(read_err(path))?;
    let ca = strings.str().map_err(read_err(path))?;

    Ok(ca
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        .collect())
}

/// Non-null values of a column as trimmed strings.
fn string_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<String>, DataLoadError> {
    optional_string_column(df, path, name)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| invalid(path, name, row)))
        .collect()
}

/// Whole-number values of a column, `None` for nulls. Fractions are rejected.
fn optional_integer_column(
    df: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Vec<Option<i64>>, DataLoadError> {
    let floats = column(df, path, name)?
        .cast(&DataType::Float64)
        .map_err(read_err(path))?;
    let ca = floats.f64().map_err(read_err(path))?;

    ca.into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            None => Ok(None),
            Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(Some(v as i64)),
            Some(_) => Err(invalid(path, name, row)),
        })
        .collect()
}

/// Whole-number values of a column. Nulls, fractions and unparseable text are rejected.
fn integer_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<i64>, DataLoadError> {
    optional_integer_column(df, path, name)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| invalid(path, name, row)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn primary_frame_to_records() {
        let df = frame(vec![
            Column::new("Year".into(), vec![2020i64, 2021]),
            Column::new("Accident Cause".into(), vec!["Speeding", "Weather"]),
            Column::new("Region".into(), vec![" North ", "South"]),
            Column::new("Weather Conditions".into(), vec!["Rainy", "Clear"]),
            Column::new("Driver Age".into(), vec![33i64, 51]),
        ]);

        let records = records_from_frame(&df, Path::new("primary.csv")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2020);
        assert_eq!(records[0].region, "North");
        assert_eq!(records[1].weather_condition.as_deref(), Some("Clear"));
    }

    #[test]
    fn blank_primary_cells_do_not_abort_the_load() {
        let df = frame(vec![
            Column::new("Year".into(), vec![Some(2020i64), Some(2021), None, Some(2022)]),
            Column::new(
                "Accident Cause".into(),
                vec![Some("Speeding"), None, Some("Weather"), Some("Speeding")],
            ),
            Column::new("Region".into(), vec!["North", "South", "East", "East"]),
            Column::new(
                "Weather Conditions".into(),
                vec![Some("Rainy"), Some("Clear"), Some("Snowy"), None],
            ),
        ]);

        let records = records_from_frame(&df, Path::new("primary.csv")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2020);
        assert_eq!(records[1].year, 2022);
        assert_eq!(records[1].weather_condition, None);
    }

    #[test]
    fn null_count_is_still_rejected() {
        let df = frame(vec![
            Column::new("Weather Conditions".into(), vec!["Rainy", "Clear"]),
            Column::new("Minor".into(), vec![Some(1i64), None]),
            Column::new("Moderate".into(), vec![1i64, 2]),
            Column::new("Severe".into(), vec![1i64, 2]),
        ]);

        let err = aggregate_from_frame(TableKind::WeatherSeverity, &df, Path::new("w.csv"))
            .unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { column, row: 1, .. } if column == "Minor"
        ));
    }

    #[test]
    fn aggregate_keeps_declared_column_order() {
        let df = frame(vec![
            Column::new("Severe".into(), vec![1i64, 2]),
            Column::new("Accident Cause".into(), vec!["Speeding", "Weather"]),
            Column::new("Minor".into(), vec![10i64, 20]),
            Column::new("Moderate".into(), vec![5i64, 6]),
        ]);

        let table =
            aggregate_from_frame(TableKind::CauseSeverity, &df, Path::new("sev.csv")).unwrap();
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Minor", "Moderate", "Severe"]);
        assert_eq!(table.key_labels(), vec!["Speeding", "Weather"]);
        assert_eq!(table.row_counts(1), vec![20, 6, 2]);
    }

    #[test]
    fn missing_value_column_is_schema_error() {
        let df = frame(vec![
            Column::new("Weather Conditions".into(), vec!["Rainy"]),
            Column::new("Minor".into(), vec![1i64]),
            Column::new("Moderate".into(), vec![1i64]),
        ]);

        let err = aggregate_from_frame(TableKind::WeatherSeverity, &df, Path::new("w.csv"))
            .unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { column, .. } if column == "Severe"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let df = frame(vec![
            Column::new("Accident Cause".into(), vec!["Speeding", "Weather"]),
            Column::new("Afternoon".into(), vec![1i64, 2]),
            Column::new("Evening".into(), vec![1i64, -2]),
            Column::new("Morning".into(), vec![1i64, 2]),
            Column::new("Night".into(), vec![1i64, 2]),
        ]);

        let err =
            aggregate_from_frame(TableKind::TimeOfDay, &df, Path::new("t.csv")).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { column, row: 1, .. } if column == "Evening"
        ));
    }

    #[test]
    fn fractional_count_is_rejected() {
        let df = frame(vec![
            Column::new("Month".into(), vec!["January"]),
            Column::new("Distracted Driving".into(), vec![1.5f64]),
            Column::new("Drunk Driving".into(), vec![1.0f64]),
            Column::new("Mechanical Failure".into(), vec![1.0f64]),
            Column::new("Speeding".into(), vec![1.0f64]),
            Column::new("Weather".into(), vec![1.0f64]),
        ]);

        let err = aggregate_from_frame(TableKind::Monthly, &df, Path::new("m.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn missing_directory_reports_first_file() {
        let err = load_dataset(Path::new("/nonexistent/accident-data")).unwrap_err();
        match err {
            DataLoadError::Missing { path } => {
                assert!(path.ends_with(TableKind::Primary.file_name()))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loader_stays_empty_after_failure() {
        let mut loader = DataLoader::new("/nonexistent/accident-data");
        assert!(loader.load().is_err());
        assert!(!loader.is_loaded());
    }
}
