use accident_dashboard::data::{load_dataset, DataLoadError, DataLoader, FilterState, TableKind};
use accident_dashboard::view::{resolve, resolve_named, weather_counts, ChartKind, Section};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_all_tables() {
    let dataset = load_dataset(&fixture("complete")).unwrap();

    assert_eq!(dataset.records.len(), 6);
    assert_eq!(dataset.records[0].year, 2020);
    assert_eq!(dataset.records[0].accident_cause, "Speeding");
    assert_eq!(dataset.records[5].weather_condition.as_deref(), Some("Rainy"));

    assert_eq!(dataset.tables.yearly.key_labels(), vec!["2020", "2021"]);
    assert_eq!(
        dataset.tables.road_type.key_labels(),
        vec!["Rural - Highway", "Urban - Main Road"]
    );
    assert_eq!(dataset.tables.daily.row_count(), 5);

    for kind in TableKind::ALL.into_iter().skip(1) {
        let table = dataset.table(kind).unwrap();
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, kind.value_columns(), "{kind}");
    }
    assert!(dataset.table(TableKind::Primary).is_none());
}

#[test]
fn missing_file_fails_whole_load() {
    let mut loader = DataLoader::new(fixture("missing_daily"));
    match loader.load() {
        Err(DataLoadError::Missing { path }) => {
            assert!(path.ends_with("daily_accidents.csv"))
        }
        other => panic!("expected missing file error, got {other:?}"),
    }
    assert!(!loader.is_loaded());
}

#[test]
fn schema_mismatch_is_reported() {
    let err = load_dataset(&fixture("bad_schema")).unwrap_err();
    match err {
        DataLoadError::MissingColumn { path, column } => {
            assert!(path.ends_with("road_type_severity.csv"));
            assert_eq!(column, "Severe");
        }
        other => panic!("expected missing column error, got {other:?}"),
    }
}

#[test]
fn loader_memoizes_and_reloads() {
    let mut loader = DataLoader::new(fixture("complete"));
    let first = loader.load().unwrap();
    let second = loader.load().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let reloaded = loader.reload().unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(*first, *reloaded);
}

#[test]
fn filtered_weather_section_end_to_end() {
    let dataset = load_dataset(&fixture("complete")).unwrap();
    let mut filters = FilterState::from_records(&dataset.records);
    filters.set_regions(["North"]);

    let filtered = filters.apply(&dataset.records);
    assert_eq!(filtered.len(), 3);

    let view = resolve(Section::WeatherConditions, &filtered, &dataset);
    assert_eq!(view.charts[0].kind, ChartKind::Bar);
    // North rows: Rainy, Clear, Rainy
    assert_eq!(view.charts[0].series[0].values, vec![0, 2, 1, 0, 0]);
    assert_eq!(view.charts[1].categories, vec!["Clear", "Rainy"]);
    assert_eq!(view.charts[1].series[2].values, vec![1, 6]);
}

#[test]
fn static_sections_resolve_from_fixture_tables() {
    let dataset = load_dataset(&fixture("complete")).unwrap();

    let daily = resolve_named("Daily Trends", &[], &dataset).unwrap();
    let line = &daily.charts[1];
    assert_eq!(line.series[0].name, "Weather");
    assert_eq!(line.series[0].values, vec![40, 41, 42, 43, 44, 45, 46]);

    let yearly = resolve(Section::YearlyTrends, &dataset.records, &dataset);
    assert_eq!(yearly.charts[1].series[0].values, vec![15, 20]);

    let json = serde_json::to_value(&yearly).unwrap();
    assert_eq!(json["section"], "Yearly Trends");
    assert_eq!(json["charts"][0]["series"][0]["color"], "#1E3A8A");
}

#[test]
fn blank_weather_cell_is_skipped_by_counts() {
    let dataset = load_dataset(&fixture("blank_weather")).unwrap();

    assert_eq!(dataset.records.len(), 6);
    assert_eq!(dataset.records[4].weather_condition, None);
    // Windy, Rainy, Clear, Snowy, Foggy; the blank Foggy row is not counted
    assert_eq!(weather_counts(&dataset.records), [0, 3, 1, 1, 0]);

    let view = resolve(Section::WeatherConditions, &dataset.records, &dataset);
    assert_eq!(view.filtered_rows, Some(6));
    assert_eq!(view.charts[0].series[0].values, vec![0, 3, 1, 1, 0]);
}
