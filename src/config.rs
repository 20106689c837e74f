//! Command-line and environment configuration.

use crate::data::{AccidentRecord, FilterState};
use crate::view::{Section, UnknownSectionError};
use clap::Parser;
use std::path::PathBuf;

/// Road Accident Analysis Dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "accident-dashboard", version, about)]
pub struct Config {
    /// Directory holding the eight CSV tables
    #[arg(long, env = "ACCIDENT_DASHBOARD_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Section to open with
    #[arg(long, value_parser = parse_section, default_value = "Yearly Trends")]
    pub section: Section,

    /// Only include this year (repeatable)
    #[arg(long = "year")]
    pub years: Vec<i64>,

    /// Only include this accident cause (repeatable)
    #[arg(long = "cause")]
    pub causes: Vec<String>,

    /// Only include this region (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Print the resolved section as JSON instead of opening the window
    #[arg(long)]
    pub dump: bool,
}

fn parse_section(s: &str) -> Result<Section, UnknownSectionError> {
    s.parse()
}

impl Config {
    /// Filter state for `records`, narrowed by any dimensions given on the command line.
    pub fn filter_state(&self, records: &[AccidentRecord]) -> FilterState {
        let mut state = FilterState::from_records(records);
        if !self.years.is_empty() {
            state.set_years(self.years.iter().copied());
        }
        if !self.causes.is_empty() {
            state.set_causes(self.causes.iter().cloned());
        }
        if !self.regions.is_empty() {
            state.set_regions(self.regions.iter().cloned());
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i64, cause: &str, region: &str) -> AccidentRecord {
        AccidentRecord {
            year,
            accident_cause: cause.to_string(),
            region: region.to_string(),
            weather_condition: Some("Clear".to_string()),
        }
    }

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["accident-dashboard"]).unwrap();
        assert_eq!(config.section, Section::YearlyTrends);
        assert!(!config.dump);
        assert!(config.years.is_empty());
    }

    #[test]
    fn parses_section_and_filters() {
        let config = Config::try_parse_from([
            "accident-dashboard",
            "--data-dir",
            "/srv/accidents",
            "--section",
            "Weather Conditions",
            "--year",
            "2020",
            "--year",
            "2021",
            "--region",
            "North",
            "--dump",
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/accidents"));
        assert_eq!(config.section, Section::WeatherConditions);
        assert_eq!(config.years, vec![2020, 2021]);
        assert!(config.dump);

        let records = [
            record(2020, "Speeding", "North"),
            record(2019, "Speeding", "North"),
            record(2021, "Weather", "South"),
        ];
        let state = config.filter_state(&records);
        assert_eq!(state.apply(&records), vec![records[0].clone()]);
        assert_eq!(state.selection().causes.len(), 2);
    }

    #[test]
    fn rejects_unknown_section() {
        let err = Config::try_parse_from(["accident-dashboard", "--section", "Hourly"]);
        assert!(err.is_err());
    }
}
