//! Report sections shown in the sidebar.

use crate::data::TableKind;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown section: \"{0}\"")]
pub struct UnknownSectionError(pub String);

/// One of the seven fixed report views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Section {
    #[default]
    #[serde(rename = "Yearly Trends")]
    YearlyTrends,
    #[serde(rename = "Monthly Trends")]
    MonthlyTrends,
    #[serde(rename = "Daily Trends")]
    DailyTrends,
    #[serde(rename = "Time of Day")]
    TimeOfDay,
    #[serde(rename = "Road Type and Location")]
    RoadTypeAndLocation,
    #[serde(rename = "Weather Conditions")]
    WeatherConditions,
    #[serde(rename = "Outcomes by Cause")]
    OutcomesByCause,
}

impl Section {
    /// Sidebar order.
    pub const ALL: [Section; 7] = [
        Section::YearlyTrends,
        Section::MonthlyTrends,
        Section::DailyTrends,
        Section::TimeOfDay,
        Section::RoadTypeAndLocation,
        Section::WeatherConditions,
        Section::OutcomesByCause,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Section::YearlyTrends => "Yearly Trends",
            Section::MonthlyTrends => "Monthly Trends",
            Section::DailyTrends => "Daily Trends",
            Section::TimeOfDay => "Time of Day",
            Section::RoadTypeAndLocation => "Road Type and Location",
            Section::WeatherConditions => "Weather Conditions",
            Section::OutcomesByCause => "Outcomes by Cause",
        }
    }

    /// The static aggregate table this section plots.
    pub const fn table_kind(self) -> TableKind {
        match self {
            Section::YearlyTrends => TableKind::Yearly,
            Section::MonthlyTrends => TableKind::Monthly,
            Section::DailyTrends => TableKind::Daily,
            Section::TimeOfDay => TableKind::TimeOfDay,
            Section::RoadTypeAndLocation => TableKind::RoadType,
            Section::WeatherConditions => TableKind::WeatherSeverity,
            Section::OutcomesByCause => TableKind::CauseSeverity,
        }
    }

    /// Whether the section reads the filtered primary records.
    pub const fn uses_filtered_records(self) -> bool {
        matches!(self, Section::WeatherConditions)
    }

    pub const fn header(self) -> &'static str {
        match self {
            Section::YearlyTrends => "Yearly Trends in Road Accidents",
            Section::MonthlyTrends => "Monthly Trends in Road Accidents",
            Section::DailyTrends => "Accidents by Day of the Week",
            Section::TimeOfDay => "Accidents by Time of Day",
            Section::RoadTypeAndLocation => "Accidents by Road Type and Location",
            Section::WeatherConditions => "Accidents by Weather Conditions",
            Section::OutcomesByCause => "Outcomes by Accident Cause",
        }
    }

    pub const fn narrative(self) -> &'static str {
        match self {
            Section::YearlyTrends => {
                "### Yearly Trends in Road Accident Causes\n\
                 - Speeding is the largest single cause in almost every year.\n\
                 - Distracted and drunk driving stay persistently high across the period.\n\
                 - The peak year stands out in the totals line; speed control, public \
                 education and enforcement remain the main levers."
            }
            Section::MonthlyTrends => {
                "### Monthly Trends in Road Accident Causes\n\
                 - May is the riskiest month by total accidents.\n\
                 - Safety campaigns and enforcement should intensify ahead of the \
                 late-spring peak."
            }
            Section::DailyTrends => {
                "### Wednesday: The Unexpected Danger Day\n\
                 - Midweek days carry more accidents than weekends.\n\
                 - Midweek fatigue is a plausible driver; midweek safety campaigns \
                 could help."
            }
            Section::TimeOfDay => {
                "### How Time of Day Influences Road Accidents\n\
                 - Evening and night are the most dangerous periods.\n\
                 - Night patrols and alcohol checkpoints target the worst hours."
            }
            Section::RoadTypeAndLocation => {
                "### Road Type, Location and Severity\n\
                 - Rural highways record the most severe accidents.\n\
                 - In urban areas, main roads carry the highest severe count."
            }
            Section::WeatherConditions => {
                "### Weather Conditions and Accident Severity\n\
                 - Rainy conditions show the highest severe accident count.\n\
                 - Weather-responsive speed limits and driver alerts are worth pursuing."
            }
            Section::OutcomesByCause => {
                "### Outcomes by Accident Cause\n\
                 - Distracted driving leads in severe accidents.\n\
                 - Reducing distracted and drunk driving would have the biggest impact."
            }
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Section {
    type Err = UnknownSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.label() == s)
            .ok_or_else(|| UnknownSectionError(s.to_string()))
    }
}
