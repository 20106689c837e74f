//! Row Filter Module
//! Filter options, the current selection and the membership filter over accident records.

use crate::data::tables::AccidentRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Filterable dimensions of the primary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Year,
    Cause,
    Region,
}

/// Distinct sorted values observed in the primary table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i64>,
    pub causes: Vec<String>,
    pub regions: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[AccidentRecord]) -> Self {
        let years: BTreeSet<i64> = records.iter().map(|r| r.year).collect();
        let causes: BTreeSet<&str> = records.iter().map(|r| r.accident_cause.as_str()).collect();
        let regions: BTreeSet<&str> = records.iter().map(|r| r.region.as_str()).collect();

        Self {
            years: years.into_iter().collect(),
            causes: causes.into_iter().map(str::to_string).collect(),
            regions: regions.into_iter().map(str::to_string).collect(),
        }
    }
}

/// The user's chosen subset per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub years: BTreeSet<i64>,
    pub causes: BTreeSet<String>,
    pub regions: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every option (no filtering).
    pub fn all(options: &FilterOptions) -> Self {
        Self {
            years: options.years.iter().copied().collect(),
            causes: options.causes.iter().cloned().collect(),
            regions: options.regions.iter().cloned().collect(),
        }
    }

    pub fn matches(&self, record: &AccidentRecord) -> bool {
        self.years.contains(&record.year)
            && self.causes.contains(&record.accident_cause)
            && self.regions.contains(&record.region)
    }

    pub fn is_empty(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Year => self.years.is_empty(),
            Dimension::Cause => self.causes.is_empty(),
            Dimension::Region => self.regions.is_empty(),
        }
    }
}

/// Keep the records whose year, cause and region are all selected.
/// Original row order is preserved.
pub fn filter_records(
    records: &[AccidentRecord],
    selection: &FilterSelection,
) -> Vec<AccidentRecord> {
    records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect()
}

/// Selectable options plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    options: FilterOptions,
    selection: FilterSelection,
}

impl FilterState {
    /// Start with everything selected.
    pub fn new(options: FilterOptions) -> Self {
        let selection = FilterSelection::all(&options);
        Self { options, selection }
    }

    pub fn from_records(records: &[AccidentRecord]) -> Self {
        Self::new(FilterOptions::from_records(records))
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_years(&mut self, years: impl IntoIterator<Item = i64>) {
        self.selection.years = years.into_iter().collect();
        log::trace!("Year filter: {:?}", self.selection.years);
    }

    pub fn set_causes<S: Into<String>>(&mut self, causes: impl IntoIterator<Item = S>) {
        self.selection.causes = causes.into_iter().map(Into::into).collect();
        log::trace!("Cause filter: {:?}", self.selection.causes);
    }

    pub fn set_regions<S: Into<String>>(&mut self, regions: impl IntoIterator<Item = S>) {
        self.selection.regions = regions.into_iter().map(Into::into).collect();
        log::trace!("Region filter: {:?}", self.selection.regions);
    }

    pub fn toggle_year(&mut self, year: i64) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
        log::trace!("Year filter: {:?}", self.selection.years);
    }

    pub fn toggle_cause(&mut self, cause: &str) {
        toggle(&mut self.selection.causes, cause);
        log::trace!("Cause filter: {:?}", self.selection.causes);
    }

    pub fn toggle_region(&mut self, region: &str) {
        toggle(&mut self.selection.regions, region);
        log::trace!("Region filter: {:?}", self.selection.regions);
    }

    pub fn select_all(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Year => {
                self.selection.years = self.options.years.iter().copied().collect()
            }
            Dimension::Cause => {
                self.selection.causes = self.options.causes.iter().cloned().collect()
            }
            Dimension::Region => {
                self.selection.regions = self.options.regions.iter().cloned().collect()
            }
        }
        log::trace!("Selected all {dimension:?} values");
    }

    pub fn clear(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Year => self.selection.years.clear(),
            Dimension::Cause => self.selection.causes.clear(),
            Dimension::Region => self.selection.regions.clear(),
        }
        log::trace!("Cleared {dimension:?} filter");
    }

    pub fn reset(&mut self) {
        self.selection = FilterSelection::all(&self.options);
        log::trace!("Filters reset");
    }

    pub fn apply(&self, records: &[AccidentRecord]) -> Vec<AccidentRecord> {
        filter_records(records, &self.selection)
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
