//! Data module - CSV loading, typed tables and row filtering

mod filter;
mod loader;
mod tables;

pub use filter::{filter_records, Dimension, FilterOptions, FilterSelection, FilterState};
pub use loader::{load_dataset, DataLoadError, DataLoader};
pub use tables::{
    AccidentRecord, AggregateTable, AggregateTables, CountColumn, Dataset, TableKind, CAUSE_COL,
    REGION_COL, WEATHER_COL, YEAR_COL,
};
