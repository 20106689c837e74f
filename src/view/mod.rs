//! View module - section selection and chart resolution

pub mod palette;
mod resolver;
mod section;

pub use palette::Rgb;
pub use resolver::{
    resolve, resolve_named, weather_counts, ChartKind, ChartSpec, SectionView, SeriesData,
    WEATHER_ORDER,
};
pub use section::{Section, UnknownSectionError};
