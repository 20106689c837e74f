//! Charts module - Chart rendering

mod plotter;

pub use plotter::{stack_offsets, to_color32, ChartPlotter};
