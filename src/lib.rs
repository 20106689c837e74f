//! Road Accident Dashboard
//!
//! Loads pre-aggregated accident tables, filters the primary records and
//! resolves each report section into chart descriptions for the GUI.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod view;
