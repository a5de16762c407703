//! Data layer for the bikeshare explorer.
//!
//! Reads a city's CSV trip log, coerces it into typed trip records, filters
//! them by month and weekday, and computes the descriptive statistics shown
//! in the report.

pub mod analysis;
pub mod collection;
pub mod reader;
pub mod stats;

pub use bikeshare_core as core;
pub use collection::TripCollection;
