//! Core domain types for the bikeshare explorer.
//!
//! Holds the city and filter enums, the typed trip record, the error
//! taxonomy, CLI settings, and the formatting and timestamp helpers shared
//! by the data and UI crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
