//! Plain-text terminal layer for the bikeshare explorer.
//!
//! Provides the validated prompt loops, the statistics report renderer,
//! and the raw-data pager used by the interactive session.

pub mod prompt;
pub mod report;
pub mod table_view;

pub use bikeshare_core as core;
