use clap::Parser;
use std::path::PathBuf;

use crate::models::{City, DayFilter, MonthFilter};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data for Chicago, New York City and Washington
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data for Chicago, New York City and Washington",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// City to explore on the first pass (skips the city prompt)
    #[arg(long)]
    pub city: Option<City>,

    /// Month filter for the first pass: january..june or all
    #[arg(long)]
    pub month: Option<MonthFilter>,

    /// Day filter for the first pass: monday..sunday or all
    #[arg(long)]
    pub day: Option<DayFilter>,

    /// Rows shown per page of raw data (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when omitted)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Rows per raw-data page as a `usize`.
    pub fn page_size(&self) -> usize {
        usize::from(self.page_size)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["bikeshare"]);

        assert!(settings.city.is_none());
        assert!(settings.month.is_none());
        assert!(settings.day.is_none());
        assert_eq!(settings.page_size(), 5);
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_presets() {
        let settings = Settings::parse_from([
            "bikeshare",
            "--city",
            "New York City",
            "--month",
            "february",
            "--day",
            "Friday",
        ]);
        assert_eq!(settings.city, Some(City::NewYorkCity));
        assert_eq!(settings.month, Some(MonthFilter::Month(Month::February)));
        assert_eq!(settings.day, Some(DayFilter::Day(Weekday::Fri)));
    }

    #[test]
    fn test_settings_cli_rejects_unknown_city() {
        let result = Settings::try_parse_from(["bikeshare", "--city", "boston"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_cli_rejects_month_outside_dataset() {
        let result = Settings::try_parse_from(["bikeshare", "--month", "august"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_cli_page_size_range() {
        let settings = Settings::parse_from(["bikeshare", "--page-size", "10"]);
        assert_eq!(settings.page_size(), 10);
        assert!(Settings::try_parse_from(["bikeshare", "--page-size", "0"]).is_err());
    }

    #[test]
    fn test_settings_cli_data_dir() {
        let settings = Settings::parse_from(["bikeshare", "--data-dir", "/srv/bikeshare"]);
        assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/bikeshare")));
    }

    #[test]
    fn test_load_from_args_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["bikeshare", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }
}
