use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input (bad quoting, ragged rows, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from a city data file.
    #[error("Column '{column}' is missing from {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A timestamp cell did not match any recognised format.
    #[error("Invalid timestamp in row {row}, column '{column}': {value:?}")]
    TimestampParse {
        row: usize,
        column: String,
        value: String,
    },

    /// A numeric cell could not be coerced to a number.
    #[error("Invalid number in row {row}, column '{column}': {value:?}")]
    NumberParse {
        row: usize,
        column: String,
        value: String,
    },

    /// The input does not name one of the supported cities.
    #[error("Unknown city: {0}")]
    InvalidCity(String),

    /// The input does not name a month between January and June, or "all".
    #[error("Unknown month: {0}")]
    InvalidMonth(String),

    /// The input does not name a day of the week, or "all".
    #[error("Unknown day: {0}")]
    InvalidDay(String),

    /// The selection holds no trips, so no statistic is defined.
    #[error("No trips match the selected filters")]
    EmptyResult,

    /// The configured data directory does not exist.
    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BikeshareError::FileRead {
            path: PathBuf::from("/data/chicago.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/chicago.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = BikeshareError::MissingColumn {
            path: PathBuf::from("washington.csv"),
            column: "Start Time".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Column 'Start Time' is missing from washington.csv"
        );
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = BikeshareError::TimestampParse {
            row: 4,
            column: "Start Time".to_string(),
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid timestamp in row 4, column 'Start Time': \"yesterday\""
        );
    }

    #[test]
    fn test_error_display_number_parse() {
        let err = BikeshareError::NumberParse {
            row: 2,
            column: "Trip Duration".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid number in row 2, column 'Trip Duration': \"ten\""
        );
    }

    #[test]
    fn test_error_display_validation() {
        assert_eq!(
            BikeshareError::InvalidCity("boston".to_string()).to_string(),
            "Unknown city: boston"
        );
        assert_eq!(
            BikeshareError::InvalidMonth("july".to_string()).to_string(),
            "Unknown month: july"
        );
        assert_eq!(
            BikeshareError::InvalidDay("funday".to_string()).to_string(),
            "Unknown day: funday"
        );
    }

    #[test]
    fn test_error_display_empty_result() {
        assert_eq!(
            BikeshareError::EmptyResult.to_string(),
            "No trips match the selected filters"
        );
    }
}
