//! CSV loading for the city trip logs.
//!
//! Reads a city's CSV resource into a [`RawTable`] (every cell kept as text,
//! used for raw-data paging) and coerces it once into a typed
//! [`TripCollection`] with the derived time parts filled in.

use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, Schema, TripFilter, TripRecord};
use bikeshare_core::time_utils::parse_timestamp;
use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info};

use crate::collection::TripCollection;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

// ── RawTable ──────────────────────────────────────────────────────────────────

/// The untyped contents of a city CSV, in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `true` when the header row names `column` exactly.
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Up to `len` rows starting at `start`; empty once `start` is past the end.
    pub fn page(&self, start: usize, len: usize) -> &[StringRecord] {
        let start = start.min(self.rows.len());
        let end = start.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }
}

/// A city's raw table together with its typed, unfiltered trips.
#[derive(Debug, Clone)]
pub struct CityData {
    pub raw: RawTable,
    pub trips: TripCollection,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Path of `city`'s CSV resource inside `data_dir`.
pub fn city_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Read a CSV file fully into memory.
///
/// The file handle is released before this returns, on success and on error.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(std::io::BufReader::new(file));

    let headers = reader.headers()?.clone();
    let rows = reader
        .records()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    debug!(
        "Read {} rows with {} columns from {}",
        rows.len(),
        headers.len(),
        path.display()
    );

    Ok(RawTable { headers, rows })
}

/// Coerce every row of `table` into a [`TripRecord`].
///
/// Required columns must be present in the header; `Gender` and
/// `Birth Year` are optional and their presence is recorded in the
/// collection's [`Schema`]. Any malformed timestamp or number fails the
/// whole load. `source` only labels errors.
pub fn trips_from_table(city: City, table: &RawTable, source: &Path) -> Result<TripCollection> {
    for column in REQUIRED_COLUMNS {
        if !table.has_column(column) {
            return Err(BikeshareError::MissingColumn {
                path: source.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let schema = Schema {
        has_gender: table.has_column(GENDER),
        has_birth_year: table.has_column(BIRTH_YEAR),
    };
    if !schema.has_gender {
        info!("{} has no '{}' column", source.display(), GENDER);
    }
    if !schema.has_birth_year {
        info!("{} has no '{}' column", source.display(), BIRTH_YEAR);
    }

    let records = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let raw: RawTrip = row.deserialize(Some(&table.headers))?;
            raw.into_record(i + 1)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TripCollection::new(city, schema, records))
}

/// Load `city`'s CSV from `data_dir`, keeping both the raw and typed forms.
pub fn load_city(data_dir: &Path, city: City) -> Result<CityData> {
    let path = city_path(data_dir, city);
    let raw = read_table(&path)?;
    let trips = trips_from_table(city, &raw, &path)?;
    Ok(CityData { raw, trips })
}

/// Load `city`'s trips from `data_dir` and narrow them to `filter`.
///
/// Row order is preserved; filtering only removes rows.
pub fn load(data_dir: &Path, city: City, filter: &TripFilter) -> Result<TripCollection> {
    let trips = load_city(data_dir, city)?.trips;
    let loaded = trips.len();
    let filtered = trips.into_filtered(filter);
    debug!(
        "{}: kept {} of {} trips for {}, {}",
        city,
        filtered.len(),
        loaded,
        filter.month,
        filter.day
    );
    Ok(filtered)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// One CSV row as text, keyed by header name.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

impl RawTrip {
    /// `row` is the 1-based data row number, used in error messages.
    fn into_record(self, row: usize) -> Result<TripRecord> {
        let start_time = timestamp(&self.start_time, row, START_TIME)?;
        let end_time = timestamp(&self.end_time, row, END_TIME)?;
        let trip_duration = number(&self.trip_duration, row, TRIP_DURATION)?;
        let birth_year = non_blank(self.birth_year)
            .map(|v| number(&v, row, BIRTH_YEAR))
            .transpose()?;

        Ok(TripRecord::new(
            start_time,
            end_time,
            trip_duration,
            self.start_station,
            self.end_station,
            non_blank(self.user_type),
            non_blank(self.gender),
            birth_year,
        ))
    }
}

fn timestamp(value: &str, row: usize, column: &str) -> Result<chrono::NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| BikeshareError::TimestampParse {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn number(value: &str, row: usize, column: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| BikeshareError::NumberParse {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
