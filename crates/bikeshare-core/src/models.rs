use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

use crate::error::BikeshareError;

// ── City ──────────────────────────────────────────────────────────────────────

/// The three cities with a bundled trip log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All supported cities, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Name of the CSV resource holding this city's trips.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Lowercase key accepted at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(title)
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| BikeshareError::InvalidCity(s.trim().to_string()))
    }
}

// ── MonthFilter ───────────────────────────────────────────────────────────────

/// Months covered by the bundled datasets (January through June).
pub const FILTER_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

/// Restricts a trip collection to a single month, or keeps every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(Month),
}

impl MonthFilter {
    /// 1-based month number, or `None` for [`MonthFilter::All`].
    pub fn number(self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Month(m) => Some(m.number_from_month()),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all months"),
            MonthFilter::Month(m) => f.write_str(m.name()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        FILTER_MONTHS
            .into_iter()
            .find(|m| m.name().to_lowercase() == wanted)
            .map(MonthFilter::Month)
            .ok_or_else(|| BikeshareError::InvalidMonth(s.trim().to_string()))
    }
}

// ── DayFilter ─────────────────────────────────────────────────────────────────

/// Days of the week, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Restricts a trip collection to a single weekday, or keeps every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all days"),
            DayFilter::Day(d) => f.write_str(day_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        WEEK.into_iter()
            .find(|d| day_name(*d).to_lowercase() == wanted)
            .map(DayFilter::Day)
            .ok_or_else(|| BikeshareError::InvalidDay(s.trim().to_string()))
    }
}

// ── TripFilter ────────────────────────────────────────────────────────────────

/// Month and weekday filters applied together (both must match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripFilter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl TripFilter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    /// `true` when `record` falls in the requested month and weekday.
    pub fn matches(&self, record: &TripRecord) -> bool {
        let month_ok = self.month.number().map_or(true, |m| record.month == m);
        let day_ok = match self.day {
            DayFilter::All => true,
            DayFilter::Day(d) => record.weekday == d,
        };
        month_ok && day_ok
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Which optional columns a city's dataset carries.
///
/// Presence is decided once, from the CSV header, and holds for every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// A single trip, with typed fields and time parts derived at load.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// Rider category, e.g. `"Subscriber"` or `"Customer"`; `None` when blank.
    pub user_type: Option<String>,
    /// `None` when the cell is blank or the dataset has no `Gender` column.
    pub gender: Option<String>,
    /// `None` when the cell is blank or the dataset has no `Birth Year` column.
    pub birth_year: Option<f64>,
    /// Month of `start_time`, 1..=12.
    pub month: u32,
    /// Weekday of `start_time`.
    pub weekday: Weekday,
    /// Start hour bucket formatted as `"HH:00"`.
    pub hour: String,
}

impl TripRecord {
    /// Build a record, deriving `month`, `weekday` and `hour` from `start_time`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: Option<String>,
        gender: Option<String>,
        birth_year: Option<f64>,
    ) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: format!("{:02}:00", start_time.hour()),
            start_time,
            end_time,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type,
            gender,
            birth_year,
        }
    }

    /// Start station, or `None` when the cell is blank.
    pub fn start(&self) -> Option<&str> {
        non_blank(&self.start_station)
    }

    /// End station, or `None` when the cell is blank.
    pub fn end(&self) -> Option<&str> {
        non_blank(&self.end_station)
    }

    /// Route key `"<start> to <end>"`; direction matters.
    ///
    /// `None` unless both stations are recorded.
    pub fn route(&self) -> Option<String> {
        Some(format!("{} to {}", self.start()?, self.end()?))
    }
}

fn non_blank(station: &str) -> Option<&str> {
    let station = station.trim();
    (!station.is_empty()).then_some(station)
}
