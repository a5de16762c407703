//! Descriptive statistics over a trip collection.
//!
//! Four independent read-only passes: popular travel times, popular
//! stations, trip-duration totals, and rider demographics. Every pass
//! rejects an empty collection with [`BikeshareError::EmptyResult`].

use std::collections::HashMap;
use std::hash::Hash;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::formatting::round_to;
use chrono::Weekday;

use crate::collection::TripCollection;

/// Divisor applied to the summed durations for the "total travel time" figure.
const TOTAL_TIME_DIVISOR: f64 = 1000.0 * 60.0 * 60.0;

// ── Result types ──────────────────────────────────────────────────────────────

/// Most common month, weekday and start hour.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalStats {
    /// 1..=12
    pub month: u32,
    pub weekday: Weekday,
    /// `"HH:00"`
    pub hour: String,
}

/// Most common start station, end station and route.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub popular_start: String,
    pub popular_end: String,
    /// `"<start> to <end>"`; A→B and B→A are different routes.
    pub popular_route: String,
}

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Sum of `Trip Duration`, in seconds.
    pub total_seconds: f64,
    /// Mean of `Trip Duration`, in seconds.
    pub mean_seconds: f64,
    /// `(total_seconds / 3_600_000) mod 24`, rounded to 2 places.
    ///
    /// This wraps at 24 and divides by milliseconds-per-hour although the
    /// column is in seconds; it is the figure the report has always shown.
    pub total_hours: f64,
    /// `mean_seconds / 60`, rounded to 2 places.
    pub avg_minutes: f64,
}

/// Earliest, latest and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub oldest: i32,
    pub youngest: i32,
    pub most_common: i32,
}

/// Rider breakdowns. Optional parts are `None` when the dataset lacks them.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Counts per user type, most frequent first.
    pub user_types: Vec<(String, usize)>,
    /// Counts per gender, most frequent first; `None` without a `Gender` column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` without a `Birth Year` column, or when every value is blank.
    pub birth_years: Option<BirthYearStats>,
}

// ── Generic helpers ───────────────────────────────────────────────────────────

/// Most frequent value; ties go to whichever value appeared first.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(v, _)| v)
}

/// Distinct values with their counts, most frequent first.
///
/// Values with equal counts keep the order of their first appearance.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    // value -> position of its first appearance
    let mut first_seen: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();

    for value in values {
        let next = counts.len();
        let i = *first_seen.entry(value).or_insert(next);
        if i == next {
            counts.push(0);
        }
        counts[i] += 1;
    }

    let mut seen: Vec<(T, usize)> = first_seen.into_iter().collect();
    seen.sort_unstable_by_key(|&(_, i)| i);

    let mut pairs: Vec<(T, usize)> = seen.into_iter().map(|(v, i)| (v, counts[i])).collect();
    // Stable sort: equal counts stay in first-seen order.
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

fn non_empty(trips: &TripCollection) -> Result<()> {
    if trips.is_empty() {
        Err(BikeshareError::EmptyResult)
    } else {
        Ok(())
    }
}

// ── The four passes ───────────────────────────────────────────────────────────

/// Most popular month, day of week and start hour.
pub fn temporal_stats(trips: &TripCollection) -> Result<TemporalStats> {
    non_empty(trips)?;
    let records = trips.records();

    let month = mode(records.iter().map(|r| r.month)).ok_or(BikeshareError::EmptyResult)?;
    let weekday = mode(records.iter().map(|r| r.weekday)).ok_or(BikeshareError::EmptyResult)?;
    let hour = mode(records.iter().map(|r| r.hour.as_str()))
        .ok_or(BikeshareError::EmptyResult)?
        .to_string();

    Ok(TemporalStats {
        month,
        weekday,
        hour,
    })
}

/// Most popular start station, end station and start-to-end route.
///
/// Blank stations are missing values. A route is only counted when both of
/// its ends are recorded.
pub fn station_stats(trips: &TripCollection) -> Result<StationStats> {
    non_empty(trips)?;
    let records = trips.records();

    let popular_start = mode(records.iter().filter_map(|r| r.start()))
        .ok_or(BikeshareError::EmptyResult)?
        .to_string();
    let popular_end = mode(records.iter().filter_map(|r| r.end()))
        .ok_or(BikeshareError::EmptyResult)?
        .to_string();
    let popular_route =
        mode(records.iter().filter_map(|r| r.route())).ok_or(BikeshareError::EmptyResult)?;

    Ok(StationStats {
        popular_start,
        popular_end,
        popular_route,
    })
}

/// Total (wrapped, see [`DurationStats::total_hours`]) and mean trip duration.
pub fn duration_stats(trips: &TripCollection) -> Result<DurationStats> {
    non_empty(trips)?;
    let records = trips.records();

    let total_seconds: f64 = records.iter().map(|r| r.trip_duration).sum();
    let mean_seconds = total_seconds / records.len() as f64;

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
        total_hours: round_to((total_seconds / TOTAL_TIME_DIVISOR) % 24.0, 2),
        avg_minutes: round_to(mean_seconds / 60.0, 2),
    })
}

/// User-type counts, and gender counts and birth-year figures when the
/// dataset carries those columns.
pub fn user_stats(trips: &TripCollection) -> Result<UserStats> {
    non_empty(trips)?;
    let records = trips.records();
    let schema = trips.schema();

    let user_types = owned(value_counts(
        records.iter().filter_map(|r| r.user_type.as_deref()),
    ));

    let genders = schema
        .has_gender
        .then(|| owned(value_counts(records.iter().filter_map(|r| r.gender.as_deref()))));

    let birth_years = if schema.has_birth_year {
        let years: Vec<i32> = records
            .iter()
            .filter_map(|r| r.birth_year)
            .map(|y| y.trunc() as i32)
            .collect();
        birth_year_stats(&years)
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn birth_year_stats(years: &[i32]) -> Option<BirthYearStats> {
    Some(BirthYearStats {
        oldest: *years.iter().min()?,
        youngest: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}

fn owned(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
