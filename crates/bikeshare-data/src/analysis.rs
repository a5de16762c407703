//! Runs the four statistics passes over one filtered collection.
//!
//! Each pass is timed separately so the report can show how long it took,
//! returning a [`StatsReport`] ready for the UI layer.

use std::time::{Duration, Instant};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, Schema};
use tracing::debug;

use crate::collection::TripCollection;
use crate::stats::{
    duration_stats, station_stats, temporal_stats, user_stats, DurationStats, StationStats,
    TemporalStats, UserStats,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// A statistic together with the wall-clock time spent computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// City the trips came from.
    pub city: City,
    /// Optional columns present in that city's dataset.
    pub schema: Schema,
    /// Number of trips the statistics cover.
    pub trips: usize,
    pub temporal: Timed<TemporalStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every statistics pass over `trips`.
///
/// Fails with [`BikeshareError::EmptyResult`] before any pass runs when
/// `trips` is empty.
pub fn analyze(trips: &TripCollection) -> Result<StatsReport> {
    if trips.is_empty() {
        return Err(BikeshareError::EmptyResult);
    }

    let temporal = timed(|| temporal_stats(trips))?;
    let stations = timed(|| station_stats(trips))?;
    let durations = timed(|| duration_stats(trips))?;
    let users = timed(|| user_stats(trips))?;

    debug!(
        "Analysed {} {} trips in {:?}",
        trips.len(),
        trips.city(),
        temporal.elapsed + stations.elapsed + durations.elapsed + users.elapsed
    );

    Ok(StatsReport {
        city: trips.city(),
        schema: trips.schema(),
        trips: trips.len(),
        temporal,
        stations,
        durations,
        users,
    })
}

fn timed<T>(pass: impl FnOnce() -> Result<T>) -> Result<Timed<T>> {
    let start = Instant::now();
    let value = pass()?;
    Ok(Timed {
        value,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::TripRecord;
    use chrono::NaiveDate;

    fn trip(day: u32, from: &str, to: &str) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, 4, day)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        TripRecord::new(
            start,
            start,
            900.0,
            from,
            to,
            Some("Subscriber".to_string()),
            None,
            None,
        )
    }

    #[test]
    fn test_analyze_runs_every_pass() {
        let trips = TripCollection::new(
            City::Washington,
            Schema::default(),
            vec![trip(3, "A", "B"), trip(4, "A", "C"), trip(10, "D", "B")],
        );
        let report = analyze(&trips).expect("report");

        assert_eq!(report.city, City::Washington);
        assert_eq!(report.trips, 3);
        assert_eq!(report.temporal.value.month, 4);
        assert_eq!(report.temporal.value.hour, "07:00");
        assert_eq!(report.stations.value.popular_start, "A");
        assert_eq!(report.stations.value.popular_end, "B");
        assert_eq!(report.durations.value.avg_minutes, 15.0);
        assert_eq!(
            report.users.value.user_types,
            vec![("Subscriber".to_string(), 3)]
        );
        assert!(report.users.value.genders.is_none());
    }

    #[test]
    fn test_analyze_empty_collection() {
        let trips = TripCollection::new(City::Chicago, Schema::default(), vec![]);
        assert!(matches!(analyze(&trips), Err(BikeshareError::EmptyResult)));
    }
}
