//! Plain-text rendering of a [`StatsReport`].

use std::fmt::Write as _;

use bikeshare_core::formatting::{format_count, format_elapsed, format_two_places, month_name};
use bikeshare_core::models::{day_name, City, TripFilter};
use bikeshare_data::analysis::{StatsReport, Timed};
use bikeshare_data::stats::{DurationStats, StationStats, TemporalStats, UserStats};
use unicode_width::UnicodeWidthStr;

/// Rule closing each statistics section.
pub const SECTION_RULE: &str = "----------------------------------------";
/// Rule closing the raw-data loop.
pub const RAW_RULE: &str = "****************************************";

/// One-line summary of what is being analysed.
pub fn render_banner(city: City, filter: &TripFilter, trips: usize) -> String {
    format!(
        "Exploring {} trips for {}, {}: {} trips matched.\n",
        city,
        filter.month,
        filter.day,
        format_count(trips)
    )
}

/// Message printed instead of statistics when the filters match nothing.
pub fn render_empty(city: City, filter: &TripFilter) -> String {
    format!(
        "No trips match the selected filters ({}: {}, {}).\n{}\n",
        city, filter.month, filter.day, SECTION_RULE
    )
}

/// Render all four sections of `report`, in order.
pub fn render_report(report: &StatsReport) -> String {
    let mut out = String::new();
    out.push_str(&section(&report.temporal, render_temporal));
    out.push_str(&section(&report.stations, render_stations));
    out.push_str(&section(&report.durations, render_durations));
    out.push_str(&section(&report.users, |users| render_users(report, users)));
    out
}

fn section<T>(timed: &Timed<T>, body: impl FnOnce(&T) -> String) -> String {
    format!(
        "{}\nThis took {} seconds.\n{}\n",
        body(&timed.value),
        format_elapsed(timed.elapsed.as_secs_f64()),
        SECTION_RULE
    )
}

pub fn render_temporal(stats: &TemporalStats) -> String {
    format!(
        "\nCalculating The Most Frequent Times of Travel...\n\n\
         Most Popular Month: {}\n\
         Most Popular Day of the Week: {}\n\
         Most Popular Start Hour: {}\n",
        month_name(stats.month),
        day_name(stats.weekday),
        stats.hour
    )
}

pub fn render_stations(stats: &StationStats) -> String {
    format!(
        "\nCalculating The Most Popular Stations and Trip...\n\n\
         Most Popular Start Station: {}\n\
         Most Popular End Station: {}\n\
         Most Popular Route: {}\n",
        stats.popular_start, stats.popular_end, stats.popular_route
    )
}

pub fn render_durations(stats: &DurationStats) -> String {
    format!(
        "\nCalculating Trip Duration...\n\n\
         Total Travel Time: {} hrs\n\
         Average Travel Time: {} mins\n",
        format_two_places(stats.total_hours),
        format_two_places(stats.avg_minutes)
    )
}

fn render_users(report: &StatsReport, stats: &UserStats) -> String {
    let mut out = String::from("\nCalculating User Stats...\n\n");

    out.push_str("Number of Each User Type:\n");
    out.push_str(&render_counts(&stats.user_types));
    out.push('\n');

    match &stats.genders {
        Some(genders) => {
            out.push_str("Number of Each Gender Type:\n");
            out.push_str(&render_counts(genders));
            out.push('\n');
        }
        None => {
            let _ = writeln!(out, "Gender data isn't available for {}.\n", report.city);
        }
    }

    match (&stats.birth_years, report.schema.has_birth_year) {
        (Some(years), _) => {
            let _ = writeln!(out, "Oldest User Born: {}", years.oldest);
            let _ = writeln!(out, "Youngest User Born: {}", years.youngest);
            let _ = writeln!(out, "Most Common Birth Year: {}", years.most_common);
        }
        (None, true) => {
            out.push_str("No birth year values are recorded for these trips.\n");
        }
        (None, false) => {
            let _ = writeln!(out, "Birth year data isn't available for {}.", report.city);
        }
    }

    out
}

/// Two-column list of `(label, count)`, counts right-aligned.
fn render_counts(counts: &[(String, usize)]) -> String {
    if counts.is_empty() {
        return "  (none recorded)\n".to_string();
    }
    // Display columns, not chars: wide glyphs take two.
    let label_width = counts.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    let formatted: Vec<String> = counts.iter().map(|(_, n)| format_count(*n)).collect();
    let count_width = formatted.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for ((label, _), count) in counts.iter().zip(&formatted) {
        let fill = label_width - label.width();
        let _ = writeln!(
            out,
            "  {label}{:fill$}  {count:>count_width$}",
            ""
        );
    }
    out
}
