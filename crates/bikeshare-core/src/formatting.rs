//! Number and label formatting for the plain-text report.

use chrono::Month;

/// Round `value` to `places` decimal places, ties to even.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::round_to;
///
/// assert_eq!(round_to(1.004, 2), 1.0);
/// assert_eq!(round_to(12.3456, 2), 12.35);
/// assert_eq!(round_to(0.125, 2), 0.12);
/// assert_eq!(round_to(-2.5, 0), -2.0);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    let scaled = value * factor;
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    rounded / factor
}

/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(7), "7");
/// assert_eq!(format_count(1_551_505), "1,551,505");
/// ```
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// Format a value already rounded to two places, always showing both digits.
pub fn format_two_places(value: f64) -> String {
    format!("{:.2}", round_to(value, 2))
}

/// Format a wall-clock elapsed time in seconds for the "This took" line.
pub fn format_elapsed(seconds: f64) -> String {
    format!("{:.4}", seconds)
}

/// Full English name of a month number (1..=12), or `"Unknown"`.
pub fn month_name(number: u32) -> &'static str {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
