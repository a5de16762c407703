use chrono::NaiveDateTime;
use tracing::debug;

/// Timestamp layouts found in the city trip logs, tried in order.
const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a trip-log timestamp string into a naive local date-time.
///
/// The logs carry no timezone, so none is attached. Surrounding whitespace
/// is ignored. Returns `None` for empty strings or unrecognised layouts.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let parsed = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok());

    if parsed.is_none() {
        debug!("could not parse timestamp \"{}\"", s);
    }
    parsed
}
