//! Compact age labels for elapsed durations

use chrono::{DateTime, Duration, Utc};

const SECONDS_LIMIT: f64 = 180.0;
const MINUTES_LIMIT: f64 = 120.0;
const HOURS_LIMIT: f64 = 72.0;

/// Format an elapsed duration as `179s`, `3m`, `71h`, `12d`.
///
/// The unit is chosen from the unrounded value, then the value is rounded
/// to the nearest whole unit, so 119m59s reads `120m` while exactly 120
/// minutes reads `2h`. Zero and negative durations read `0s`.
pub fn humanize_age(elapsed: Duration) -> String {
    let seconds = elapsed.num_milliseconds().max(0) as f64 / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    if seconds < SECONDS_LIMIT {
        format!("{:.0}s", seconds)
    } else if minutes < MINUTES_LIMIT {
        format!("{:.0}m", minutes)
    } else if hours < HOURS_LIMIT {
        format!("{:.0}h", hours)
    } else {
        format!("{:.0}d", days)
    }
}

/// Age of `reference` as seen at `now`
pub fn humanize_since(reference: DateTime<Utc>, now: DateTime<Utc>) -> String {
    humanize_age(now.signed_duration_since(reference))
}
