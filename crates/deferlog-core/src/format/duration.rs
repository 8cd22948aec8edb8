//! Compact elapsed-time rendering
//!
//! Only the largest non-zero unit is shown and it is rounded down, so
//! 1 500 ms renders as `1s` and 90 s as `1m`.

use std::time::Duration;

/// Renders an elapsed duration as suffix text
pub type DurationFormat = fn(Duration) -> String;

const SECOND: u128 = 1_000;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;
const DAY: u128 = 24 * HOUR;
const YEAR: u128 = 365 * DAY;

/// Largest unit only: `340ms`, `1s`, `2m`, `3h`, `4d`, `1y`
pub fn format_duration(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    let units = [(YEAR, "y"), (DAY, "d"), (HOUR, "h"), (MINUTE, "m"), (SECOND, "s")];
    for (size, suffix) in units {
        if ms >= size {
            return format!("{}{}", ms / size, suffix);
        }
    }
    format!("{}ms", ms)
}

/// Whole milliseconds, no unit scaling
pub fn format_millis(elapsed: Duration) -> String {
    format!("{}ms", elapsed.as_millis())
}
