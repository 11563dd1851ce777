//! Coarse elapsed-time labels for event timestamps.

use chrono::{DateTime, Utc};

const SECONDS_CUTOFF: i64 = 90;
const MINUTES_CUTOFF: i64 = 90 * 60;

/// Human label for the time elapsed between `since` and `now`.
///
/// Buckets are deliberately coarse, with truncating division:
/// under 90 seconds the label is in seconds (`"42 s"`), under 90 minutes in
/// minutes (`"7 m"`), and in hours otherwise (`"3 h"`). Exactly 90 seconds
/// renders `"1 m"` and exactly 90 minutes renders `"1 h"`. A `now` earlier
/// than `since` clamps to `"0 s"`.
///
/// The label is a pure function of the two instants; viewers recompute it on
/// a fixed tick so it advances even when no new traffic arrives.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use httptap::view::elapsed_label;
///
/// let now = Utc::now();
/// assert_eq!(elapsed_label(now - Duration::seconds(42), now), "42 s");
/// assert_eq!(elapsed_label(now - Duration::minutes(5), now), "5 m");
/// assert_eq!(elapsed_label(now - Duration::hours(4), now), "4 h");
/// ```
pub fn elapsed_label(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - since).num_seconds().max(0);
    if seconds < SECONDS_CUTOFF {
        format!("{seconds} s")
    } else if seconds < MINUTES_CUTOFF {
        format!("{} m", seconds / 60)
    } else {
        format!("{} h", seconds / 3600)
    }
}
