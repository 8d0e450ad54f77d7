//! Duration formatting for the status line, the report and tables.
//!
//! ```rust
//! use care::libs::formatter::format_active;
//!
//! assert_eq!(format_active(45 * 60_000), "45m");
//! assert_eq!(format_active(125 * 60_000), "2h 5m");
//! ```

use crate::libs::time_of_day::{Moment, TimeOfDay};
use chrono::{Duration, NaiveTime};

/// Formats accumulated active time as `Xh Ym`, or `Ym` under an hour.
/// Seconds are truncated.
pub fn format_active(ms: u64) -> String {
    let total_minutes = ms / 60_000;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours == 0 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

/// Time left from `now` until `target` today, never negative.
pub fn remaining_until(now: &Moment, target: TimeOfDay) -> Duration {
    let Some(target_time) = NaiveTime::from_hms_opt(target.hour, target.minute, 0) else {
        return Duration::zero();
    };
    let now_naive = now.at().naive_local();
    let target_at = now_naive.date().and_time(target_time);
    (target_at - now_naive).max(Duration::zero())
}

/// Formats a countdown as `Hh Mm Ss`.
pub fn format_countdown(remaining: &Duration) -> String {
    let seconds = remaining.num_seconds().max(0);
    format!("{}h {}m {}s", seconds / 3600, (seconds / 60) % 60, seconds % 60)
}
