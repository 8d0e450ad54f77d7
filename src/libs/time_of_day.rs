//! Wall-clock primitives: `H:MM` times of day and evaluation moments.
//!
//! Times of day are normalized to minutes since midnight so the classifier
//! can compare them as plain integers. A [`Moment`] is one local wall-clock
//! reading, carrying everything an evaluation derives from "now".

use chrono::{DateTime, Datelike, Local, Timelike, Weekday};
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

static TIME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn time_pattern() -> &'static Regex {
    TIME_PATTERN.get_or_init(|| Regex::new(r"^([01]?\d|2[0-3]):([0-5]?\d)$").expect("valid time pattern"))
}

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    /// Builds a time of day from hour and minute, rejecting out-of-range values.
    pub const fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Parses `H:MM`, `HH:MM` or `H:M` after trimming surrounding whitespace.
    ///
    /// Returns `None` for anything outside `0-23` hours and `0-59` minutes,
    /// e.g. `"25:00"` or `"9:60"`.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = time_pattern().captures(value.trim())?;
        let hour = captures.get(1)?.as_str().parse().ok()?;
        let minute = captures.get(2)?.as_str().parse().ok()?;
        Self::new(hour, minute)
    }

    /// Lenient read used for configuration values: anything that is not a
    /// parseable string yields `fallback`.
    pub fn normalize(value: Option<&serde_json::Value>, fallback: TimeOfDay) -> TimeOfDay {
        value.and_then(|v| v.as_str()).and_then(Self::parse).unwrap_or(fallback)
    }

    pub const fn minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: minutes / 60,
            minute: minutes % 60,
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// A single local wall-clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    at: DateTime<Local>,
}

impl Moment {
    pub fn now() -> Self {
        Self { at: Local::now() }
    }

    pub fn at(&self) -> DateTime<Local> {
        self.at
    }

    /// Milliseconds since the Unix epoch.
    pub fn ms(&self) -> i64 {
        self.at.timestamp_millis()
    }

    pub fn minutes(&self) -> u32 {
        self.at.hour() * 60 + self.at.minute()
    }

    pub fn minute_of_hour(&self) -> u32 {
        self.at.minute()
    }

    pub fn hour(&self) -> u32 {
        self.at.hour()
    }

    /// Local calendar date formatted `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        date_key(&self.at)
    }

    pub fn weekday(&self) -> Weekday {
        self.at.weekday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn month_day(&self) -> (u32, u32) {
        (self.at.month(), self.at.day())
    }

    /// Same moment shifted forward by `ms` milliseconds.
    pub fn plus_ms(&self, ms: i64) -> Self {
        Self {
            at: self.at + chrono::Duration::milliseconds(ms),
        }
    }
}

impl From<DateTime<Local>> for Moment {
    fn from(at: DateTime<Local>) -> Self {
        Self { at }
    }
}

pub fn date_key(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Local `HH:MM` wall-clock rendering of an epoch timestamp.
pub fn clock_label(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|utc| utc.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
