//! Configuration management for care.
//!
//! Settings live in `config.json` inside the platform data directory
//! (see [`DataStorage`]). Keys use the camelCase names the watcher has
//! always used:
//!
//! ```json
//! {
//!   "enabled": true,
//!   "workStart": "9:00",
//!   "workEnd": "18:00",
//!   "weekendBlock": true,
//!   "waterReminder": true,
//!   "statusAnimation": true,
//!   "breakReminder": true,
//!   "breakIntervalMinutes": 50,
//!   "idleResetMinutes": 5
//! }
//! ```
//!
//! ## Lenient Reading
//!
//! Each key is read on its own. A value of the wrong type or an unparseable
//! time falls back to the default for that key only, and is never reported
//! to the user. Numeric values are clamped to their minimum
//! (`breakIntervalMinutes >= 10`, `idleResetMinutes >= 1`).
//!
//! ```rust,no_run
//! use care::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.enabled = !config.enabled;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::time_of_day::TimeOfDay;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::SystemTime;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_WORK_START: TimeOfDay = TimeOfDay { hour: 9, minute: 0 };
pub const DEFAULT_WORK_END: TimeOfDay = TimeOfDay { hour: 18, minute: 0 };
pub const DEFAULT_BREAK_INTERVAL_MINUTES: u64 = 50;
pub const MIN_BREAK_INTERVAL_MINUTES: u64 = 10;
pub const DEFAULT_IDLE_RESET_MINUTES: u64 = 5;
pub const MIN_IDLE_RESET_MINUTES: u64 = 1;

/// Immutable snapshot of the user's settings.
///
/// The watcher loads one snapshot at startup and swaps it wholesale whenever
/// the file changes; nothing mutates a snapshot in place while evaluating.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Master switch. When off the watcher stops all timers and shows a
    /// paused status.
    pub enabled: bool,

    /// Start of the working day, canonical `H:MM`.
    #[serde(with = "time_of_day_string")]
    pub work_start: TimeOfDay,

    /// End of the working day, canonical `H:MM`.
    #[serde(with = "time_of_day_string")]
    pub work_end: TimeOfDay,

    /// Undo edits on Saturdays and Sundays unless coding was allowed for today.
    pub weekend_block: bool,

    /// Hourly water reminder (fires at minute 31 on a keystroke).
    pub water_reminder: bool,

    /// Animate the default status line.
    pub status_animation: bool,

    /// Remind about a break after a long uninterrupted session.
    pub break_reminder: bool,

    /// Continuous coding time in minutes before the break reminder fires.
    pub break_interval_minutes: u64,

    /// Minutes without typing after which the user counts as idle.
    pub idle_reset_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            enabled: true,
            work_start: DEFAULT_WORK_START,
            work_end: DEFAULT_WORK_END,
            weekend_block: true,
            water_reminder: true,
            status_animation: true,
            break_reminder: true,
            break_interval_minutes: DEFAULT_BREAK_INTERVAL_MINUTES,
            idle_reset_minutes: DEFAULT_IDLE_RESET_MINUTES,
        }
    }
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// A missing file yields the defaults. A file that is not JSON at all is
    /// an error; individual malformed values are replaced by their defaults.
    pub fn read() -> Result<Config> {
        let config_file_path = Self::path()?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let value: Value = serde_json::from_str(&config_str)?;
        Ok(Config::from_value(&value))
    }

    /// Builds a configuration from a raw JSON document, key by key.
    pub fn from_value(value: &Value) -> Config {
        let defaults = Config::default();
        let flag = |key: &str, default: bool| value.get(key).and_then(Value::as_bool).unwrap_or(default);

        Config {
            enabled: flag("enabled", defaults.enabled),
            work_start: TimeOfDay::normalize(value.get("workStart"), defaults.work_start),
            work_end: TimeOfDay::normalize(value.get("workEnd"), defaults.work_end),
            weekend_block: flag("weekendBlock", defaults.weekend_block),
            water_reminder: flag("waterReminder", defaults.water_reminder),
            status_animation: flag("statusAnimation", defaults.status_animation),
            break_reminder: flag("breakReminder", defaults.break_reminder),
            break_interval_minutes: clamp_minutes(value.get("breakIntervalMinutes"), DEFAULT_BREAK_INTERVAL_MINUTES, MIN_BREAK_INTERVAL_MINUTES),
            idle_reset_minutes: clamp_minutes(value.get("idleResetMinutes"), DEFAULT_IDLE_RESET_MINUTES, MIN_IDLE_RESET_MINUTES),
        }
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file = File::create(Self::path()?)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file, returning whether one existed.
    pub fn delete() -> Result<bool> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    pub fn path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    /// Last modification time of the configuration file, if it exists.
    ///
    /// The watcher compares successive values to detect edits.
    pub fn modified() -> Option<SystemTime> {
        Self::path().ok().and_then(|path| fs::metadata(path).ok()).and_then(|meta| meta.modified().ok())
    }

    pub fn idle_reset_ms(&self) -> i64 {
        self.idle_reset_minutes as i64 * 60_000
    }

    pub fn break_interval_ms(&self) -> i64 {
        self.break_interval_minutes as i64 * 60_000
    }

    /// Runs the interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let default = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleCare);
        let work_start = Input::<String>::with_theme(&theme)
            .with_prompt(Message::PromptWorkStart.to_string())
            .default(default.work_start.to_string())
            .validate_with(validate_time)
            .interact_text()?;
        let work_end = Input::<String>::with_theme(&theme)
            .with_prompt(Message::PromptWorkEnd.to_string())
            .default(default.work_end.to_string())
            .validate_with(validate_time)
            .interact_text()?;

        let mut config = Config {
            enabled: default.enabled,
            work_start: TimeOfDay::parse(&work_start).unwrap_or(default.work_start),
            work_end: TimeOfDay::parse(&work_end).unwrap_or(default.work_end),
            weekend_block: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptWeekendBlock.to_string())
                .default(default.weekend_block)
                .interact()?,
            water_reminder: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptWaterReminder.to_string())
                .default(default.water_reminder)
                .interact()?,
            status_animation: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptStatusAnimation.to_string())
                .default(default.status_animation)
                .interact()?,
            break_reminder: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptBreakReminder.to_string())
                .default(default.break_reminder)
                .interact()?,
            break_interval_minutes: default.break_interval_minutes,
            idle_reset_minutes: Input::with_theme(&theme)
                .with_prompt(Message::PromptIdleReset.to_string())
                .default(default.idle_reset_minutes)
                .interact_text()?,
        };

        if config.break_reminder {
            config.break_interval_minutes = Input::with_theme(&theme)
                .with_prompt(Message::PromptBreakInterval.to_string())
                .default(default.break_interval_minutes)
                .interact_text()?;
        }

        config.break_interval_minutes = config.break_interval_minutes.max(MIN_BREAK_INTERVAL_MINUTES);
        config.idle_reset_minutes = config.idle_reset_minutes.max(MIN_IDLE_RESET_MINUTES);
        Ok(config)
    }
}

fn validate_time(input: &String) -> std::result::Result<(), String> {
    match TimeOfDay::parse(input) {
        Some(_) => Ok(()),
        None => Err(Message::InvalidTimeOfDay(input.clone()).to_string()),
    }
}

/// Reads a minute count leniently: numbers and numeric strings are accepted,
/// anything else yields `default`, and the result never drops below `min`.
fn clamp_minutes(value: Option<&Value>, default: u64, min: u64) -> u64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(minutes) if minutes.is_finite() => (minutes.max(min as f64)) as u64,
        _ => default,
    }
}

mod time_of_day_string {
    use super::TimeOfDay;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &TimeOfDay, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeOfDay, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw}")))
    }
}
