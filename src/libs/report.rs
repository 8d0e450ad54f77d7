//! Today report: a snapshot of the day rendered as an HTML page.
//!
//! The page shows active time, break count, enabled state, snooze deadline
//! and a config summary, plus one button per command. A static page cannot
//! call back into the watcher, so each button copies its `care ...` command
//! line to the clipboard.
//!
//! `care report` writes the page and marks the report as open; while it is
//! open the watcher rewrites it after every evaluation.

use crate::libs::config::Config;
use crate::libs::controls::Controls;
use crate::libs::data_storage::DataStorage;
use crate::libs::formatter::format_active;
use crate::libs::stats::{history, DayStats};
use crate::libs::store::{KeyValueStore, StoreError, REPORT_OPEN_KEY};
use crate::libs::time_of_day::{clock_label, Moment, TimeOfDay};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

pub const REPORT_FILE_NAME: &str = "report.html";

/// Buttons rendered on the page: label and the command line they copy.
const REPORT_ACTIONS: &[(&str, &str)] = &[
    ("Toggle enabled", "care toggle"),
    ("Refresh", "care report"),
    ("Snooze 10m", "care snooze 10"),
    ("Resume", "care resume"),
    ("Allow today", "care allow-today"),
    ("Settings", "care init"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSnapshot {
    pub date_key: String,
    pub stats: DayStats,
    pub enabled: bool,
    /// Present only while snoozed.
    pub snooze_until_ms: Option<i64>,
    pub work_start: TimeOfDay,
    pub work_end: TimeOfDay,
    pub break_reminder: bool,
    pub break_interval_minutes: u64,
    pub idle_reset_minutes: u64,
    pub allowed_today: bool,
}

impl ReportSnapshot {
    pub fn new(config: &Config, controls: &Controls, stats: DayStats, moment: Moment) -> Self {
        let date_key = moment.date_key();
        Self {
            stats,
            enabled: config.enabled,
            snooze_until_ms: controls.is_snoozed(moment.ms()).then_some(controls.snooze_until_ms),
            work_start: config.work_start,
            work_end: config.work_end,
            break_reminder: config.break_reminder,
            break_interval_minutes: config.break_interval_minutes,
            idle_reset_minutes: config.idle_reset_minutes,
            allowed_today: controls.is_allowed_today(&date_key),
            date_key,
        }
    }

    /// Builds a snapshot from persisted state only, for use without a watcher.
    pub fn from_store<S: KeyValueStore>(store: &S, config: &Config, moment: Moment) -> Result<Self, StoreError> {
        let controls = Controls::load(store)?;
        let stats = history(store)?.remove(&moment.date_key()).unwrap_or_default();
        Ok(Self::new(config, &controls, stats, moment))
    }

    pub fn active_label(&self) -> String {
        format_active(self.stats.active_ms)
    }

    pub fn snooze_label(&self) -> String {
        self.snooze_until_ms.map(clock_label).unwrap_or_else(|| "—".to_string())
    }

    pub fn enabled_label(&self) -> &'static str {
        if self.enabled {
            "ON"
        } else {
            "OFF"
        }
    }

    pub fn break_reminder_label(&self) -> String {
        if self.break_reminder {
            format!("ON ({}m)", self.break_interval_minutes)
        } else {
            "OFF".to_string()
        }
    }

    pub fn allowed_label(&self) -> &'static str {
        if self.allowed_today {
            "YES"
        } else {
            "NO"
        }
    }

    pub fn render_html(&self) -> String {
        let buttons: String = REPORT_ACTIONS
            .iter()
            .map(|(label, command)| format!("    <button data-command=\"{command}\">{label}</button>\n"))
            .collect();

        format!(
            r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>care · {date}</title>
  <style>
    :root {{ color-scheme: light dark; }}
    body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; padding: 16px; line-height: 1.5; }}
    .grid {{ display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin: 12px 0 16px; }}
    .card {{ border: 1px solid color-mix(in srgb, currentColor 18%, transparent); border-radius: 10px; padding: 12px; }}
    .k {{ opacity: 0.75; font-size: 12px; margin-bottom: 4px; }}
    .v {{ font-size: 20px; font-weight: 600; }}
    .btns {{ display: flex; flex-wrap: wrap; gap: 8px; margin-top: 12px; }}
    button {{ padding: 6px 10px; border-radius: 8px; border: 1px solid color-mix(in srgb, currentColor 20%, transparent); background: color-mix(in srgb, currentColor 6%, transparent); color: inherit; cursor: pointer; }}
    .hint {{ opacity: 0.75; font-size: 12px; margin-top: 10px; }}
  </style>
</head>
<body>
  <h2>care · Today ({date})</h2>
  <div class="grid">
    <div class="card"><div class="k">Approx. active coding</div><div class="v">{active}</div></div>
    <div class="card"><div class="k">Breaks detected</div><div class="v">{breaks}</div></div>
    <div class="card"><div class="k">Enabled</div><div class="v">{enabled}</div></div>
    <div class="card"><div class="k">Snoozed until</div><div class="v">{snooze}</div></div>
  </div>
  <div class="card">
    <div class="k">Config</div>
    <div>Work: {start} ~ {end}</div>
    <div>Break reminder: {reminder}</div>
    <div>Idle reset: {idle}m</div>
    <div>Weekend allowed today: {allowed}</div>
  </div>
  <div class="btns">
{buttons}  </div>
  <div class="hint">Active time is estimated from recent typing. Buttons copy the matching command.</div>
  <script>
    document.querySelectorAll('button[data-command]').forEach((button) => {{
      button.addEventListener('click', () => navigator.clipboard?.writeText(button.dataset.command))
    }})
  </script>
</body>
</html>
"#,
            date = self.date_key,
            active = self.active_label(),
            breaks = self.stats.break_count,
            enabled = self.enabled_label(),
            snooze = self.snooze_label(),
            start = self.work_start,
            end = self.work_end,
            reminder = self.break_reminder_label(),
            idle = self.idle_reset_minutes,
            allowed = self.allowed_label(),
            buttons = buttons,
        )
    }
}

pub fn report_path() -> Result<PathBuf, StoreError> {
    Ok(DataStorage::new().get_path(REPORT_FILE_NAME)?)
}

/// Writes the page, returning its path.
pub fn write_report(snapshot: &ReportSnapshot) -> Result<PathBuf, StoreError> {
    let path = report_path()?;
    fs::write(&path, snapshot.render_html())?;
    Ok(path)
}

pub fn is_open<S: KeyValueStore>(store: &S) -> Result<bool, StoreError> {
    Ok(store.get_as::<bool>(REPORT_OPEN_KEY)?.unwrap_or(false))
}

pub fn set_open<S: KeyValueStore>(store: &mut S, open: bool) -> Result<(), StoreError> {
    store.set_as(REPORT_OPEN_KEY, &open)
}

/// Opens the page with the platform's default handler.
pub fn open_in_browser(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(windows)]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut command = Command::new("xdg-open");

    command.arg(path);
    spawn_detached(&mut command)?;
    Ok(())
}

/// Starts `command` with its output discarded and reaps it on a helper
/// thread, so a long-running watcher does not collect zombie children.
pub fn spawn_detached(command: &mut Command) -> std::io::Result<JoinHandle<std::io::Result<ExitStatus>>> {
    let mut child = command.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
    Ok(std::thread::spawn(move || child.wait()))
}
