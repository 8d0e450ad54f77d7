//! Display implementation for care messages.
//!
//! All user-facing console text lives here, one arm per [`Message`]
//! variant, so wording stays consistent across commands and the watcher.
//!
//! ```rust
//! use care::libs::messages::Message;
//!
//! assert_eq!(Message::MenuSnooze(30).to_string(), "Snooze 30 minutes");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted, defaults are in effect".to_string(),
            Message::ConfigNotFound => "No configuration file found, defaults are in effect".to_string(),
            Message::ConfigModuleCare => "Work day settings".to_string(),
            Message::ConfigReloaded => "Configuration changed, reloading".to_string(),
            Message::ConfigReloadFailed(error) => format!("Failed to reload configuration: {}", error),
            Message::InvalidTimeOfDay(input) => format!("'{}' is not a time of day, use H:MM (e.g. 9:00)", input),

            // === PROMPTS ===
            Message::PromptWorkStart => "Work starts at (H:MM)".to_string(),
            Message::PromptWorkEnd => "Work ends at (H:MM)".to_string(),
            Message::PromptWeekendBlock => "Undo edits on weekends?".to_string(),
            Message::PromptWaterReminder => "Remind to drink water every hour?".to_string(),
            Message::PromptStatusAnimation => "Animate the status line?".to_string(),
            Message::PromptBreakReminder => "Remind to take breaks?".to_string(),
            Message::PromptBreakInterval => "Minutes of continuous coding before a break reminder (min 10)".to_string(),
            Message::PromptIdleReset => "Minutes without typing that count as a break (min 1)".to_string(),

            // === CONTROL MESSAGES ===
            Message::CareEnabled => "care is enabled".to_string(),
            Message::CarePaused => "care is paused".to_string(),
            Message::SnoozedUntil(until) => format!("Notifications snoozed until {}", until),
            Message::SnoozeResumed => "Notifications resumed".to_string(),
            Message::CodingAllowedToday => "Weekend coding allowed for today".to_string(),
            Message::CommandQueued(command) => format!("Sent {} to the running watcher", command),

            // === MENU ===
            Message::MenuTitle => "care".to_string(),
            Message::MenuPause => "Pause care".to_string(),
            Message::MenuResume => "Resume care".to_string(),
            Message::MenuResumeNotifications => "Resume notifications".to_string(),
            Message::MenuSnooze(minutes) => format!("Snooze {} minutes", minutes),
            Message::MenuOpenReport => "Open today report".to_string(),
            Message::MenuAllowToday => "Allow weekend coding today".to_string(),
            Message::MenuOpenSettings => "Open settings".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportHeader(date) => format!("Report for {}", date),
            Message::ReportWritten(path) => format!("Report written to {}", path),
            Message::ReportOpenFailed(error) => format!("Failed to open the report: {}", error),
            Message::ReportClosed => "Report closed".to_string(),
            Message::StatsHeader => "Daily activity (last 30 days)".to_string(),
            Message::NoStatsRecorded => "No activity recorded yet".to_string(),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted { work_start, work_end } => {
                format!("Watcher is running, work day {} ~ {}", work_start, work_end)
            }
            Message::MonitorExitedNormally => "Watcher exited normally".to_string(),
            Message::MonitorShuttingDown => "Shutting down watcher...".to_string(),
            Message::MonitorError(error) => format!("Watcher error: {}", error),
            Message::MonitorTaskPanicked(error) => format!("Watcher task panicked: {}", error),
            Message::KeyboardListenFailed(error) => format!("Failed to listen for keyboard events: {}. Retrying in 1 second...", error),
            Message::UndoSimulationFailed(error) => format!("Failed to undo the weekend edit: {}", error),
            Message::NotificationFailed(error) => format!("Failed to show notification: {}", error),
            Message::EvaluationFailed(error) => format!("Failed to update state: {}", error),
            Message::StatsFlushed(date) => format!("Stats for {} saved", date),

            // === WATCHER / DAEMON MESSAGES ===
            Message::WatcherStarted(pid) => format!("Watcher started in the background (PID: {}).", pid),
            Message::WatcherStopped(pid) => format!("Watcher process (PID: {}) stopped successfully.", pid),
            Message::WatcherNotRunning => "Watcher is not running.".to_string(),
            Message::WatcherNotRunningPidNotFound => "Watcher does not appear to be running (PID file not found).".to_string(),
            Message::WatcherStartingForeground => "Starting watcher in foreground... Press Ctrl+C to exit.".to_string(),
            Message::WatcherStoppingExisting(pid) => format!("Stopping existing watcher (PID: {})...", pid),
            Message::WatcherFailedToStopExisting(error) => format!("Warning: Failed to stop existing watcher: {}", error),
            Message::WatcherFailedToStop(pid) => format!("Failed to stop watcher process (PID: {})", pid),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Warning: Signal handling not supported on this platform".to_string(),
            Message::DaemonModeNotSupported => "Daemon mode is not supported on this platform.".to_string(),
            Message::FailedToGetCurrentExecutable => "Failed to get current executable path".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
            Message::InvalidPidFileContent => "Invalid PID file content".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process: error code {}", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process: error code {}", code),
            Message::ProcessTerminationNotSupported => "Process termination not supported on this platform".to_string(),
        };

        write!(f, "{}", text)
    }
}
