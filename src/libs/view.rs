use super::formatter::format_active;
use super::report::ReportSnapshot;
use super::stats::StatsLog;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Today's numbers and the settings they were measured under.
    pub fn report(snapshot: &ReportSnapshot) -> Result<()> {
        Self::report_table(snapshot).printstd();
        Ok(())
    }

    pub fn report_table(snapshot: &ReportSnapshot) -> Table {
        let mut table = Table::new();
        table.add_row(row!["ACTIVE", "BREAKS", "ENABLED", "SNOOZED UNTIL", "WORK", "BREAK REMINDER", "IDLE RESET", "WEEKEND ALLOWED"]);
        table.add_row(row![
            snapshot.active_label(),
            snapshot.stats.break_count,
            snapshot.enabled_label(),
            snapshot.snooze_label(),
            format!("{} ~ {}", snapshot.work_start, snapshot.work_end),
            snapshot.break_reminder_label(),
            format!("{}m", snapshot.idle_reset_minutes),
            snapshot.allowed_label()
        ]);
        table
    }

    /// Retained history, newest day first.
    pub fn stats(log: &StatsLog) -> Result<()> {
        Self::stats_table(log).printstd();
        Ok(())
    }

    pub fn stats_table(log: &StatsLog) -> Table {
        let mut table = Table::new();
        table.add_row(row!["DATE", "ACTIVE", "BREAKS"]);
        for (date_key, stats) in log.iter().rev() {
            table.add_row(row![date_key, format_active(stats.active_ms), stats.break_count]);
        }
        table
    }
}
