#[cfg(test)]
mod tests {
    use care::libs::config::Config;
    use care::libs::controls::Controls;
    use care::libs::report::{is_open, set_open, spawn_detached, write_report, ReportSnapshot, REPORT_FILE_NAME};
    use care::libs::stats::{DayStats, StatsLog};
    use care::libs::store::{KeyValueStore, MemoryStore, STATS_KEY};
    use care::libs::time_of_day::Moment;
    use care::libs::view::View;
    use chrono::{Local, TimeZone};
    use std::process::Command;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ReportTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ReportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ReportTestContext { _temp_dir: temp_dir }
        }
    }

    fn monday(h: u32, mi: u32) -> Moment {
        Moment::from(Local.with_ymd_and_hms(2025, 6, 16, h, mi, 0).single().unwrap())
    }

    fn stats() -> DayStats {
        DayStats {
            active_ms: 125 * 60_000,
            break_count: 4,
        }
    }

    #[test]
    fn test_snapshot_labels() {
        let now = monday(15, 0);
        let controls = Controls {
            snooze_until_ms: now.ms() + 30 * 60_000,
            allowed_coding_date_key: "2025-06-16".to_string(),
        };
        let snapshot = ReportSnapshot::new(&Config::default(), &controls, stats(), now);

        assert_eq!(snapshot.date_key, "2025-06-16");
        assert_eq!(snapshot.active_label(), "2h 5m");
        assert_eq!(snapshot.snooze_label(), "15:30");
        assert_eq!(snapshot.enabled_label(), "ON");
        assert_eq!(snapshot.break_reminder_label(), "ON (50m)");
        assert_eq!(snapshot.allowed_label(), "YES");
    }

    #[test]
    fn test_snapshot_without_overrides() {
        let now = monday(15, 0);
        let config = Config {
            enabled: false,
            break_reminder: false,
            ..Config::default()
        };
        let controls = Controls {
            snooze_until_ms: now.ms() - 60_000,
            allowed_coding_date_key: "2025-06-14".to_string(),
        };
        let snapshot = ReportSnapshot::new(&config, &controls, DayStats::default(), now);

        assert_eq!(snapshot.snooze_until_ms, None);
        assert_eq!(snapshot.snooze_label(), "—");
        assert_eq!(snapshot.enabled_label(), "OFF");
        assert_eq!(snapshot.break_reminder_label(), "OFF");
        assert_eq!(snapshot.allowed_label(), "NO");
        assert_eq!(snapshot.active_label(), "0m");
    }

    #[test]
    fn test_render_html() {
        let snapshot = ReportSnapshot::new(&Config::default(), &Controls::default(), stats(), monday(15, 0));
        let html = snapshot.render_html();

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("care · Today (2025-06-16)"));
        assert!(html.contains("<div class=\"v\">2h 5m</div>"));
        assert!(html.contains("<div class=\"v\">4</div>"));
        assert!(html.contains("Work: 9:00 ~ 18:00"));
        assert!(html.contains("Break reminder: ON (50m)"));
        assert!(html.contains("Idle reset: 5m"));
        assert!(html.contains("data-command=\"care snooze 10\""));
        assert!(html.contains("data-command=\"care allow-today\""));
    }

    #[test]
    fn test_snapshot_from_store() {
        let mut store = MemoryStore::new();
        let mut log = StatsLog::new();
        log.insert("2025-06-15".to_string(), DayStats { active_ms: 1, break_count: 1 });
        log.insert("2025-06-16".to_string(), stats());
        store.set_as(STATS_KEY, &log).unwrap();

        let snapshot = ReportSnapshot::from_store(&store, &Config::default(), monday(16, 0)).unwrap();
        assert_eq!(snapshot.stats, stats());
        assert!(!snapshot.allowed_today);
    }

    #[test]
    fn test_report_open_flag() {
        let mut store = MemoryStore::new();
        assert!(!is_open(&store).unwrap());
        set_open(&mut store, true).unwrap();
        assert!(is_open(&store).unwrap());
        set_open(&mut store, false).unwrap();
        assert!(!is_open(&store).unwrap());
    }

    #[test]
    fn test_view_tables() {
        let snapshot = ReportSnapshot::new(&Config::default(), &Controls::default(), stats(), monday(15, 0));
        assert_eq!(View::report_table(&snapshot).len(), 2);

        let mut log = StatsLog::new();
        log.insert("2025-06-14".to_string(), DayStats::default());
        log.insert("2025-06-16".to_string(), stats());
        log.insert("2025-06-15".to_string(), DayStats::default());
        let table = View::stats_table(&log);
        assert_eq!(table.len(), 4);
        let newest = table.get_row(1).unwrap();
        assert_eq!(newest.get_cell(0).unwrap().get_content(), "2025-06-16");
        assert_eq!(newest.get_cell(1).unwrap().get_content(), "2h 5m");
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_write_report(_ctx: &mut ReportTestContext) {
        let snapshot = ReportSnapshot::new(&Config::default(), &Controls::default(), stats(), monday(15, 0));
        let path = write_report(&snapshot).unwrap();
        assert!(path.ends_with(REPORT_FILE_NAME));
        assert_eq!(std::fs::read_to_string(path).unwrap(), snapshot.render_html());
    }

    #[test]
    fn test_spawned_helper_is_reaped() {
        let mut command = Command::new(std::env::current_exe().unwrap());
        command.arg("--list");
        let waiter = spawn_detached(&mut command).unwrap();
        let status = waiter.join().unwrap().unwrap();
        assert!(status.success());
    }
}
