#[cfg(test)]
mod tests {
    use care::libs::stats::DayStats;
    use care::libs::time_of_day::TimeOfDay;
    use care::libs::tracker::{BreakCheck, Session};

    const MINUTE: i64 = 60_000;
    const IDLE_RESET: i64 = 5 * MINUTE;
    // 2025-06-16 10:00 UTC; only differences matter here.
    const T0: i64 = 1_750_068_000_000;

    fn check(now_ms: i64) -> BreakCheck {
        BreakCheck {
            enabled: true,
            snoozed: false,
            focused: true,
            now_ms,
            now_minutes: 10 * 60 + ((now_ms - T0) / MINUTE) as u32,
            work_start: TimeOfDay::new(9, 0).unwrap(),
            work_end: TimeOfDay::new(18, 0).unwrap(),
            interval_ms: 50 * MINUTE,
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(T0);
        assert!(session.idle);
        assert!(session.is_idle_at(T0, IDLE_RESET));
        assert_eq!(session.session_minutes(T0), None);
    }

    #[test]
    fn test_typing_starts_session() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_typing(T0, IDLE_RESET, &mut stats);
        assert!(!session.idle);
        assert_eq!(session.session_start_at_ms, Some(T0));
        assert_eq!(stats.break_count, 0);
        assert_eq!(session.session_minutes(T0 + 12 * MINUTE), Some(12));
    }

    #[test]
    fn test_tick_counts_break_once() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_typing(T0, IDLE_RESET, &mut stats);

        session.on_tick(T0 + 6 * MINUTE, true, IDLE_RESET, &mut stats);
        assert_eq!(stats.break_count, 1);
        assert!(session.idle);
        assert_eq!(session.session_start_at_ms, None);

        // The keystroke ending the same gap does not count it again.
        session.on_typing(T0 + 7 * MINUTE, IDLE_RESET, &mut stats);
        assert_eq!(stats.break_count, 1);
        assert_eq!(session.session_start_at_ms, Some(T0 + 7 * MINUTE));
    }

    #[test]
    fn test_typing_counts_gap_no_tick_saw() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_typing(T0, IDLE_RESET, &mut stats);
        session.on_typing(T0 + 7 * MINUTE, IDLE_RESET, &mut stats);
        assert_eq!(stats.break_count, 1);
        assert_eq!(session.session_start_at_ms, Some(T0 + 7 * MINUTE));

        session.on_tick(T0 + 8 * MINUTE, true, IDLE_RESET, &mut stats);
        assert_eq!(stats.break_count, 1);
    }

    #[test]
    fn test_short_gap_is_not_a_break() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_typing(T0, IDLE_RESET, &mut stats);
        session.on_typing(T0 + 5 * MINUTE, IDLE_RESET, &mut stats);
        assert_eq!(stats.break_count, 0);
        assert_eq!(session.session_start_at_ms, Some(T0));
    }

    #[test]
    fn test_no_break_before_first_keystroke() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_tick(T0 + 30 * MINUTE, true, IDLE_RESET, &mut stats);
        assert_eq!(stats.break_count, 0);
        assert_eq!(stats.active_ms, 0);
    }

    #[test]
    fn test_active_time_needs_focus_and_activity() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_typing(T0, IDLE_RESET, &mut stats);

        session.on_tick(T0 + MINUTE, true, IDLE_RESET, &mut stats);
        assert_eq!(stats.active_ms, MINUTE as u64);

        session.on_tick(T0 + 2 * MINUTE, false, IDLE_RESET, &mut stats);
        assert_eq!(stats.active_ms, MINUTE as u64);

        // Idle by now: nothing accrues.
        session.on_tick(T0 + 10 * MINUTE, true, IDLE_RESET, &mut stats);
        assert_eq!(stats.active_ms, MINUTE as u64);
    }

    #[test]
    fn test_break_reminder_fires_once_per_session() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_typing(T0, IDLE_RESET, &mut stats);

        assert!(!session.take_break_reminder(&check(T0 + 49 * MINUTE)));
        assert!(session.take_break_reminder(&check(T0 + 50 * MINUTE)));
        assert!(!session.take_break_reminder(&check(T0 + 51 * MINUTE)));

        // A new session after a gap re-arms it.
        session.on_typing(T0 + 60 * MINUTE, IDLE_RESET, &mut stats);
        assert!(!session.break_reminder_shown);
        assert!(session.take_break_reminder(&check(T0 + 110 * MINUTE)));
    }

    #[test]
    fn test_break_reminder_conditions() {
        let mut session = Session::new(T0);
        let mut stats = DayStats::default();
        session.on_typing(T0, IDLE_RESET, &mut stats);
        let due = T0 + 55 * MINUTE;

        let mut disabled = check(due);
        disabled.enabled = false;
        assert!(!session.take_break_reminder(&disabled));

        let mut snoozed = check(due);
        snoozed.snoozed = true;
        assert!(!session.take_break_reminder(&snoozed));

        let mut unfocused = check(due);
        unfocused.focused = false;
        assert!(!session.take_break_reminder(&unfocused));

        let mut after_hours = check(due);
        after_hours.now_minutes = 19 * 60;
        assert!(!session.take_break_reminder(&after_hours));

        assert!(session.take_break_reminder(&check(due)));
    }
}
