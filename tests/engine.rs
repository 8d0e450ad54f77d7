#[cfg(test)]
mod tests {
    use care::libs::config::Config;
    use care::libs::engine::{BreakChoice, Command, EditReason, Engine, FollowUp, Intent, Notice, Question, Status};
    use care::libs::engine::Trigger;
    use care::libs::holiday::special_day;
    use care::libs::phase::MessageCategory;
    use care::libs::stats::{history, DayStats};
    use care::libs::store::MemoryStore;
    use care::libs::time_of_day::{Moment, TimeOfDay};
    use chrono::{Local, TimeZone};

    const TYPING: Trigger = Trigger::Typing(EditReason::User);

    fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Moment {
        Moment::from(Local.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap())
    }

    /// Monday 2025-06-16.
    fn monday(h: u32, mi: u32, s: u32) -> Moment {
        moment(2025, 6, 16, h, mi, s)
    }

    /// Saturday 2025-06-14.
    fn saturday(h: u32, mi: u32, s: u32) -> Moment {
        moment(2025, 6, 14, h, mi, s)
    }

    fn engine_at(at: Moment) -> Engine<MemoryStore> {
        Engine::new(Config::default(), MemoryStore::new(), at).unwrap()
    }

    fn phase_status(category: MessageCategory) -> Intent {
        Intent::SetStatus(Status::Phase(category))
    }

    #[test]
    fn test_weekend_typing_is_undone_and_asks() {
        let at = saturday(10, 0, 0);
        let mut engine = engine_at(at);

        let intents = engine.evaluate(TYPING, at, true).unwrap();
        assert!(intents.contains(&Intent::SetStatus(Status::WeekendBlock)));
        assert!(intents.contains(&Intent::Undo));
        let question = Question::KeepCoding {
            date_key: "2025-06-14".to_string(),
        };
        assert!(intents.contains(&Intent::Ask(question)));

        let resolved = engine
            .resolve(
                FollowUp::KeepCoding {
                    date_key: "2025-06-14".to_string(),
                    allow: true,
                },
                at,
                true,
            )
            .unwrap();
        assert!(resolved.is_empty());

        let later = saturday(10, 1, 0);
        let intents = engine.evaluate(TYPING, later, true).unwrap();
        assert!(intents.contains(&Intent::SetStatus(Status::WeekendBlock)));
        assert!(!intents.contains(&Intent::Undo));
        assert!(!intents.iter().any(|i| matches!(i, Intent::Ask(_))));
    }

    #[test]
    fn test_weekend_question_waits_for_answer() {
        let mut engine = engine_at(saturday(10, 0, 0));
        let question = Intent::Ask(Question::KeepCoding {
            date_key: "2025-06-14".to_string(),
        });

        let mut asked = 0;
        let mut undone = 0;
        for second in 0..5 {
            let intents = engine.evaluate(TYPING, saturday(10, 0, second), true).unwrap();
            asked += intents.iter().filter(|i| **i == question).count();
            undone += intents.iter().filter(|i| **i == Intent::Undo).count();
        }
        assert_eq!(asked, 1);
        assert_eq!(undone, 5);

        // Dismissed: the block stays and the question may be asked again.
        let resolved = engine
            .resolve(
                FollowUp::KeepCoding {
                    date_key: "2025-06-14".to_string(),
                    allow: false,
                },
                saturday(10, 1, 0),
                true,
            )
            .unwrap();
        assert!(resolved.is_empty());
        assert!(!engine.state().controls.is_allowed_today("2025-06-14"));

        let intents = engine.evaluate(TYPING, saturday(10, 1, 10), true).unwrap();
        assert!(intents.contains(&Intent::Undo));
        assert!(intents.contains(&question));
    }

    #[test]
    fn test_allow_today_command() {
        let at = saturday(11, 0, 0);
        let mut engine = engine_at(at);

        let intents = engine.apply(Command::AllowToday, at, true).unwrap();
        assert_eq!(intents[0], Intent::Notify(Notice::AllowedToday));
        assert!(engine.state().controls.is_allowed_today("2025-06-14"));

        let intents = engine.evaluate(TYPING, saturday(11, 2, 0), true).unwrap();
        assert!(!intents.contains(&Intent::Undo));

        // Allowing Saturday says nothing about Sunday.
        let intents = engine.evaluate(TYPING, moment(2025, 6, 15, 11, 0, 0), true).unwrap();
        assert!(intents.contains(&Intent::Undo));
    }

    #[test]
    fn test_snoozed_weekend_undoes_without_asking() {
        let at = saturday(10, 0, 0);
        let mut engine = engine_at(at);
        engine.apply(Command::Snooze { minutes: 30 }, at, true).unwrap();

        let intents = engine.evaluate(TYPING, saturday(10, 1, 0), true).unwrap();
        assert!(intents.contains(&Intent::Undo));
        assert!(!intents.iter().any(|i| matches!(i, Intent::Ask(_))));
    }

    #[test]
    fn test_weekend_block_can_be_turned_off() {
        let at = saturday(10, 0, 0);
        let config = Config {
            weekend_block: false,
            ..Config::default()
        };
        let mut engine = Engine::new(config, MemoryStore::new(), at).unwrap();
        let intents = engine.evaluate(TYPING, at, true).unwrap();
        assert!(!intents.contains(&Intent::Undo));
        assert!(!intents.contains(&Intent::SetStatus(Status::WeekendBlock)));
    }

    #[test]
    fn test_programmatic_edits_are_ignored() {
        let at = saturday(10, 0, 0);
        let mut engine = engine_at(at);
        let intents = engine.evaluate(Trigger::Typing(EditReason::Programmatic), at, true).unwrap();
        assert!(intents.is_empty());
        assert_eq!(engine.state().session.last_typing_at_ms, None);
    }

    #[test]
    fn test_disabled_engine_is_paused() {
        let at = monday(10, 30, 0);
        let config = Config {
            enabled: false,
            ..Config::default()
        };
        let mut engine = Engine::new(config, MemoryStore::new(), at).unwrap();

        let intents = engine.activate(at, true).unwrap();
        assert_eq!(intents, vec![Intent::SnoozedContext(false), Intent::ShowPaused]);
        assert!(engine.evaluate(TYPING, at, true).unwrap().is_empty());
        assert!(engine.evaluate(Trigger::Timer, at, true).unwrap().is_empty());
    }

    #[test]
    fn test_reconfigure_toggles_pause() {
        let at = monday(15, 0, 0);
        let mut engine = engine_at(at);

        let disabled = Config {
            enabled: false,
            ..Config::default()
        };
        assert_eq!(engine.reconfigure(disabled, at, true).unwrap(), vec![Intent::ShowPaused]);

        let intents = engine.reconfigure(Config::default(), at, true).unwrap();
        assert_eq!(intents[0], Intent::IdleStatus { animate: true });
    }

    #[test]
    fn test_early_arrival_greets() {
        let at = monday(8, 30, 0);
        let mut engine = engine_at(at);
        let intents = engine.evaluate(Trigger::Timer, at, true).unwrap();
        assert!(intents.contains(&Intent::StopAnimation));
        assert!(intents.contains(&phase_status(MessageCategory::Greeting)));
    }

    #[test]
    fn test_morning_quiet_shows_slack_off() {
        let at = monday(9, 45, 0);
        let mut engine = engine_at(at);
        let intents = engine.evaluate(TYPING, at, true).unwrap();
        assert!(intents.contains(&phase_status(MessageCategory::SlackOff)));
    }

    #[test]
    fn test_thursday_pre_lunch() {
        let at = moment(2025, 6, 19, 11, 45, 0);
        let mut engine = engine_at(at);
        let intents = engine.evaluate(Trigger::Timer, at, true).unwrap();
        assert!(intents.contains(&phase_status(MessageCategory::CrazyThursday)));
    }

    #[test]
    fn test_working_hours_show_idle_status() {
        let at = monday(15, 0, 0);
        let mut engine = engine_at(at);
        let intents = engine.evaluate(Trigger::Timer, at, true).unwrap();
        assert!(intents.contains(&Intent::IdleStatus { animate: true }));
    }

    #[test]
    fn test_gap_keeps_static_status() {
        let config = Config {
            status_animation: false,
            ..Config::default()
        };
        let mut engine = Engine::new(config, MemoryStore::new(), monday(13, 15, 0)).unwrap();

        let intents = engine.evaluate(Trigger::Timer, monday(13, 15, 0), true).unwrap();
        assert!(intents.contains(&phase_status(MessageCategory::LunchBreak)));

        let intents = engine.evaluate(Trigger::Timer, monday(13, 45, 0), true).unwrap();
        assert_eq!(intents, vec![Intent::RefreshReport]);
        let intents = engine.evaluate(TYPING, monday(13, 46, 0), true).unwrap();
        assert_eq!(intents, vec![Intent::RefreshReport]);
    }

    #[test]
    fn test_gap_restarts_animation() {
        let mut engine = engine_at(monday(13, 15, 0));
        engine.evaluate(Trigger::Timer, monday(13, 15, 0), true).unwrap();
        let intents = engine.evaluate(Trigger::Timer, monday(13, 45, 0), true).unwrap();
        assert!(intents.contains(&Intent::IdleStatus { animate: true }));
    }

    #[test]
    fn test_countdown_starts_once_then_go_home() {
        let at = monday(17, 30, 0);
        let mut engine = engine_at(at);
        let until = TimeOfDay::new(18, 0).unwrap();

        let intents = engine.evaluate(Trigger::Timer, at, true).unwrap();
        assert!(intents.contains(&Intent::StartCountdown { until }));
        assert!(engine.state().countdown_active);

        let intents = engine.evaluate(Trigger::Timer, monday(17, 31, 0), true).unwrap();
        assert!(!intents.contains(&Intent::StartCountdown { until }));

        let intents = engine.evaluate(Trigger::Timer, monday(18, 5, 0), true).unwrap();
        assert!(intents.contains(&Intent::StopCountdown));
        assert!(intents.contains(&phase_status(MessageCategory::GoHome)));
        assert!(!engine.state().countdown_active);
    }

    #[test]
    fn test_friday_go_home() {
        let at = moment(2025, 6, 20, 18, 5, 0);
        let mut engine = engine_at(at);
        let intents = engine.evaluate(Trigger::Timer, at, true).unwrap();
        assert!(intents.contains(&phase_status(MessageCategory::GoHomeFriday)));
    }

    #[test]
    fn test_overtime_question_once_per_day() {
        let at = monday(18, 30, 0);
        let mut engine = engine_at(at);

        let intents = engine.evaluate(TYPING, at, true).unwrap();
        assert!(intents.contains(&phase_status(MessageCategory::Overtime)));
        assert!(intents.contains(&Intent::Ask(Question::Overtime)));

        let intents = engine.evaluate(TYPING, monday(18, 32, 0), true).unwrap();
        assert!(intents.contains(&phase_status(MessageCategory::Overtime)));
        assert!(!intents.contains(&Intent::Ask(Question::Overtime)));
    }

    #[test]
    fn test_overtime_not_asked_on_timer() {
        let at = monday(19, 0, 0);
        let mut engine = engine_at(at);
        let intents = engine.evaluate(Trigger::Timer, at, true).unwrap();
        assert!(!intents.contains(&Intent::Ask(Question::Overtime)));
    }

    #[test]
    fn test_overtime_answer() {
        let at = monday(18, 40, 0);
        let mut engine = engine_at(at);
        let intents = engine.resolve(FollowUp::Overtime { paid: true }, at, true).unwrap();
        assert_eq!(
            intents,
            vec![
                Intent::Notify(Notice::OvertimeReply { paid: true }),
                Intent::SetStatus(Status::OvertimePaid),
            ]
        );
        let intents = engine.resolve(FollowUp::Overtime { paid: false }, at, true).unwrap();
        assert!(intents.contains(&Intent::SetStatus(Status::OvertimeUnpaid)));
    }

    #[test]
    fn test_very_late_warning_rotates() {
        let at = monday(21, 0, 0);
        let mut engine = engine_at(at);

        let intents = engine.evaluate(TYPING, at, true).unwrap();
        assert!(intents.contains(&phase_status(MessageCategory::Warning)));
        assert!(intents.contains(&Intent::Notify(Notice::Warning)));

        let intents = engine.evaluate(TYPING, monday(21, 0, 30), true).unwrap();
        assert!(!intents.contains(&Intent::Notify(Notice::Warning)));

        let intents = engine.evaluate(TYPING, monday(21, 1, 1), true).unwrap();
        assert!(intents.contains(&Intent::Notify(Notice::Warning)));
    }

    #[test]
    fn test_water_reminder_once_per_hour() {
        let at = monday(14, 31, 0);
        let mut engine = engine_at(at);

        let intents = engine.evaluate(TYPING, at, true).unwrap();
        assert!(intents.contains(&Intent::Notify(Notice::Water)));

        let intents = engine.evaluate(TYPING, monday(14, 31, 40), true).unwrap();
        assert!(!intents.contains(&Intent::Notify(Notice::Water)));

        let intents = engine.evaluate(Trigger::Timer, monday(15, 31, 0), true).unwrap();
        assert!(!intents.contains(&Intent::Notify(Notice::Water)));

        let intents = engine.evaluate(TYPING, monday(15, 31, 10), true).unwrap();
        assert!(intents.contains(&Intent::Notify(Notice::Water)));
    }

    #[test]
    fn test_snooze_and_resume() {
        let at = monday(15, 0, 0);
        let mut engine = engine_at(at);
        let until_ms = at.ms() + 10 * 60_000;

        let intents = engine.apply(Command::Snooze { minutes: 10 }, at, true).unwrap();
        assert!(intents.contains(&Intent::SnoozedContext(true)));
        assert!(intents.contains(&Intent::ShowSnoozed { until_ms }));

        // Snoozed typing suppresses phase messages too.
        let intents = engine.evaluate(TYPING, monday(15, 5, 0), true).unwrap();
        assert!(intents.contains(&Intent::ShowSnoozed { until_ms }));

        let intents = engine.apply(Command::Resume, monday(15, 6, 0), true).unwrap();
        assert!(intents.contains(&Intent::SnoozedContext(false)));
        assert!(intents.contains(&Intent::IdleStatus { animate: true }));
    }

    #[test]
    fn test_snooze_expires() {
        let at = monday(15, 0, 0);
        let mut engine = engine_at(at);
        engine.apply(Command::Snooze { minutes: 10 }, at, true).unwrap();

        let intents = engine.evaluate(Trigger::Timer, monday(15, 10, 0), true).unwrap();
        assert!(intents.contains(&Intent::SnoozedContext(false)));
        assert!(!intents.iter().any(|i| matches!(i, Intent::ShowSnoozed { .. })));
    }

    #[test]
    fn test_open_report_command() {
        let at = monday(15, 0, 0);
        let mut engine = engine_at(at);
        assert_eq!(engine.apply(Command::OpenReport, at, true).unwrap(), vec![Intent::OpenReport]);
    }

    #[test]
    fn test_holiday_banner_once() {
        let at = moment(2025, 12, 25, 10, 30, 0);
        let mut engine = engine_at(at);
        let text = special_day(12, 25).unwrap();

        let intents = engine.evaluate(Trigger::Timer, at, true).unwrap();
        assert!(intents.contains(&Intent::Notify(Notice::Holiday(text))));

        let intents = engine.evaluate(Trigger::Timer, moment(2025, 12, 25, 10, 31, 0), true).unwrap();
        assert!(!intents.iter().any(|i| matches!(i, Intent::Notify(Notice::Holiday(_)))));
    }

    #[test]
    fn test_midnight_rollover() {
        let at = monday(23, 59, 30);
        let mut engine = engine_at(at);
        engine.evaluate(TYPING, at, true).unwrap();
        engine.evaluate(Trigger::Timer, monday(23, 59, 50), true).unwrap();
        assert_eq!(engine.state().ledger.today.active_ms, 20_000);

        engine.evaluate(Trigger::Timer, moment(2025, 6, 17, 0, 0, 30), true).unwrap();
        assert_eq!(engine.state().date_key, "2025-06-17");
        assert_eq!(engine.state().ledger.today, DayStats::default());
        assert_eq!(engine.state().session.last_typing_at_ms, None);

        let log = history(engine.store()).unwrap();
        assert_eq!(log.get("2025-06-16").map(|d| d.active_ms), Some(20_000));
    }

    #[test]
    fn test_shutdown_flushes_stats() {
        let at = monday(10, 0, 0);
        let mut engine = engine_at(at);
        engine.evaluate(TYPING, at, true).unwrap();
        engine.evaluate(Trigger::Timer, monday(10, 0, 20), true).unwrap();
        assert!(history(engine.store()).unwrap().is_empty());

        engine.shutdown(monday(10, 0, 30)).unwrap();
        let log = history(engine.store()).unwrap();
        assert_eq!(log.get("2025-06-16").map(|d| d.active_ms), Some(20_000));
    }

    #[test]
    fn test_idle_gap_seen_by_tick_is_persisted_once() {
        let mut engine = engine_at(monday(10, 0, 0));
        engine.evaluate(TYPING, monday(10, 0, 0), true).unwrap();
        engine.evaluate(Trigger::Timer, monday(10, 1, 0), true).unwrap();
        // Past the five-minute threshold: the tick counts the break.
        engine.evaluate(Trigger::Timer, monday(10, 7, 0), true).unwrap();
        engine.evaluate(TYPING, monday(10, 8, 0), true).unwrap();
        engine.evaluate(Trigger::Timer, monday(10, 9, 0), true).unwrap();

        assert_eq!(engine.state().ledger.today.break_count, 1);
        let log = history(engine.store()).unwrap();
        assert_eq!(log.get("2025-06-16").map(|d| d.break_count), Some(1));
    }

    #[test]
    fn test_idle_gap_seen_by_typing_is_persisted_once() {
        let mut engine = engine_at(monday(10, 0, 0));
        engine.evaluate(TYPING, monday(10, 0, 0), true).unwrap();
        engine.evaluate(Trigger::Timer, monday(10, 1, 0), true).unwrap();
        // No tick saw the gap; the keystroke ending it counts the break.
        engine.evaluate(TYPING, monday(10, 8, 0), true).unwrap();
        engine.evaluate(Trigger::Timer, monday(10, 9, 0), true).unwrap();
        engine.evaluate(Trigger::Timer, monday(10, 10, 0), true).unwrap();

        assert_eq!(engine.state().ledger.today.break_count, 1);
        let log = history(engine.store()).unwrap();
        assert_eq!(log.get("2025-06-16").map(|d| d.break_count), Some(1));
    }

    #[test]
    fn test_break_reminder_during_long_session() {
        let start = monday(10, 0, 0);
        let mut engine = engine_at(start);

        let mut asked = Vec::new();
        for minute in 0..=53u32 {
            let at = monday(10, minute, 0);
            let trigger = if minute % 2 == 0 { TYPING } else { Trigger::Timer };
            for intent in engine.evaluate(trigger, at, true).unwrap() {
                if let Intent::Ask(question @ Question::TakeBreak { .. }) = intent {
                    asked.push(question);
                }
            }
        }

        assert_eq!(asked, vec![Question::TakeBreak { minutes: 51 }]);
        assert_eq!(engine.state().ledger.today.active_ms, 53 * 60_000);
        assert_eq!(engine.state().ledger.today.break_count, 0);
    }

    #[test]
    fn test_break_snooze_follow_up() {
        let at = monday(11, 0, 0);
        let mut engine = engine_at(at);

        let intents = engine.resolve(FollowUp::TakeBreak(BreakChoice::Snooze), at, true).unwrap();
        assert!(intents.contains(&Intent::ShowSnoozed {
            until_ms: at.ms() + 10 * 60_000
        }));

        let intents = engine.resolve(FollowUp::TakeBreak(BreakChoice::OpenReport), at, true).unwrap();
        assert_eq!(intents, vec![Intent::OpenReport]);
        assert!(engine.resolve(FollowUp::TakeBreak(BreakChoice::Dismiss), at, true).unwrap().is_empty());
    }

    #[test]
    fn test_controls_survive_restart() {
        let at = saturday(10, 0, 0);
        let mut engine = engine_at(at);
        engine.apply(Command::AllowToday, at, true).unwrap();
        engine.apply(Command::Snooze { minutes: 60 }, at, true).unwrap();

        let store = engine.store().clone();
        let restarted = Engine::new(Config::default(), store, saturday(10, 30, 0)).unwrap();
        assert!(restarted.state().controls.is_allowed_today("2025-06-14"));
        assert!(restarted.state().snoozed_context);
    }
}
