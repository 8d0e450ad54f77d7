//! The evaluation engine.
//!
//! Everything the watcher decides happens in [`Engine::evaluate`], invoked
//! for every keystroke and every periodic tick. The engine owns the current
//! configuration snapshot, the explicit [`CareState`] and an injected
//! [`KeyValueStore`]; it never touches the terminal, the notification
//! daemon or the keyboard. Instead it returns a list of [`Intent`]s that the
//! presentation layer carries out.
//!
//! ## Evaluation Order
//!
//! 1. Disabled configuration or programmatic edits: nothing happens.
//! 2. Local midnight rollover: flush yesterday, load today, reset the session.
//! 3. Special-day banner (once per process).
//! 4. Activity tracking and opportunistic stats saving.
//! 5. Snooze bookkeeping and report refresh.
//! 6. Break reminder (tick only).
//! 7. Weekend block, then snooze suppression.
//! 8. Water reminder, then the time-of-day phase.
//!
//! ## Questions and Follow-ups
//!
//! Interactive prompts are emitted as [`Intent::Ask`]. The presentation layer
//! resolves them asynchronously and reports the answer back through
//! [`Engine::resolve`]; evaluations keep running in the meantime.
//!
//! ```rust
//! use care::libs::config::Config;
//! use care::libs::engine::{Engine, EditReason, Trigger};
//! use care::libs::store::MemoryStore;
//! use care::libs::time_of_day::Moment;
//!
//! let now = Moment::now();
//! let mut engine = Engine::new(Config::default(), MemoryStore::new(), now)?;
//! let intents = engine.evaluate(Trigger::Typing(EditReason::User), now, true)?;
//! # let _ = intents;
//! # Ok::<(), care::libs::store::StoreError>(())
//! ```

use crate::libs::config::Config;
use crate::libs::controls::Controls;
use crate::libs::holiday;
use crate::libs::phase::{MessageCategory, Phase, PhaseTable};
use crate::libs::report::ReportSnapshot;
use crate::libs::stats::StatsLedger;
use crate::libs::store::{KeyValueStore, StoreError};
use crate::libs::time_of_day::{Moment, TimeOfDay};
use crate::libs::tracker::{BreakCheck, Session};
use serde::{Deserialize, Serialize};

/// Randomized status texts rotate at most this often.
pub const STATUS_ROTATION_MS: i64 = 60_000;
/// Water reminders fire on a keystroke during this minute of every hour.
pub const WATER_REMINDER_MINUTE: u32 = 31;
/// Snooze length offered by the break reminder.
pub const BREAK_SNOOZE_MINUTES: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditReason {
    User,
    /// Edits produced by the watcher itself (e.g. the weekend undo).
    Programmatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Typing(EditReason),
    Timer,
}

impl Trigger {
    fn is_typing(&self) -> bool {
        matches!(self, Trigger::Typing(_))
    }
}

/// Commands a user can issue from the menu, the report or the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    Snooze { minutes: u64 },
    Resume,
    AllowToday,
    OpenReport,
}

/// Fixed status lines that do not come from a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Phase(MessageCategory),
    WeekendBlock,
    OvertimePaid,
    OvertimeUnpaid,
}

/// One-shot notifications without buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Holiday(&'static str),
    Water,
    Warning,
    OvertimeReply { paid: bool },
    AllowedToday,
}

/// Notifications with buttons whose answer comes back as a [`FollowUp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    /// "Still here after hours, are you paid overtime?"
    Overtime,
    /// Weekend block: keep coding anyway?
    KeepCoding { date_key: String },
    /// Break reminder after `minutes` of continuous coding.
    TakeBreak { minutes: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakChoice {
    Snooze,
    OpenReport,
    Dismiss,
}

/// The answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    Overtime { paid: bool },
    /// `allow` is false when the weekend question was dismissed.
    KeepCoding { date_key: String, allow: bool },
    TakeBreak(BreakChoice),
}

/// Side effects requested by an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetStatus(Status),
    /// Snoozed status; also stops the animation and countdown.
    ShowSnoozed { until_ms: i64 },
    /// Paused status; also stops every display timer.
    ShowPaused,
    /// Restore the default status, animated or static.
    IdleStatus { animate: bool },
    StopAnimation,
    StartCountdown { until: TimeOfDay },
    StopCountdown,
    Notify(Notice),
    Ask(Question),
    /// Revert the edit that triggered this evaluation.
    Undo,
    SnoozedContext(bool),
    RefreshReport,
    OpenReport,
}

/// All mutable state of one watcher process.
#[derive(Debug, Clone, PartialEq)]
pub struct CareState {
    pub date_key: String,
    pub session: Session,
    pub ledger: StatsLedger,
    pub controls: Controls,
    pub snoozed_context: bool,
    pub holiday_shown: bool,
    pub countdown_active: bool,
    pub rotate_until_ms: i64,
    pub water_reminder_key: Option<String>,
    pub overtime_asked_on: Option<String>,
    /// Date of the weekend question still waiting for an answer.
    pub keep_coding_pending: Option<String>,
}

pub struct Engine<S: KeyValueStore> {
    config: Config,
    table: PhaseTable,
    state: CareState,
    store: S,
}

impl<S: KeyValueStore> Engine<S> {
    /// Loads persisted controls and today's stats.
    pub fn new(config: Config, store: S, moment: Moment) -> Result<Self, StoreError> {
        let now_ms = moment.ms();
        let date_key = moment.date_key();
        let controls = Controls::load(&store)?;
        let ledger = StatsLedger::load(&store, &date_key, now_ms)?;
        let state = CareState {
            snoozed_context: controls.is_snoozed(now_ms),
            date_key,
            session: Session::new(now_ms),
            ledger,
            controls,
            holiday_shown: false,
            countdown_active: false,
            rotate_until_ms: 0,
            water_reminder_key: None,
            overtime_asked_on: None,
            keep_coding_pending: None,
        };
        Ok(Self {
            table: PhaseTable::new(config.work_start, config.work_end),
            config,
            state,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &CareState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// First evaluation after startup.
    pub fn activate(&mut self, moment: Moment, focused: bool) -> Result<Vec<Intent>, StoreError> {
        let mut intents = vec![Intent::SnoozedContext(self.state.snoozed_context)];
        intents.extend(self.enabled_state());
        intents.extend(self.evaluate(Trigger::Timer, moment, focused)?);
        Ok(intents)
    }

    /// Swaps in a new configuration snapshot (toggle or file change) and
    /// re-evaluates.
    pub fn reconfigure(&mut self, config: Config, moment: Moment, focused: bool) -> Result<Vec<Intent>, StoreError> {
        self.table = PhaseTable::new(config.work_start, config.work_end);
        self.config = config;
        if !self.config.enabled {
            self.state.countdown_active = false;
        }
        let mut intents = self.enabled_state();
        intents.extend(self.evaluate(Trigger::Timer, moment, focused)?);
        Ok(intents)
    }

    pub fn evaluate(&mut self, trigger: Trigger, moment: Moment, focused: bool) -> Result<Vec<Intent>, StoreError> {
        let mut intents = Vec::new();
        if !self.config.enabled || trigger == Trigger::Typing(EditReason::Programmatic) {
            return Ok(intents);
        }

        let now_ms = moment.ms();
        let now_minutes = moment.minutes();
        let date_key = moment.date_key();

        if self.state.date_key != date_key {
            self.roll_over(&date_key, now_ms, &mut intents)?;
        }

        if !self.state.holiday_shown {
            let (month, day) = moment.month_day();
            if let Some(text) = holiday::special_day(month, day) {
                self.state.holiday_shown = true;
                intents.push(Intent::Notify(Notice::Holiday(text)));
            }
        }

        let idle_reset_ms = self.config.idle_reset_ms();
        match trigger {
            Trigger::Typing(_) => self.state.session.on_typing(now_ms, idle_reset_ms, &mut self.state.ledger.today),
            Trigger::Timer => {
                self.state.session.on_tick(now_ms, focused, idle_reset_ms, &mut self.state.ledger.today);
                if self.state.ledger.should_save(now_ms) {
                    self.state.ledger.save(&mut self.store, &date_key, now_ms)?;
                }
            }
        }

        let snoozed = self.state.controls.is_snoozed(now_ms);
        if self.state.snoozed_context != snoozed {
            self.state.snoozed_context = snoozed;
            intents.push(Intent::SnoozedContext(snoozed));
        }
        intents.push(Intent::RefreshReport);

        if snoozed && trigger == Trigger::Timer {
            intents.push(self.show_snoozed());
            return Ok(intents);
        }

        if trigger == Trigger::Timer {
            let check = BreakCheck {
                enabled: self.config.break_reminder,
                snoozed,
                focused,
                now_ms,
                now_minutes,
                work_start: self.config.work_start,
                work_end: self.config.work_end,
                interval_ms: self.config.break_interval_ms(),
            };
            if self.state.session.take_break_reminder(&check) {
                let minutes = self.state.session.session_minutes(now_ms).unwrap_or_default();
                intents.push(Intent::Ask(Question::TakeBreak { minutes }));
            }
        }

        if self.config.weekend_block && moment.is_weekend() {
            intents.push(Intent::SetStatus(Status::WeekendBlock));
            intents.push(Intent::StopAnimation);
            if trigger.is_typing() && !self.state.controls.is_allowed_today(&date_key) {
                intents.push(Intent::Undo);
                if !snoozed && self.state.keep_coding_pending.as_deref() != Some(date_key.as_str()) {
                    self.state.keep_coding_pending = Some(date_key.clone());
                    intents.push(Intent::Ask(Question::KeepCoding { date_key }));
                }
            }
            return Ok(intents);
        }

        if snoozed {
            intents.push(self.show_snoozed());
            return Ok(intents);
        }

        let classification = self.table.classify(now_minutes, moment.weekday());
        if classification.phase == Phase::EarlyArrival {
            intents.push(Intent::StopAnimation);
            self.rotate_status(now_ms, classification.category, &mut intents);
            return Ok(intents);
        }

        if trigger.is_typing() && self.config.water_reminder && moment.minute_of_hour() == WATER_REMINDER_MINUTE {
            let key = format!("{}:{}", date_key, moment.hour());
            if self.state.water_reminder_key.as_deref() != Some(key.as_str()) {
                self.state.water_reminder_key = Some(key);
                intents.push(Intent::Notify(Notice::Water));
            }
        }

        match classification.phase {
            Phase::MorningQuiet | Phase::LunchNag => {
                intents.push(Intent::StopAnimation);
                push_status(classification.category, &mut intents);
                return Ok(intents);
            }
            Phase::PreLunch | Phase::LunchBreak => {
                intents.push(Intent::StopAnimation);
                self.rotate_status(now_ms, classification.category, &mut intents);
                return Ok(intents);
            }
            Phase::Countdown => {
                intents.push(Intent::StopAnimation);
                if !self.state.countdown_active {
                    self.state.countdown_active = true;
                    intents.push(Intent::StartCountdown { until: self.config.work_end });
                }
                return Ok(intents);
            }
            _ => {}
        }

        if self.state.countdown_active {
            self.state.countdown_active = false;
            intents.push(Intent::StopCountdown);
        }

        match classification.phase {
            Phase::PostWork => {
                intents.push(Intent::StopAnimation);
                self.rotate_status(now_ms, classification.category, &mut intents);
            }
            Phase::LateEvening => {
                intents.push(Intent::StopAnimation);
                push_status(classification.category, &mut intents);
                if trigger.is_typing() && self.state.overtime_asked_on.as_deref() != Some(date_key.as_str()) {
                    self.state.overtime_asked_on = Some(date_key);
                    intents.push(Intent::Ask(Question::Overtime));
                }
            }
            Phase::VeryLate => {
                intents.push(Intent::StopAnimation);
                if self.rotate_status(now_ms, classification.category, &mut intents) && trigger.is_typing() {
                    intents.push(Intent::Notify(Notice::Warning));
                }
            }
            // Gaps between phases only restart the animation; a static
            // status line is left as it is.
            _ if self.config.status_animation => intents.push(Intent::IdleStatus { animate: true }),
            _ => {}
        }

        Ok(intents)
    }

    /// Applies the answer to an earlier [`Question`].
    pub fn resolve(&mut self, follow_up: FollowUp, moment: Moment, focused: bool) -> Result<Vec<Intent>, StoreError> {
        match follow_up {
            FollowUp::Overtime { paid } => {
                let status = if paid { Status::OvertimePaid } else { Status::OvertimeUnpaid };
                Ok(vec![Intent::Notify(Notice::OvertimeReply { paid }), Intent::SetStatus(status)])
            }
            FollowUp::KeepCoding { date_key, allow } => {
                if self.state.keep_coding_pending.as_deref() == Some(date_key.as_str()) {
                    self.state.keep_coding_pending = None;
                }
                if allow {
                    self.state.controls.allow_today(&mut self.store, &date_key)?;
                }
                Ok(Vec::new())
            }
            FollowUp::TakeBreak(BreakChoice::Snooze) => self.apply(Command::Snooze { minutes: BREAK_SNOOZE_MINUTES }, moment, focused),
            FollowUp::TakeBreak(BreakChoice::OpenReport) => Ok(vec![Intent::OpenReport]),
            FollowUp::TakeBreak(BreakChoice::Dismiss) => Ok(Vec::new()),
        }
    }

    /// Executes a user command and re-runs evaluation.
    pub fn apply(&mut self, command: Command, moment: Moment, focused: bool) -> Result<Vec<Intent>, StoreError> {
        let mut intents = Vec::new();
        match command {
            Command::Snooze { minutes } => self.state.controls.set_snooze(&mut self.store, minutes, moment.ms())?,
            Command::Resume => self.state.controls.resume(&mut self.store)?,
            Command::AllowToday => {
                self.state.controls.allow_today(&mut self.store, &moment.date_key())?;
                intents.push(Intent::Notify(Notice::AllowedToday));
            }
            Command::OpenReport => return Ok(vec![Intent::OpenReport]),
        }
        intents.extend(self.evaluate(Trigger::Timer, moment, focused)?);
        Ok(intents)
    }

    /// Flushes today's stats; called when the watcher stops.
    pub fn shutdown(&mut self, moment: Moment) -> Result<(), StoreError> {
        if self.state.date_key.is_empty() {
            return Ok(());
        }
        let date_key = self.state.date_key.clone();
        self.state.ledger.save(&mut self.store, &date_key, moment.ms())
    }

    pub fn snapshot(&self, moment: Moment) -> ReportSnapshot {
        ReportSnapshot::new(&self.config, &self.state.controls, self.state.ledger.today, moment)
    }

    fn enabled_state(&self) -> Vec<Intent> {
        if !self.config.enabled {
            vec![Intent::ShowPaused]
        } else {
            vec![Intent::IdleStatus {
                animate: self.config.status_animation,
            }]
        }
    }

    fn roll_over(&mut self, date_key: &str, now_ms: i64, intents: &mut Vec<Intent>) -> Result<(), StoreError> {
        if !self.state.date_key.is_empty() {
            let previous = std::mem::take(&mut self.state.date_key);
            self.state.ledger.save(&mut self.store, &previous, now_ms)?;
        }
        self.state.date_key = date_key.to_string();
        self.state.ledger = StatsLedger::load(&self.store, date_key, now_ms)?;
        self.state.session = Session::new(now_ms);
        self.state.water_reminder_key = None;
        if self.state.countdown_active {
            self.state.countdown_active = false;
            intents.push(Intent::StopCountdown);
        }
        Ok(())
    }

    fn show_snoozed(&mut self) -> Intent {
        self.state.countdown_active = false;
        Intent::ShowSnoozed {
            until_ms: self.state.controls.snooze_until_ms,
        }
    }

    /// Sets a randomized status unless one was picked within the rotation
    /// window. Returns whether a new status was emitted.
    fn rotate_status(&mut self, now_ms: i64, category: Option<MessageCategory>, intents: &mut Vec<Intent>) -> bool {
        if now_ms < self.state.rotate_until_ms {
            return false;
        }
        self.state.rotate_until_ms = now_ms + STATUS_ROTATION_MS;
        push_status(category, intents);
        true
    }
}

fn push_status(category: Option<MessageCategory>, intents: &mut Vec<Intent>) {
    if let Some(category) = category {
        intents.push(Intent::SetStatus(Status::Phase(category)));
    }
}
