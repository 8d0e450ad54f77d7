//! Activity and idle tracking.
//!
//! Two signals drive the tracker: a keystroke ([`Session::on_typing`]) and
//! the periodic tick ([`Session::on_tick`]). From them it derives whether
//! the user is idle, when the current coding session started, and it feeds
//! active time and break counts into today's [`DayStats`].
//!
//! A break is one idle gap longer than the idle threshold. Whichever signal
//! notices the gap first counts it: the tick when it crosses the threshold
//! while the user is away, or the keystroke that ends a gap no tick saw.
//! The other signal then sees `idle == true` (or a fresh timestamp) and does
//! not count it again.

use crate::libs::stats::DayStats;
use crate::libs::time_of_day::TimeOfDay;

/// Transient per-day session state. Reset at local midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub last_typing_at_ms: Option<i64>,
    /// Start of the current session; `None` while idle.
    pub session_start_at_ms: Option<i64>,
    pub break_reminder_shown: bool,
    pub idle: bool,
    pub last_tick_at_ms: i64,
}

impl Session {
    pub fn new(now_ms: i64) -> Self {
        Self {
            last_typing_at_ms: None,
            session_start_at_ms: None,
            break_reminder_shown: false,
            idle: true,
            last_tick_at_ms: now_ms,
        }
    }

    pub fn on_typing(&mut self, now_ms: i64, idle_reset_ms: i64, stats: &mut DayStats) {
        if let Some(last) = self.last_typing_at_ms {
            if now_ms - last > idle_reset_ms && !self.idle {
                stats.break_count += 1;
                self.start_session(now_ms);
            }
        }
        if self.session_start_at_ms.is_none() {
            self.start_session(now_ms);
        }
        self.last_typing_at_ms = Some(now_ms);
        self.idle = false;
    }

    pub fn on_tick(&mut self, now_ms: i64, focused: bool, idle_reset_ms: i64, stats: &mut DayStats) {
        let tick_delta_ms = (now_ms - self.last_tick_at_ms).max(0);
        self.last_tick_at_ms = now_ms;

        let idle_now = self.is_idle_at(now_ms, idle_reset_ms);
        if !idle_now && focused {
            stats.active_ms += tick_delta_ms as u64;
        }

        if !self.idle && idle_now && self.last_typing_at_ms.is_some() {
            stats.break_count += 1;
            self.idle = true;
            self.session_start_at_ms = None;
            self.break_reminder_shown = false;
        } else if self.idle && !idle_now {
            self.idle = false;
            let start = self.session_start_at_ms.or(self.last_typing_at_ms).unwrap_or(now_ms);
            self.session_start_at_ms = Some(start);
            self.break_reminder_shown = false;
        }
    }

    /// Idle when nothing was typed yet or the last keystroke is older than
    /// the threshold.
    pub fn is_idle_at(&self, now_ms: i64, idle_reset_ms: i64) -> bool {
        match self.last_typing_at_ms {
            Some(last) => now_ms - last > idle_reset_ms,
            None => true,
        }
    }

    /// Whole minutes of the current session, if one is running.
    pub fn session_minutes(&self, now_ms: i64) -> Option<i64> {
        self.session_start_at_ms.map(|start| (now_ms - start) / 60_000)
    }

    /// Checks every condition of the break reminder.
    ///
    /// Fires at most once per session: a `true` result marks the session's
    /// reminder as shown.
    pub fn take_break_reminder(&mut self, check: &BreakCheck) -> bool {
        let Some(start) = self.session_start_at_ms else {
            return false;
        };
        let due = check.enabled
            && !check.snoozed
            && !self.idle
            && !self.break_reminder_shown
            && check.focused
            && check.now_minutes > check.work_start.minutes()
            && check.now_minutes <= check.work_end.minutes()
            && check.now_ms - start >= check.interval_ms;
        if due {
            self.break_reminder_shown = true;
        }
        due
    }

    fn start_session(&mut self, now_ms: i64) {
        self.session_start_at_ms = Some(now_ms);
        self.break_reminder_shown = false;
    }
}

/// External conditions of the break reminder at one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct BreakCheck {
    pub enabled: bool,
    pub snoozed: bool,
    pub focused: bool,
    pub now_ms: i64,
    pub now_minutes: u32,
    pub work_start: TimeOfDay,
    pub work_end: TimeOfDay,
    pub interval_ms: i64,
}
