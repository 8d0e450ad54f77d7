//! Time-of-day classification.
//!
//! The working day is cut into named phases by a sorted boundary table. A
//! moment is classified by scanning the table in order and taking the first
//! rule whose range contains it, so overlapping rules resolve by position:
//!
//! | order | range                         | phase          |
//! |-------|-------------------------------|----------------|
//! | 1     | `(6:00, workStart]`           | early arrival  |
//! | 2     | `(workStart, 10:00]`          | morning quiet  |
//! | 3     | `(11:30, 12:00]`              | pre-lunch      |
//! | 4     | `(12:00, 12:30]`              | lunch nag      |
//! | 5     | `(13:00, 13:30]`              | lunch break    |
//! | 6     | `[workEnd - 60, workEnd)`     | countdown      |
//! | 7     | `(workEnd, 18:10]`            | post-work      |
//! | 8     | `(18:10, 20:00]`              | late evening   |
//! | 9     | `(20:00, 24:00)`              | very late      |
//!
//! Minutes up to 6:00 that no rule claims are [`Phase::PreDawn`]; any other
//! unclaimed minute (the gaps between rules) is [`Phase::Working`]. Neither
//! carries a message.

use crate::libs::time_of_day::{TimeOfDay, MINUTES_PER_DAY};
use chrono::Weekday;

const MIN_06_00: u32 = 6 * 60;
const MIN_10_00: u32 = 10 * 60;
const MIN_11_30: u32 = 11 * 60 + 30;
const MIN_12_00: u32 = 12 * 60;
const MIN_12_30: u32 = 12 * 60 + 30;
const MIN_13_00: u32 = 13 * 60;
const MIN_13_30: u32 = 13 * 60 + 30;
const MIN_18_10: u32 = 18 * 60 + 10;
const MIN_20_00: u32 = 20 * 60;
const COUNTDOWN_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    PreDawn,
    EarlyArrival,
    MorningQuiet,
    PreLunch,
    LunchNag,
    LunchBreak,
    Countdown,
    PostWork,
    LateEvening,
    VeryLate,
    Working,
}

/// Which phrase pool and color a phase displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCategory {
    Greeting,
    SlackOff,
    LunchPrep,
    CrazyThursday,
    SkippedLunch,
    LunchBreak,
    Countdown,
    GoHome,
    GoHomeFriday,
    Overtime,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub phase: Phase,
    pub category: Option<MessageCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bounds {
    /// `(lo, hi]`
    OpenClosed,
    /// `[lo, hi)`
    ClosedOpen,
}

#[derive(Debug, Clone, Copy)]
struct PhaseRule {
    phase: Phase,
    lo: u32,
    hi: u32,
    bounds: Bounds,
}

impl PhaseRule {
    const fn open_closed(phase: Phase, lo: u32, hi: u32) -> Self {
        Self { phase, lo, hi, bounds: Bounds::OpenClosed }
    }

    fn contains(&self, minutes: u32) -> bool {
        match self.bounds {
            Bounds::OpenClosed => minutes > self.lo && minutes <= self.hi,
            Bounds::ClosedOpen => minutes >= self.lo && minutes < self.hi,
        }
    }
}

/// The ordered rule table for one pair of work boundaries.
#[derive(Debug, Clone)]
pub struct PhaseTable {
    rules: Vec<PhaseRule>,
}

impl PhaseTable {
    pub fn new(work_start: TimeOfDay, work_end: TimeOfDay) -> Self {
        let start = work_start.minutes();
        let end = work_end.minutes();
        let rules = vec![
            PhaseRule::open_closed(Phase::EarlyArrival, MIN_06_00, start),
            PhaseRule::open_closed(Phase::MorningQuiet, start, MIN_10_00),
            PhaseRule::open_closed(Phase::PreLunch, MIN_11_30, MIN_12_00),
            PhaseRule::open_closed(Phase::LunchNag, MIN_12_00, MIN_12_30),
            PhaseRule::open_closed(Phase::LunchBreak, MIN_13_00, MIN_13_30),
            PhaseRule {
                phase: Phase::Countdown,
                lo: end.saturating_sub(COUNTDOWN_MINUTES),
                hi: end,
                bounds: Bounds::ClosedOpen,
            },
            PhaseRule::open_closed(Phase::PostWork, end, MIN_18_10),
            PhaseRule::open_closed(Phase::LateEvening, MIN_18_10, MIN_20_00),
            PhaseRule::open_closed(Phase::VeryLate, MIN_20_00, MINUTES_PER_DAY),
        ];
        Self { rules }
    }

    /// First matching phase for `minutes` since midnight.
    pub fn phase_at(&self, minutes: u32) -> Phase {
        self.rules
            .iter()
            .find(|rule| rule.contains(minutes))
            .map(|rule| rule.phase)
            .unwrap_or(if minutes <= MIN_06_00 { Phase::PreDawn } else { Phase::Working })
    }

    pub fn classify(&self, minutes: u32, weekday: Weekday) -> Classification {
        let phase = self.phase_at(minutes);
        Classification {
            phase,
            category: category_for(phase, weekday),
        }
    }
}

fn category_for(phase: Phase, weekday: Weekday) -> Option<MessageCategory> {
    let category = match phase {
        Phase::PreDawn | Phase::Working => return None,
        Phase::EarlyArrival => MessageCategory::Greeting,
        Phase::MorningQuiet => MessageCategory::SlackOff,
        Phase::PreLunch if weekday == Weekday::Thu => MessageCategory::CrazyThursday,
        Phase::PreLunch => MessageCategory::LunchPrep,
        Phase::LunchNag => MessageCategory::SkippedLunch,
        Phase::LunchBreak => MessageCategory::LunchBreak,
        Phase::Countdown => MessageCategory::Countdown,
        Phase::PostWork if weekday == Weekday::Fri => MessageCategory::GoHomeFriday,
        Phase::PostWork => MessageCategory::GoHome,
        Phase::LateEvening => MessageCategory::Overtime,
        Phase::VeryLate => MessageCategory::Warning,
    };
    Some(category)
}
