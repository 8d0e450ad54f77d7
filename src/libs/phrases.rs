//! Status-line texts, notification texts and their colors.

use crate::libs::engine::{Notice, Question, Status};
use crate::libs::phase::MessageCategory;
use crate::libs::time_of_day::clock_label;
use rand::seq::SliceRandom;

pub const PAUSED_COLOR: &str = "#999999";
pub const DEFAULT_COLOR: &str = "#82c6f7";
pub const ANIMATION_COLORS: [&str; 7] = ["#2ed9b1", "#82c6f7", "#40a9f0", "#a4f6db", "#a6f9fb", "#24e1ec", "#7df8bd"];

/// Number of distinct animation frames; frame indices cycle `1..=ANIMATION_FRAMES`.
pub const ANIMATION_FRAMES: usize = 6;

const IDLE_TEXT: &str = "Stay energetic today";
const PAUSED_TEXT: &str = "care is paused";

const GREETINGS: &[&str] = &[
    "Wow, you're in really early today 👋",
    "Good morning, programmer 🧑‍💻",
    "Early bird! Don't forget breakfast 🍙",
];
const SLACK_OFF: &[&str] = &["It's still early, slack off a little longer 😄"];
const LUNCH_PREP: &[&str] = &[
    "Lunch is close, decide what to eat 🍜",
    "Almost lunchtime, wrap up that function 🍱",
    "Start thinking about lunch 🤔",
];
const CRAZY_THURSDAY: &[&str] = &[
    "Crazy Thursday! Fried chicken for lunch? 🍗",
    "It's Thursday, treat yourself at lunch 🍗",
];
const SKIPPED_LUNCH: &[&str] = &["Skipping lunch to out-grind us all? Go eat 😠"];
const LUNCH_BREAK: &[&str] = &[
    "Lunch break, rest your eyes for a while 😴",
    "Take a short nap, the code will wait 💤",
    "Stretch, walk around, digest 🚶",
];
const GO_HOME: &[&str] = &[
    "Work is over, time to go home 🎉",
    "Stop what you're doing, pack up and leave 🏃",
    "Once more: stop what you're doing, pack up and leave 🏃",
    "Time to clock out, get some rest!",
    "You worked hard today, consider going home!",
    "Don't forget to rest, now is a great time to leave!",
];
const GO_HOME_FRIDAY: &[&str] = &[
    "It's Friday evening, the weekend starts now 🎉",
    "Weekend! Close the laptop and run 🏃",
];
const OVERTIME: &[&str] = &["Still not gone? Does your boss pay overtime? 🤔"];
const WARNINGS: &[&str] = &[
    "It's getting late, go rest ⚠️",
    "Staying up this late is bad for you ⚠️",
    "Your health matters more than this bug ⚠️",
];

const WATER_TEXT: &str = "Water time! Drink some water 🍻";
const OVERTIME_PAID_TEXT: &str = "Lucky you, getting paid for overtime 😎";
const OVERTIME_UNPAID_TEXT: &str = "Unpaid overtime is the worst kind 😠";
const WEEKEND_BLOCK_TEXT: &str = "Coding on the weekend? Seriously? 😤";
const ALLOWED_TODAY_TEXT: &str = "Weekend coding allowed for today.";

/// Button labels of each question, in display order. The first label
/// is the affirmative answer.
pub const OVERTIME_ACTIONS: [&str; 2] = ["Yes", "No"];
pub const KEEP_CODING_ACTIONS: [&str; 1] = ["Keep coding today"];
pub const TAKE_BREAK_ACTIONS: [&str; 3] = ["Snooze 10 min", "Open today report", "Dismiss"];

/// One line of the status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub color: &'static str,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, color: &'static str) -> Self {
        Self { text: text.into(), color }
    }
}

fn pool(category: MessageCategory) -> &'static [&'static str] {
    match category {
        MessageCategory::Greeting => GREETINGS,
        MessageCategory::SlackOff => SLACK_OFF,
        MessageCategory::LunchPrep => LUNCH_PREP,
        MessageCategory::CrazyThursday => CRAZY_THURSDAY,
        MessageCategory::SkippedLunch => SKIPPED_LUNCH,
        MessageCategory::LunchBreak => LUNCH_BREAK,
        MessageCategory::Countdown => &[],
        MessageCategory::GoHome => GO_HOME,
        MessageCategory::GoHomeFriday => GO_HOME_FRIDAY,
        MessageCategory::Overtime => OVERTIME,
        MessageCategory::Warning => WARNINGS,
    }
}

pub fn category_color(category: MessageCategory) -> &'static str {
    match category {
        MessageCategory::Greeting => "#62BAF3",
        MessageCategory::SlackOff => "#70e5ab",
        MessageCategory::LunchPrep | MessageCategory::CrazyThursday => "#dec966",
        MessageCategory::SkippedLunch => "#4cb4d6",
        MessageCategory::LunchBreak => "#f4d257",
        MessageCategory::Countdown => "#ea9148",
        MessageCategory::GoHome | MessageCategory::GoHomeFriday => "#ff655a",
        MessageCategory::Overtime => "#ff9af4",
        MessageCategory::Warning => "#e90101",
    }
}

/// A random phrase for `category`.
pub fn pick(category: MessageCategory) -> &'static str {
    pool(category).choose(&mut rand::thread_rng()).copied().unwrap_or(IDLE_TEXT)
}

pub fn status_line(status: Status) -> StatusLine {
    match status {
        Status::Phase(category) => StatusLine::new(pick(category), category_color(category)),
        Status::WeekendBlock => StatusLine::new(WEEKEND_BLOCK_TEXT, "#62BAF3"),
        Status::OvertimePaid => StatusLine::new(OVERTIME_PAID_TEXT, "#eec9ed"),
        Status::OvertimeUnpaid => StatusLine::new(OVERTIME_UNPAID_TEXT, "#eec9c9"),
    }
}

pub fn paused_line() -> StatusLine {
    StatusLine::new(PAUSED_TEXT, PAUSED_COLOR)
}

pub fn snoozed_line(until_ms: i64) -> StatusLine {
    StatusLine::new(format!("😴 Snoozed until {}", clock_label(until_ms)), PAUSED_COLOR)
}

pub fn idle_line() -> StatusLine {
    StatusLine::new(format!("{} 🦆", IDLE_TEXT), DEFAULT_COLOR)
}

/// Frame `count` (1-based) of the idle animation: the duck walks left
/// and leaves a trail behind.
pub fn animation_frame(count: usize) -> StatusLine {
    let count = count.clamp(1, ANIMATION_FRAMES);
    let text = format!("{}{}🦆{}", IDLE_TEXT, " ".repeat(ANIMATION_FRAMES - count), "💩".repeat(count - 1));
    StatusLine::new(text, ANIMATION_COLORS[count])
}

pub fn countdown_line(remaining: &str) -> StatusLine {
    StatusLine::new(format!("Off work in {}, hang in there 💪", remaining), category_color(MessageCategory::Countdown))
}

pub fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::Holiday(text) => (*text).to_string(),
        Notice::Water => WATER_TEXT.to_string(),
        Notice::Warning => pick(MessageCategory::Warning).to_string(),
        Notice::OvertimeReply { paid: true } => OVERTIME_PAID_TEXT.to_string(),
        Notice::OvertimeReply { paid: false } => OVERTIME_UNPAID_TEXT.to_string(),
        Notice::AllowedToday => ALLOWED_TODAY_TEXT.to_string(),
    }
}

pub fn question_text(question: &Question) -> String {
    match question {
        Question::Overtime => pick(MessageCategory::Overtime).to_string(),
        Question::KeepCoding { .. } => WEEKEND_BLOCK_TEXT.to_string(),
        Question::TakeBreak { minutes } => {
            format!("You've been coding for about {} minutes. Take a short break 🧘", minutes)
        }
    }
}

pub fn question_actions(question: &Question) -> &'static [&'static str] {
    match question {
        Question::Overtime => &OVERTIME_ACTIONS,
        Question::KeepCoding { .. } => &KEEP_CODING_ACTIONS,
        Question::TakeBreak { .. } => &TAKE_BREAK_ACTIONS,
    }
}
