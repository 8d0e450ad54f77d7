//! Presentation surfaces driven by engine intents.
//!
//! [`Presenter`] renders the status line into a terminal: one line that is
//! rewritten in place, colored with 24-bit ANSI escapes. It also owns the
//! two display timers, the idle animation and the end-of-day countdown;
//! the watcher only forwards their ticks.
//!
//! [`Notifier`] is the seam to the desktop notification daemon. Questions
//! block until the user picks an action, so callers run them on a blocking
//! task and turn the answer into a [`FollowUp`] with [`follow_up_for`].

use crate::libs::engine::{BreakChoice, FollowUp, Question};
use crate::libs::formatter::{format_countdown, remaining_until};
use crate::libs::phrases::{self, StatusLine, ANIMATION_FRAMES};
use crate::libs::time_of_day::{Moment, TimeOfDay};
use anyhow::Result;
use notify_rust::{Notification, Timeout};
use std::io::{self, Stdout, Write};

const NOTIFICATION_SUMMARY: &str = "care";
/// Unanswered questions expire after this long and count as dismissed.
pub const QUESTION_TIMEOUT_MS: u32 = 2 * 60 * 1000;

pub struct Presenter<W: Write> {
    out: W,
    current: Option<StatusLine>,
    rendered: Option<StatusLine>,
    animation_frame: Option<usize>,
    countdown_until: Option<TimeOfDay>,
}

impl Presenter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            current: None,
            rendered: None,
            animation_frame: None,
            countdown_until: None,
        }
    }

    pub fn current(&self) -> Option<&StatusLine> {
        self.current.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation_frame.is_some()
    }

    pub fn countdown_until(&self) -> Option<TimeOfDay> {
        self.countdown_until
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Shows `line`. Identical text and color are not re-rendered.
    pub fn show(&mut self, line: StatusLine) {
        self.current = Some(line);
        self.render();
    }

    /// Default status: the animated duck, or its static variant.
    pub fn show_idle(&mut self, animate: bool) {
        if animate {
            if self.animation_frame.is_none() {
                self.animation_frame = Some(1);
                self.animation_tick();
            }
        } else {
            self.stop_animation();
            self.show(phrases::idle_line());
        }
    }

    pub fn animation_tick(&mut self) {
        let Some(count) = self.animation_frame else {
            return;
        };
        self.show(phrases::animation_frame(count));
        self.animation_frame = Some(if count >= ANIMATION_FRAMES { 1 } else { count + 1 });
    }

    pub fn stop_animation(&mut self) {
        self.animation_frame = None;
    }

    pub fn start_countdown(&mut self, until: TimeOfDay, now: &Moment) {
        self.countdown_until = Some(until);
        self.countdown_tick(now);
    }

    pub fn countdown_tick(&mut self, now: &Moment) {
        if let Some(until) = self.countdown_until {
            let remaining = format_countdown(&remaining_until(now, until));
            self.show(phrases::countdown_line(&remaining));
        }
    }

    pub fn stop_countdown(&mut self) {
        self.countdown_until = None;
    }

    pub fn stop_all(&mut self) {
        self.stop_animation();
        self.stop_countdown();
    }

    fn render(&mut self) {
        if self.current == self.rendered {
            return;
        }
        let Some(line) = self.current.clone() else {
            return;
        };
        let written = match hex_rgb(line.color) {
            Some((r, g, b)) => write!(self.out, "\r\x1b[2K\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, line.text),
            None => write!(self.out, "\r\x1b[2K{}", line.text),
        };
        if let Err(e) = written.and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "failed to render status line");
            return;
        }
        self.rendered = Some(line);
    }
}

/// Parses `#RRGGBB`.
pub fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub trait Notifier: Send + Sync {
    fn notify(&self, text: &str) -> Result<()>;

    /// Shows `text` with one button per action and blocks until the user
    /// answers or the question expires. Returns the index of the chosen
    /// action, or `None` when the notification was dismissed or timed out.
    fn ask(&self, text: &str, actions: &[&str]) -> Result<Option<usize>>;
}

/// Maps the answer to `question` onto the follow-up the engine expects.
///
/// A dismissed overtime question counts as "no overtime pay"; a dismissed
/// weekend question leaves the block in place but lets it be asked again.
pub fn follow_up_for(question: &Question, answer: Option<usize>) -> FollowUp {
    match question {
        Question::Overtime => FollowUp::Overtime { paid: answer == Some(0) },
        Question::KeepCoding { date_key } => FollowUp::KeepCoding {
            date_key: date_key.clone(),
            allow: answer == Some(0),
        },
        Question::TakeBreak { .. } => FollowUp::TakeBreak(match answer {
            Some(0) => BreakChoice::Snooze,
            Some(1) => BreakChoice::OpenReport,
            _ => BreakChoice::Dismiss,
        }),
    }
}

/// Desktop notifications through the platform notification service.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, text: &str) -> Result<()> {
        Notification::new().summary(NOTIFICATION_SUMMARY).body(text).show()?;
        Ok(())
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn ask(&self, text: &str, actions: &[&str]) -> Result<Option<usize>> {
        let mut notification = Notification::new();
        notification
            .summary(NOTIFICATION_SUMMARY)
            .body(text)
            .timeout(Timeout::Milliseconds(QUESTION_TIMEOUT_MS));
        for (index, label) in actions.iter().enumerate() {
            notification.action(&index.to_string(), label);
        }

        let mut chosen = None;
        notification.show()?.wait_for_action(|action| {
            chosen = action.parse::<usize>().ok().filter(|index| *index < actions.len());
        });
        Ok(chosen)
    }

    /// Without notification actions the question is shown as plain text and
    /// treated as dismissed.
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn ask(&self, text: &str, _actions: &[&str]) -> Result<Option<usize>> {
        Notification::new()
            .summary(NOTIFICATION_SUMMARY)
            .body(&format!("{}\nUse `care menu` to respond.", text))
            .timeout(Timeout::Never)
            .show()?;
        Ok(None)
    }
}
