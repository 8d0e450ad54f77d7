use super::queue_for_watcher;
use crate::db::kv::SqliteStore;
use crate::libs::controls::Controls;
use crate::libs::engine::Command;
use crate::libs::messages::Message;
use crate::libs::time_of_day::{clock_label, Moment};
use crate::msg_success;
use anyhow::Result;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnoozeLength {
    #[value(name = "10")]
    TenMinutes,
    #[value(name = "30")]
    ThirtyMinutes,
    #[value(name = "60")]
    OneHour,
}

impl SnoozeLength {
    pub fn minutes(self) -> u64 {
        match self {
            SnoozeLength::TenMinutes => 10,
            SnoozeLength::ThirtyMinutes => 30,
            SnoozeLength::OneHour => 60,
        }
    }
}

#[derive(Debug, Args)]
pub struct SnoozeArgs {
    /// Minutes to stay quiet
    #[arg(value_enum, default_value = "10")]
    length: SnoozeLength,
}

pub fn cmd(args: SnoozeArgs) -> Result<()> {
    snooze(args.length.minutes())
}

pub fn snooze(minutes: u64) -> Result<()> {
    let command = Command::Snooze { minutes };
    let now_ms = Moment::now().ms();
    if !queue_for_watcher(&command)? {
        let mut store = SqliteStore::new()?;
        Controls::load(&store)?.set_snooze(&mut store, minutes, now_ms)?;
    }
    msg_success!(Message::SnoozedUntil(clock_label(now_ms + minutes as i64 * 60_000)));
    Ok(())
}
