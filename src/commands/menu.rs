//! Interactive picker offering the same actions as the status-bar menu.
//!
//! Entries depend on the current state: a paused watcher offers "resume",
//! an active snooze offers "resume notifications" instead of snooze lengths.

use super::{allow_today, init, report, resume, snooze, toggle};
use crate::db::kv::SqliteStore;
use crate::libs::config::Config;
use crate::libs::controls::Controls;
use crate::libs::messages::Message;
use crate::libs::time_of_day::Moment;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Toggle,
    Snooze(u64),
    Resume,
    OpenReport,
    AllowToday,
    OpenSettings,
}

const SNOOZE_CHOICES: [u64; 3] = [10, 30, 60];

/// Menu entries for the given state, in display order.
pub fn entries(enabled: bool, snoozed: bool) -> Vec<(Message, MenuAction)> {
    let mut entries = Vec::new();
    if enabled {
        entries.push((Message::MenuPause, MenuAction::Toggle));
    } else {
        entries.push((Message::MenuResume, MenuAction::Toggle));
    }
    if snoozed {
        entries.push((Message::MenuResumeNotifications, MenuAction::Resume));
    } else {
        entries.extend(SNOOZE_CHOICES.iter().map(|minutes| (Message::MenuSnooze(*minutes), MenuAction::Snooze(*minutes))));
    }
    entries.push((Message::MenuOpenReport, MenuAction::OpenReport));
    entries.push((Message::MenuAllowToday, MenuAction::AllowToday));
    entries.push((Message::MenuOpenSettings, MenuAction::OpenSettings));
    entries
}

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    let controls = Controls::load(&SqliteStore::new()?)?;
    let entries = entries(config.enabled, controls.is_snoozed(Moment::now().ms()));
    let labels: Vec<String> = entries.iter().map(|(label, _)| label.to_string()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::MenuTitle.to_string())
        .items(&labels)
        .default(0)
        .interact_opt()?;

    let Some(index) = selection else {
        return Ok(());
    };
    match entries[index].1 {
        MenuAction::Toggle => toggle::cmd(),
        MenuAction::Snooze(minutes) => snooze::snooze(minutes),
        MenuAction::Resume => resume::cmd(),
        MenuAction::OpenReport => report::cmd(report::ReportArgs::default()),
        MenuAction::AllowToday => allow_today::cmd(),
        MenuAction::OpenSettings => init::cmd(init::InitArgs::default()),
    }
}
