//! Command-line interface for care.
//!
//! `care watch` runs the watcher; every other command is a one-shot action
//! on the shared configuration file and database. Snooze, resume and
//! allow-today are queued for a running watcher so that its in-memory state
//! and the status line change immediately; without a watcher they are
//! written to the database directly.

pub mod allow_today;
pub mod init;
pub mod menu;
pub mod report;
pub mod resume;
pub mod snooze;
pub mod stats;
pub mod toggle;
pub mod watch;

use crate::db::inbox::Inbox;
use crate::libs::daemon;
use crate::libs::engine::Command;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Watch keyboard activity and show reminders")]
    Watch(watch::WatchArgs),
    #[command(about = "Pick an action from an interactive menu")]
    Menu,
    #[command(about = "Enable or pause care")]
    Toggle,
    #[command(about = "Suppress notifications for a while")]
    Snooze(snooze::SnoozeArgs),
    #[command(about = "End an active snooze")]
    Resume,
    #[command(about = "Allow coding on the weekend for today")]
    AllowToday,
    #[command(about = "Show today's report")]
    Report(report::ReportArgs),
    #[command(about = "Show the daily activity history")]
    Stats,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Menu => menu::cmd(),
            Commands::Toggle => toggle::cmd(),
            Commands::Snooze(args) => snooze::cmd(args),
            Commands::Resume => resume::cmd(),
            Commands::AllowToday => allow_today::cmd(),
            Commands::Report(args) => report::cmd(args),
            Commands::Stats => stats::cmd(),
        }
    }
}

/// Hands `command` to a running watcher. Returns `false` when no watcher
/// is running and the caller has to apply it itself.
pub(crate) fn queue_for_watcher(command: &Command) -> Result<bool> {
    if !daemon::is_running() {
        return Ok(false);
    }
    Inbox::new()?.push(command)?;
    msg_info!(Message::CommandQueued(format!("{:?}", command)));
    Ok(true)
}
