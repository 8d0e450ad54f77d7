use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Run the watcher in the background
    #[arg(short, long)]
    daemon: bool,

    /// Stop the background watcher
    #[arg(long, conflicts_with = "daemon")]
    stop: bool,

    /// Internal: entry point of the spawned background process
    #[arg(long, hide = true)]
    daemon_run: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    if args.stop {
        return daemon::stop();
    }
    if args.daemon {
        return daemon::spawn();
    }
    if !args.daemon_run {
        msg_info!(Message::WatcherStartingForeground);
    }
    daemon::run_with_signal_handling().await
}
