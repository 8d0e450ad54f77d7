use crate::db::kv::SqliteStore;
use crate::libs::{messages::Message, stats, view::View};
use crate::{msg_info, msg_print};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let log = stats::history(&SqliteStore::new()?)?;
    if log.is_empty() {
        msg_info!(Message::NoStatsRecorded);
        return Ok(());
    }

    msg_print!(Message::StatsHeader, true);
    View::stats(&log)
}
