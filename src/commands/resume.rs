use super::queue_for_watcher;
use crate::db::kv::SqliteStore;
use crate::libs::controls::Controls;
use crate::libs::engine::Command;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    if !queue_for_watcher(&Command::Resume)? {
        let mut store = SqliteStore::new()?;
        Controls::load(&store)?.resume(&mut store)?;
    }
    msg_success!(Message::SnoozeResumed);
    Ok(())
}
