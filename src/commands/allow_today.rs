use super::queue_for_watcher;
use crate::db::kv::SqliteStore;
use crate::libs::controls::Controls;
use crate::libs::engine::Command;
use crate::libs::messages::Message;
use crate::libs::time_of_day::Moment;
use crate::msg_success;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    if !queue_for_watcher(&Command::AllowToday)? {
        let mut store = SqliteStore::new()?;
        Controls::load(&store)?.allow_today(&mut store, &Moment::now().date_key())?;
    }
    msg_success!(Message::CodingAllowedToday);
    Ok(())
}
