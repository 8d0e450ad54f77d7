use crate::libs::{config::Config, messages::Message};
use crate::msg_success;
use anyhow::Result;

/// Flips the master switch. A running watcher notices the file change.
pub fn cmd() -> Result<()> {
    let mut config = Config::read()?;
    config.enabled = !config.enabled;
    config.save()?;

    if config.enabled {
        msg_success!(Message::CareEnabled);
    } else {
        msg_success!(Message::CarePaused);
    }
    Ok(())
}
