//! Interactive configuration wizard.

use crate::{
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Default, Args)]
pub struct InitArgs {
    /// Remove the configuration file and fall back to the defaults
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if Config::delete()? {
            msg_success!(Message::ConfigDeleted);
        } else {
            msg_info!(Message::ConfigNotFound);
        }
        return Ok(());
    }

    // A running watcher picks the new file up on its next housekeeping tick.
    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
