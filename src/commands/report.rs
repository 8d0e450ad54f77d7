//! Today's report: printed as a table and written as an HTML page.

use crate::{
    db::kv::SqliteStore,
    libs::{
        config::Config,
        messages::Message,
        report::{self, ReportSnapshot},
        time_of_day::Moment,
        view::View,
    },
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Default, Args)]
pub struct ReportArgs {
    /// Stop refreshing the report page
    #[arg(long)]
    close: bool,

    /// Write the page without opening it
    #[arg(long)]
    no_open: bool,
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    let mut store = SqliteStore::new()?;
    if args.close {
        report::set_open(&mut store, false)?;
        msg_success!(Message::ReportClosed);
        return Ok(());
    }

    let moment = Moment::now();
    let snapshot = ReportSnapshot::from_store(&store, &Config::read()?, moment)?;
    msg_print!(Message::ReportHeader(snapshot.date_key.clone()), true);
    View::report(&snapshot)?;

    report::set_open(&mut store, true)?;
    let path = report::write_report(&snapshot)?;
    msg_success!(Message::ReportWritten(path.display().to_string()));
    if !args.no_open {
        if let Err(e) = report::open_in_browser(&path) {
            msg_warning!(Message::ReportOpenFailed(e.to_string()));
        }
    }
    Ok(())
}
