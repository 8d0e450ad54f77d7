//! Queue of commands waiting for the running watcher.
//!
//! A CLI invocation such as `care snooze 30` cannot touch the watcher's
//! in-memory state, so it appends the command here. The watcher drains the
//! queue once per second, applies each command in insertion order and
//! re-runs evaluation.

use crate::db::db::Db;
use crate::libs::engine::Command;
use crate::libs::store::StoreError;
use rusqlite::{params, Connection};

const SCHEMA_INBOX: &str = "CREATE TABLE IF NOT EXISTS inbox (
    id INTEGER NOT NULL PRIMARY KEY,
    command TEXT NOT NULL
)";

const INSERT_COMMAND: &str = "INSERT INTO inbox (command) VALUES (?1)";
const SELECT_COMMANDS: &str = "SELECT id, command FROM inbox ORDER BY id";
const DELETE_UP_TO: &str = "DELETE FROM inbox WHERE id <= ?1";

pub struct Inbox {
    conn: Connection,
}

impl Inbox {
    pub fn new() -> Result<Inbox, StoreError> {
        Self::with_connection(Db::new()?.conn)
    }

    pub fn with_connection(conn: Connection) -> Result<Inbox, StoreError> {
        conn.execute(SCHEMA_INBOX, [])?;
        Ok(Inbox { conn })
    }

    pub fn push(&self, command: &Command) -> Result<(), StoreError> {
        let text = serde_json::to_string(command)?;
        self.conn.execute(INSERT_COMMAND, params![text])?;
        Ok(())
    }

    /// Removes and returns every queued command, oldest first.
    ///
    /// Rows that no longer deserialize (e.g. written by a newer version) are
    /// dropped.
    pub fn drain(&mut self) -> Result<Vec<Command>, StoreError> {
        let tx = self.conn.transaction()?;
        let rows: Vec<(i64, String)> = {
            let mut stmt = tx.prepare(SELECT_COMMANDS)?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<Result<_, _>>()?
        };

        if let Some((last_id, _)) = rows.last() {
            tx.execute(DELETE_UP_TO, params![last_id])?;
        }
        tx.commit()?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, text)| match serde_json::from_str(&text) {
                Ok(command) => Some(command),
                Err(e) => {
                    tracing::debug!(error = %e, "dropping unreadable inbox row");
                    None
                }
            })
            .collect())
    }
}
