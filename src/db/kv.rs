//! SQLite-backed key-value settings store.
//!
//! Values are stored as JSON text keyed by fixed string constants
//! (see [`crate::libs::store`]). Writes are plain upserts; only one watcher
//! process ever writes a given key, so no transaction is needed.
//!
//! ```rust,no_run
//! use care::db::kv::SqliteStore;
//! use care::libs::store::KeyValueStore;
//!
//! let mut store = SqliteStore::new()?;
//! store.set("care.reportOpen", serde_json::json!(true))?;
//! # Ok::<(), care::libs::store::StoreError>(())
//! ```

use crate::db::db::Db;
use crate::libs::store::{KeyValueStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// SQL schema for the settings table.
const SCHEMA_KV: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
)";

const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";

const UPSERT_VALUE: &str = "INSERT INTO kv (key, value) VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the application database and ensures the table exists.
    pub fn new() -> Result<SqliteStore, StoreError> {
        Self::with_connection(Db::new()?.conn)
    }

    pub fn with_connection(conn: Connection) -> Result<SqliteStore, StoreError> {
        conn.execute(SCHEMA_KV, [])?;
        Ok(SqliteStore { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let raw: Option<String> = self.conn.query_row(SELECT_VALUE, params![key], |row| row.get(0)).optional()?;
        match raw {
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::debug!(key, error = %e, "ignoring unreadable settings row");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let text = serde_json::to_string(&value)?;
        self.conn.execute(UPSERT_VALUE, params![key, text])?;
        Ok(())
    }
}
