//! Key-value persistence boundary.
//!
//! The evaluation engine never touches the database directly. It is handed
//! something implementing [`KeyValueStore`] and reads/writes JSON values by
//! fixed key. Production uses the SQLite-backed [`crate::db::kv::SqliteStore`];
//! tests use [`MemoryStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Persisted mapping `date key -> DayStats`, capped at the 30 latest days.
pub const STATS_KEY: &str = "care.stats.v1";
/// Epoch milliseconds until which notifications are suppressed.
pub const SNOOZE_UNTIL_KEY: &str = "care.snoozeUntilMs";
/// Date key on which weekend coding was explicitly allowed.
pub const ALLOWED_CODING_DATE_KEY: &str = "care.allowedCodingDateKey";
/// Set while the HTML report should be kept fresh by the watcher.
pub const REPORT_OPEN_KEY: &str = "care.reportOpen";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Reads a typed value. A stored value that does not deserialize into
    /// `T` is treated as missing.
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        let Some(value) = self.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(typed) => Ok(Some(typed)),
            Err(e) => {
                tracing::debug!(key, error = %e, "ignoring malformed persisted value");
                Ok(None)
            }
        }
    }

    fn set_as<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        self.set(key, serde_json::to_value(value)?)
    }
}

/// In-process store, used by tests and as a scratch store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
