//! Daily activity statistics and their rolling persisted log.
//!
//! One [`DayStats`] record exists per local calendar day, keyed by its
//! `YYYY-MM-DD` date key. The persisted mapping keeps only the 30 most
//! recent days; because date keys sort lexicographically in chronological
//! order, "most recent" means "greatest key".
//!
//! Writes are opportunistic. [`StatsLedger::should_save`] only asks for a
//! save when at least a minute of active time accrued, the break count
//! changed, or five minutes passed since the last save.

use crate::libs::store::{KeyValueStore, StoreError, STATS_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of days retained in the persisted log.
pub const STATS_RETENTION_DAYS: usize = 30;
/// Active-time growth that triggers a save.
pub const SAVE_ACTIVE_DELTA_MS: u64 = 60_000;
/// Maximum time between saves while the watcher is running.
pub const SAVE_MAX_INTERVAL_MS: i64 = 5 * 60_000;

/// Aggregated activity for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    /// Approximate focused, non-idle time in milliseconds.
    pub active_ms: u64,
    /// Number of detected breaks (idle gaps).
    pub break_count: u32,
}

pub type StatsLog = BTreeMap<String, DayStats>;

/// Today's in-memory record plus the watermark of the last save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsLedger {
    pub today: DayStats,
    last_saved_active_ms: u64,
    last_saved_break_count: u32,
    last_saved_at_ms: i64,
}

impl StatsLedger {
    /// Loads the stored record for `date_key`, or a zeroed one.
    pub fn load<S: KeyValueStore>(store: &S, date_key: &str, now_ms: i64) -> Result<Self, StoreError> {
        let today = history(store)?.remove(date_key).unwrap_or_default();
        Ok(Self {
            today,
            last_saved_active_ms: today.active_ms,
            last_saved_break_count: today.break_count,
            last_saved_at_ms: now_ms,
        })
    }

    /// Writes today's record under `date_key` and prunes the log.
    pub fn save<S: KeyValueStore>(&mut self, store: &mut S, date_key: &str, now_ms: i64) -> Result<(), StoreError> {
        let mut log = history(store)?;
        log.insert(date_key.to_string(), self.today);
        prune(&mut log);
        store.set_as(STATS_KEY, &log)?;

        self.last_saved_active_ms = self.today.active_ms;
        self.last_saved_break_count = self.today.break_count;
        self.last_saved_at_ms = now_ms;
        Ok(())
    }

    pub fn should_save(&self, now_ms: i64) -> bool {
        self.today.active_ms.saturating_sub(self.last_saved_active_ms) >= SAVE_ACTIVE_DELTA_MS
            || self.today.break_count != self.last_saved_break_count
            || now_ms - self.last_saved_at_ms >= SAVE_MAX_INTERVAL_MS
    }
}

/// Every retained day, oldest first. Missing or malformed data reads as empty.
pub fn history<S: KeyValueStore>(store: &S) -> Result<StatsLog, StoreError> {
    Ok(store.get_as::<StatsLog>(STATS_KEY)?.unwrap_or_default())
}

/// Drops the oldest entries until at most [`STATS_RETENTION_DAYS`] remain.
pub fn prune(log: &mut StatsLog) {
    while log.len() > STATS_RETENTION_DAYS {
        log.pop_first();
    }
}
