//! User overrides: notification snooze and weekend "allow today".
//!
//! Both values persist immediately on every change so a restarted watcher
//! (or a one-shot CLI invocation) sees the same state.

use crate::libs::store::{KeyValueStore, StoreError, ALLOWED_CODING_DATE_KEY, SNOOZE_UNTIL_KEY};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    /// Epoch ms until which notifications are suppressed; 0 when not snoozed.
    pub snooze_until_ms: i64,
    /// Date key on which weekend coding was allowed; empty when never allowed.
    pub allowed_coding_date_key: String,
}

impl Controls {
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            snooze_until_ms: store.get_as(SNOOZE_UNTIL_KEY)?.unwrap_or(0),
            allowed_coding_date_key: store.get_as(ALLOWED_CODING_DATE_KEY)?.unwrap_or_default(),
        })
    }

    pub fn is_snoozed(&self, now_ms: i64) -> bool {
        self.snooze_until_ms > now_ms
    }

    pub fn is_allowed_today(&self, date_key: &str) -> bool {
        !date_key.is_empty() && self.allowed_coding_date_key == date_key
    }

    /// Suppresses notifications for `minutes` from `now_ms`.
    pub fn set_snooze<S: KeyValueStore>(&mut self, store: &mut S, minutes: u64, now_ms: i64) -> Result<(), StoreError> {
        self.snooze_until_ms = now_ms + minutes as i64 * 60_000;
        store.set_as(SNOOZE_UNTIL_KEY, &self.snooze_until_ms)
    }

    pub fn resume<S: KeyValueStore>(&mut self, store: &mut S) -> Result<(), StoreError> {
        self.snooze_until_ms = 0;
        store.set_as(SNOOZE_UNTIL_KEY, &self.snooze_until_ms)
    }

    pub fn allow_today<S: KeyValueStore>(&mut self, store: &mut S, date_key: &str) -> Result<(), StoreError> {
        self.allowed_coding_date_key = date_key.to_string();
        store.set_as(ALLOWED_CODING_DATE_KEY, &self.allowed_coding_date_key)
    }
}
