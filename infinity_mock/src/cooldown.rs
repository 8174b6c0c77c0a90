//! Resend cooldowns backed by `DashMap` for concurrent access.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use infinity_api::contract::RetryAfter;

/// Per-key cooldown windows.
///
/// A key that is cooling down refuses a new start until its window has
/// passed. Every start first drops the windows that have already expired.
pub struct Cooldowns {
    store: DashMap<String, RetryAfter>,
    window: Duration,
}

impl Cooldowns {
    pub fn new(window: Duration) -> Self {
        Self {
            store: DashMap::new(),
            window,
        }
    }

    /// Starts a window for `key` at `now`.
    ///
    /// Returns the new retry instant, or `Err` with the running window's
    /// instant when `key` is still cooling down.
    pub fn try_start(&self, key: &str, now: DateTime<Utc>) -> Result<RetryAfter, RetryAfter> {
        let next = RetryAfter::after(now, self.window);
        self.store.retain(|_, running| running.instant() > now);
        match self.store.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let running = *entry.get();
                if running.instant() > now {
                    Err(running)
                } else {
                    entry.insert(next);
                    Ok(next)
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(next);
                Ok(next)
            }
        }
    }
}
