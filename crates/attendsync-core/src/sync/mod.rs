//! Shared sync slot lifecycle.
//!
//! One key in a [`KeyValueStore`] holds the [`SyncPayload`] that every device
//! reads from and writes to. Writes are unconditional: the last device to
//! push replaces the whole payload, including anything another device merged
//! in since this device last pulled. There is no version check.

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::models::SyncPayload;
use crate::storage::KeyValueStore;
use crate::util::compact_text;

/// Read/write access to the shared sync slot
#[derive(Debug)]
pub struct SyncLifecycle<'a, S, C> {
    store: &'a S,
    clock: &'a C,
    key: &'a str,
}

impl<'a, S: KeyValueStore, C: Clock> SyncLifecycle<'a, S, C> {
    /// Bind to the slot stored under `key`
    pub const fn new(store: &'a S, clock: &'a C, key: &'a str) -> Self {
        Self { store, clock, key }
    }

    /// Key of the shared slot
    pub const fn key(&self) -> &str {
        self.key
    }

    /// Overwrite the shared slot with `payload`.
    ///
    /// `last_updated` is always replaced with the clock's current time. The
    /// stamped payload that was written is returned.
    pub fn push(&self, payload: SyncPayload) -> Result<SyncPayload> {
        let payload = SyncPayload {
            last_updated: self.clock.now_millis(),
            ..payload
        };
        let raw = serde_json::to_string(&payload)?;
        self.store.set(self.key, &raw)?;

        tracing::info!(
            "Pushed {} attendance records and {} users to '{}'",
            payload.attendance_data.len(),
            payload.users.len(),
            self.key
        );
        Ok(payload)
    }

    /// Read the shared slot.
    ///
    /// `Ok(None)` when nothing has been pushed yet. A stored value that is not
    /// a structurally valid payload is `CorruptSyncState`.
    pub fn pull(&self) -> Result<Option<SyncPayload>> {
        let Some(raw) = self.store.get(self.key)? else {
            tracing::debug!("Sync slot '{}' is empty", self.key);
            return Ok(None);
        };

        let payload = serde_json::from_str::<SyncPayload>(&raw).map_err(|error| {
            Error::CorruptSyncState(format!(
                "slot '{}' does not hold a sync payload ({error}): {}",
                self.key,
                compact_text(&raw)
            ))
        })?;

        tracing::debug!(
            "Pulled {} attendance records from '{}' (last updated {})",
            payload.attendance_data.len(),
            self.key,
            payload.last_updated
        );
        Ok(Some(payload))
    }

    /// Seed the slot with an empty payload when it is absent.
    ///
    /// Returns `true` when this call wrote the seed. An existing payload,
    /// empty or not, is left untouched, and a corrupt one is reported rather
    /// than overwritten.
    pub fn ensure_initialized(&self) -> Result<bool> {
        if self.pull()?.is_some() {
            return Ok(false);
        }

        self.push(SyncPayload::default())?;
        tracing::info!("Initialized empty sync slot '{}'", self.key);
        Ok(true)
    }
}
