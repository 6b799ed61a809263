//! Obfuscated local storage with per-item expiry.
//!
//! Centralizes the expiry check for short-lived sensitive values (session
//! hints, temporary elevated-privilege flags) so callers don't reimplement
//! it. Values are base64-obfuscated to deter casual inspection of the
//! underlying store.
//!
//! This is deliberately NOT cryptography and must not be upgraded to it:
//! data that needs real confidentiality goes through [`crate::crypto`],
//! and callers rely on this module staying cheap and reversible.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::Storage;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Persisted item layout: `{"value": ..., "expiry": ..., "encrypted": true}`.
///
/// `encrypted` records that the obfuscation was applied; every write path
/// in this module sets it.
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry: Option<i64>,
    encrypted: bool,
}

/// Key/value store with obfuscation and lazy expiry.
pub struct SecureStorage {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl SecureStorage {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    fn obfuscate(value: &str) -> String {
        BASE64.encode(value.as_bytes())
    }

    /// Reverse the obfuscation.
    ///
    /// Returns an empty string when the stored value does not decode; callers
    /// must treat "" as "value unavailable". A legitimately empty stored
    /// value is indistinguishable from this recovery path.
    fn deobfuscate(key: &str, encoded: &str) -> String {
        let Ok(bytes) = BASE64.decode(encoded) else {
            tracing::warn!("Failed to decode stored value for key {}", key);
            return String::new();
        };
        match String::from_utf8(bytes) {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Stored value for key {} is not valid UTF-8", key);
                String::new()
            }
        }
    }

    /// Store a value, optionally expiring after `expiry_hours`.
    ///
    /// Fractional hours are supported; expiry resolution is milliseconds.
    pub fn set_item(&self, key: &str, value: &str, expiry_hours: Option<f64>) -> Result<()> {
        let item = StoredItem {
            value: Self::obfuscate(value),
            expiry: expiry_hours.map(|hours| self.clock.now_ms() + (hours * MILLIS_PER_HOUR) as i64),
            encrypted: true,
        };
        self.storage.set(key, &serde_json::to_string(&item)?)
    }

    /// Read a value back, honoring expiry.
    ///
    /// An expired item is removed on read and reported as absent. A blob
    /// that does not parse as a stored item is reported as absent, never as
    /// an error.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };

        let item: StoredItem = match serde_json::from_str(&raw) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!("Unreadable stored item for key {}: {}", key, e);
                return Ok(None);
            }
        };

        if let Some(expiry) = item.expiry {
            if self.clock.now_ms() >= expiry {
                tracing::debug!("Removing expired item {}", key);
                self.storage.remove(key)?;
                return Ok(None);
            }
        }

        if item.encrypted {
            Ok(Some(Self::deobfuscate(key, &item.value)))
        } else {
            Ok(Some(item.value))
        }
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove(key)
    }

    /// Sweep the whole namespace, removing every expired item.
    ///
    /// Keys that don't parse as stored items belong to other consumers of
    /// the shared store and are left untouched. Returns the number of items
    /// removed.
    pub fn clear_expired(&self) -> Result<usize> {
        let now = self.clock.now_ms();
        let mut removed = 0;

        for key in self.storage.keys()? {
            let Some(raw) = self.storage.get(&key)? else {
                continue;
            };
            let Ok(item) = serde_json::from_str::<StoredItem>(&raw) else {
                continue;
            };
            if let Some(expiry) = item.expiry {
                if now >= expiry {
                    self.storage.remove(&key)?;
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            tracing::debug!("Cleared {} expired items", removed);
        }
        Ok(removed)
    }

    /// Store a short-lived elevated-privilege flag with a fixed 1-hour expiry.
    pub fn set_temporary_access(&self, key: &str, value: &str) -> Result<()> {
        self.set_item(key, value, Some(1.0))
    }
}
