//! Client-side rate limiting for sensitive actions.
//!
//! Caps attempts per (identifier, action) pair inside a rolling window:
//! login attempts, OTP requests, bulk uploads. State lives in the shared
//! client store, so this is a UX deterrent against accidental abuse, not a
//! security boundary - the real limits are enforced server-side.
//!
//! Configure defaults via environment variables:
//! - RATE_LIMIT_MAX_ATTEMPTS (default: 5)
//! - RATE_LIMIT_WINDOW_MINUTES (default: 15)

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::Storage;

/// Prefix for all rate-limit entries in the shared storage namespace.
const KEY_PREFIX: &str = "rate_limit:";

/// Attempt cap and window length for one class of action.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub max_attempts: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_attempts: u32, window_minutes: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_minutes * 60),
        }
    }

    fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new(5, 15)
    }
}

/// One tracking bucket, persisted as JSON under `rate_limit:{action}:{id}`.
#[derive(Debug, Serialize, Deserialize)]
struct RateLimitEntry {
    attempts: u32,
    window_start: i64,
    blocked: bool,
}

/// Result of recording an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub blocked: bool,
    pub attempts_remaining: u32,
    /// When the current window ends (epoch millis).
    pub reset_at: i64,
}

/// Tracks attempt counts per (identifier, action) in the shared store.
///
/// Read-modify-write in [`RateLimiter::record_attempt`] is not atomic;
/// near-simultaneous calls for the same key can under-count. Accepted for
/// the single-client context this runs in.
pub struct RateLimiter {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    fn entry_key(identifier: &str, action: &str) -> String {
        format!("{KEY_PREFIX}{action}:{identifier}")
    }

    /// Load the stored entry for a key, treating malformed data as absent.
    ///
    /// A corrupted entry must never lock a legitimate user out, so parse
    /// failures fail open. Backend failures still surface as `Err`.
    fn load_entry(&self, key: &str) -> Result<Option<RateLimitEntry>> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!("Discarding malformed rate-limit entry {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Check whether the identifier is currently blocked for this action.
    ///
    /// Never increments. A stale entry (window elapsed) is deleted as a side
    /// effect and reported as not limited.
    pub fn is_rate_limited(
        &self,
        identifier: &str,
        action: &str,
        policy: &RateLimitPolicy,
    ) -> Result<bool> {
        let key = Self::entry_key(identifier, action);
        let Some(entry) = self.load_entry(&key)? else {
            return Ok(false);
        };

        let now = self.clock.now_ms();
        if now - entry.window_start >= policy.window_ms() {
            self.storage.remove(&key)?;
            return Ok(false);
        }

        Ok(entry.attempts >= policy.max_attempts)
    }

    /// Record one real attempt and report the resulting state.
    ///
    /// The only mutating operation. Callers must invoke it exactly once per
    /// actual attempt, never speculatively.
    pub fn record_attempt(
        &self,
        identifier: &str,
        action: &str,
        policy: &RateLimitPolicy,
    ) -> Result<AttemptOutcome> {
        let key = Self::entry_key(identifier, action);
        let now = self.clock.now_ms();

        let mut entry = self.load_entry(&key)?.unwrap_or(RateLimitEntry {
            attempts: 0,
            window_start: now,
            blocked: false,
        });

        if now - entry.window_start >= policy.window_ms() {
            entry.attempts = 0;
            entry.window_start = now;
        }

        entry.attempts += 1;
        entry.blocked = entry.attempts >= policy.max_attempts;

        self.storage.set(&key, &serde_json::to_string(&entry)?)?;

        if entry.blocked {
            tracing::debug!(
                "Rate limit reached for action {} (attempts: {})",
                action,
                entry.attempts
            );
        }

        Ok(AttemptOutcome {
            blocked: entry.blocked,
            attempts_remaining: policy.max_attempts.saturating_sub(entry.attempts),
            reset_at: entry.window_start + policy.window_ms(),
        })
    }

    /// Drop all attempt history for this (identifier, action).
    ///
    /// Called after a successful action that should not count toward the
    /// limit, e.g. a verified login clearing failed-attempt history.
    pub fn clear(&self, identifier: &str, action: &str) -> Result<()> {
        self.storage.remove(&Self::entry_key(identifier, action))
    }

    /// When the current window ends, or `None` if there is no live entry.
    pub fn reset_time(
        &self,
        identifier: &str,
        action: &str,
        policy: &RateLimitPolicy,
    ) -> Result<Option<i64>> {
        let key = Self::entry_key(identifier, action);
        let Some(entry) = self.load_entry(&key)? else {
            return Ok(None);
        };

        let now = self.clock.now_ms();
        if now - entry.window_start >= policy.window_ms() {
            return Ok(None);
        }

        Ok(Some(entry.window_start + policy.window_ms()))
    }
}
