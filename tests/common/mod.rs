//! Test utilities and fixtures for assetsafe-core integration tests

#![allow(dead_code)]

use std::sync::Arc;

use assetsafe_core::clock::ManualClock;
use assetsafe_core::rate_limit::RateLimiter;
use assetsafe_core::secure_storage::SecureStorage;
use assetsafe_core::storage::MemoryStorage;

/// Fixed test epoch (millis). Arbitrary but stable.
pub const START_MS: i64 = 1_700_000_000_000;

pub fn memory_storage() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(START_MS))
}

/// Rate limiter over in-memory storage with a manual clock, plus handles to
/// both for direct inspection and time travel.
pub fn test_limiter() -> (RateLimiter, Arc<MemoryStorage>, Arc<ManualClock>) {
    let storage = memory_storage();
    let clock = manual_clock();
    let limiter = RateLimiter::with_clock(storage.clone(), clock.clone());
    (limiter, storage, clock)
}

/// Secure storage over in-memory storage with a manual clock.
pub fn test_secure_storage() -> (SecureStorage, Arc<MemoryStorage>, Arc<ManualClock>) {
    let storage = memory_storage();
    let clock = manual_clock();
    let secure = SecureStorage::with_clock(storage.clone(), clock.clone());
    (secure, storage, clock)
}
