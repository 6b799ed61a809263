//! AssetSafe client core
//!
//! This library provides the security-sensitive core of the AssetSafe client:
//! attempt rate limiting, obfuscated local storage with expiry, subscription
//! feature gating, and passphrase-based document encryption, all layered over
//! a pluggable synchronous key/value storage boundary.

pub mod clock;
pub mod config;
pub mod crypto;
pub mod error;
pub mod rate_limit;
pub mod secure_storage;
pub mod storage;
pub mod subscription;
