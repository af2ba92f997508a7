//! # Storage Traits
//!
//! Abstraction over the small key-value store that survives reloads. Only two
//! string flags live there (authentication and dark mode); appointments are
//! never persisted.

use anyhow::Result;

/// Key-value storage for persisted session flags
pub trait SessionStorage: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
