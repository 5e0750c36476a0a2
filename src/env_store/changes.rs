use std::time::Instant;

use super::EnvValue;

/// The operation that produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// A full reload of the backing file (watcher-driven or explicit).
    Reload,
    /// A typed write through [`EnvStore::set`](super::EnvStore::set).
    Set,
}

/// A single key's transition as observed by the store.
///
/// Broadcast to subscribers when a reload or a write changes the mapping.
/// Memoisation does not produce a change; it re-types a value without
/// changing it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvChange {
    /// The key that changed.
    pub key: String,
    /// The previous value, if the key existed before.
    pub old_value: Option<EnvValue>,
    /// The new value; `None` when a reload removed the key.
    pub new_value: Option<EnvValue>,
    /// When the change was observed.
    pub timestamp: Instant,
    /// The operation that produced the change.
    pub source: ChangeSource,
}

impl EnvChange {
    /// Creates a change stamped with the current time.
    pub fn new(
        key: String,
        old_value: Option<EnvValue>,
        new_value: Option<EnvValue>,
        source: ChangeSource,
    ) -> Self {
        Self {
            key,
            old_value,
            new_value,
            timestamp: Instant::now(),
            source,
        }
    }
}
