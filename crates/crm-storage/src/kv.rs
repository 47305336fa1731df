//! Raw key/value backend trait.

use crate::error::StorageResult;

/// A durable string-to-string store.
///
/// Implementations must be thread-safe. Each call is independent: there is
/// no transaction spanning two keys, which is why [`crate::DurableTokenStore`]
/// has to detect half-written credentials itself.
pub trait KeyValueStore: Send + Sync {
    /// Reads an entry.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes an entry, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes an entry. Removing a missing entry is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
