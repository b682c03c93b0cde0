//! Settings backend trait.

use async_trait::async_trait;

use super::SettingsError;

/// Backend trait for settings storage.
///
/// Implementations only move raw bytes; `SettingsProvider` layers typed
/// serialization on top. `SqliteBackend` survives restarts, `MemoryBackend`
/// does not.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Get raw bytes for a key, `None` if never stored.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Store raw bytes under a key, replacing any previous value.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), SettingsError>;

    /// List every stored key starting with `prefix`.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
