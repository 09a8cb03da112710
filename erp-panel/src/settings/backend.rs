use async_trait::async_trait;

use super::SettingsError;

/// Raw byte storage behind [`SettingsProvider`](super::SettingsProvider).
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
