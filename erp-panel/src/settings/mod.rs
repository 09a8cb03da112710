//! Typed key-value settings.

mod backend;
mod memory;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Typed settings provider.
///
/// Wraps a [`SettingsBackend`] with bincode serialization. Clones share the
/// same backend.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A provider over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.read(key).await? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map(Some)
                .map_err(SettingsError::Deserialization),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.write(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }
}
