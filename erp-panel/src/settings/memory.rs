use async_trait::async_trait;
use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

/// Settings kept for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.entries.remove(key);
        Ok(())
    }
}
