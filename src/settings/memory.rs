use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{Setting, SettingsError, SettingsStore};

/// Process-local settings store for development and tests.
///
/// Every batch write runs under one write lock, so racing seeders see each
/// other's writes and readers never observe half a batch.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: RwLock<BTreeMap<String, Setting>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: impl IntoIterator<Item = Setting>) -> Self {
        let entries = settings.into_iter().map(|s| (s.key.clone(), s)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn fetch_all(&self) -> Result<Vec<Setting>, SettingsError> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Setting>, SettingsError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn insert_if_absent(&self, settings: &[Setting]) -> Result<u64, SettingsError> {
        let mut entries = self.entries.write().await;
        let mut inserted = 0;
        for setting in settings {
            if !entries.contains_key(&setting.key) {
                entries.insert(setting.key.clone(), setting.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn upsert_many(&self, settings: &[Setting]) -> Result<(), SettingsError> {
        let mut entries = self.entries.write().await;
        for setting in settings {
            entries.insert(setting.key.clone(), setting.clone());
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), SettingsError> {
        Ok(())
    }
}
