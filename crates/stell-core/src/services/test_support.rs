//! Shared fixtures for service tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{SettingKey, SettingRecord, SettingValue};
use crate::ports::{RepositoryError, SettingsStore};

/// Map-backed store that counts writes.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, SettingRecord>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(key: SettingKey, value: SettingValue) -> Self {
        let store = Self::new();
        store
            .records
            .lock()
            .unwrap()
            .insert(key.to_string(), SettingRecord::new(key, value, Utc::now()));
        store
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self, key: &SettingKey) -> Result<Option<SettingRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(&key.to_string()).cloned())
    }

    async fn save(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<SettingRecord, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let record = SettingRecord::new(key.clone(), value.clone(), Utc::now());
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), record.clone());
        Ok(record)
    }

    async fn delete(&self, key: &SettingKey) -> Result<bool, RepositoryError> {
        Ok(self.records.lock().unwrap().remove(&key.to_string()).is_some())
    }

    async fn list(&self) -> Result<Vec<SettingRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}
