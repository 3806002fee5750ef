//! Settings service - validated access to the settings store.

use std::sync::Arc;

use crate::domain::{SettingKey, SettingRecord, SettingValue};
use crate::events::SettingsEvent;
use crate::ports::{CoreError, RepositoryError, SettingsEventEmitter, SettingsStore};
use crate::validation::{ValidationError, validate_setting};

/// Service for stored settings records.
///
/// Writes go through validation first and emit a change event after the
/// store has accepted them. Calling [`save`](Self::save) twice with the same
/// value performs two writes with the same end state.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    emitter: Arc<dyn SettingsEventEmitter>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>, emitter: Arc<dyn SettingsEventEmitter>) -> Self {
        Self { store, emitter }
    }

    /// The stored record for `key`, if any.
    pub async fn get(&self, key: &SettingKey) -> Result<Option<SettingRecord>, CoreError> {
        let record = self.store.load(key).await?;
        if let Some(record) = &record {
            if record.value.kind() != key.kind() {
                return Err(ValidationError::KindMismatch {
                    key: key.to_string(),
                    expected: key.kind(),
                    actual: record.value.kind(),
                }
                .into());
            }
        }
        Ok(record)
    }

    /// Validate and persist `value` under `key`, then notify listeners.
    pub async fn save(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<SettingRecord, CoreError> {
        validate_setting(key, value)?;
        Ok(self.write(key, value).await?)
    }

    /// Persist an already validated value and notify listeners.
    pub(crate) async fn write(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<SettingRecord, RepositoryError> {
        let record = self.store.save(key, value).await.inspect_err(|e| {
            tracing::warn!(key = %key, error = %e, "Setting save failed");
        })?;
        tracing::info!(key = %key, kind = %key.kind(), "Setting saved");
        self.emitter.emit(SettingsEvent::saved(&record));
        Ok(record)
    }

    /// Remove the stored record. Returns whether one existed.
    pub async fn delete(&self, key: &SettingKey) -> Result<bool, CoreError> {
        let existed = self.store.delete(key).await?;
        if existed {
            tracing::info!(key = %key, "Setting deleted");
            self.emitter.emit(SettingsEvent::deleted(key.clone()));
        }
        Ok(existed)
    }

    pub async fn list(&self) -> Result<Vec<SettingRecord>, CoreError> {
        Ok(self.store.list().await?)
    }
}
