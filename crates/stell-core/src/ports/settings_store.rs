//! Settings store trait definition.
//!
//! This port defines the interface for Named Setting Record persistence.
//! Implementations handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{SettingKey, SettingRecord, SettingValue};

/// Key-addressed persistence for settings records.
///
/// # Design Rules
///
/// - No `sqlx` or filesystem types in signatures
/// - `save` fully replaces the stored value (no merge at this level)
/// - `save` stamps `updated_at` and returns the stored record
/// - Failures are returned as typed [`RepositoryError`]s, never swallowed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the record stored under `key`, or `None` if nothing was saved.
    async fn load(&self, key: &SettingKey) -> Result<Option<SettingRecord>, RepositoryError>;

    /// Persist `value` under `key`, replacing any previous value.
    async fn save(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<SettingRecord, RepositoryError>;

    /// Delete the record under `key`. Returns whether a record existed.
    async fn delete(&self, key: &SettingKey) -> Result<bool, RepositoryError>;

    /// All stored records, ordered by key.
    async fn list(&self) -> Result<Vec<SettingRecord>, RepositoryError>;
}
