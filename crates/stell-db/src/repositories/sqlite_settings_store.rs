//! `SQLite` implementation of the `SettingsStore` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use stell_core::{RepositoryError, SettingKey, SettingRecord, SettingValue, SettingsStore};

use super::row_mappers::{map_sqlx_error, row_to_record};

/// `SQLite` implementation of the `SettingsStore` trait.
///
/// One row per Named Setting Record in `settings_kv`; the payload is the
/// tagged JSON of the value.
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    /// Create a new `SQLite` settings store.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ensure the settings table exists.
    pub async fn ensure_table(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS settings_kv (
                key TEXT PRIMARY KEY NOT NULL,
                kind TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_settings_kv_kind ON settings_kv(kind)")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn load(&self, key: &SettingKey) -> Result<Option<SettingRecord>, RepositoryError> {
        let row = sqlx::query("SELECT key, kind, value, updated_at FROM settings_kv WHERE key = ?")
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn save(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<SettingRecord, RepositoryError> {
        let json =
            serde_json::to_string(value).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let updated_at = Utc::now();

        sqlx::query(
            "INSERT OR REPLACE INTO settings_kv (key, kind, value, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(key.to_string())
        .bind(value.kind().as_str())
        .bind(&json)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        tracing::debug!(key = %key, bytes = json.len(), "Stored setting row");
        Ok(SettingRecord::new(key.clone(), value.clone(), updated_at))
    }

    async fn delete(&self, key: &SettingKey) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM settings_kv WHERE key = ?")
            .bind(key.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<SettingRecord>, RepositoryError> {
        let rows = sqlx::query("SELECT key, kind, value, updated_at FROM settings_kv ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_record).collect()
    }
}
