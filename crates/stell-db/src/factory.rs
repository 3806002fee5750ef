//! Composition utilities for building `AppCore` with concrete stores.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use stell_core::services::{AppCore, SiteDefaults};
use stell_core::{Ports, SettingsEventEmitter, SettingsStore, SiteConfig};

use crate::repositories::{JsonFileSettingsStore, SqliteSettingsStore};

/// Factory for creating store instances and composed cores.
pub struct CoreFactory;

impl CoreFactory {
    pub fn sqlite_store(pool: SqlitePool) -> Arc<SqliteSettingsStore> {
        Arc::new(SqliteSettingsStore::new(pool))
    }

    /// JSON file store, optionally capped at `quota_bytes`.
    pub fn json_store(path: PathBuf, quota_bytes: Option<u64>) -> Arc<JsonFileSettingsStore> {
        let store = JsonFileSettingsStore::new(path);
        Arc::new(match quota_bytes {
            Some(bytes) => store.with_quota(bytes),
            None => store,
        })
    }

    /// Wire a store, the site defaults and an emitter into `Ports`.
    pub fn build_ports(
        store: Arc<dyn SettingsStore>,
        site: &SiteConfig,
        emitter: Arc<dyn SettingsEventEmitter>,
    ) -> Ports {
        Ports::new(store, Arc::new(SiteDefaults::new(site.clone())), emitter)
    }

    /// Build a complete `AppCore`. Equivalent to:
    ///
    /// ```ignore
    /// let ports = CoreFactory::build_ports(store, &site, emitter);
    /// let core = AppCore::new(ports, site);
    /// ```
    pub fn build_app_core(
        store: Arc<dyn SettingsStore>,
        site: SiteConfig,
        emitter: Arc<dyn SettingsEventEmitter>,
    ) -> AppCore {
        let ports = Self::build_ports(store, &site, emitter);
        AppCore::new(ports, site)
    }
}

/// In-memory `SQLite` database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn settings_store(&self) -> SqliteSettingsStore {
        SqliteSettingsStore::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stell_core::{NoopEmitter, SettingKey, ValueSource};

    #[tokio::test]
    async fn test_build_app_core_over_test_db() {
        let db = TestDb::new().await.unwrap();
        let core = CoreFactory::build_app_core(
            Arc::new(db.settings_store()),
            SiteConfig::with_defaults(),
            Arc::new(NoopEmitter),
        );

        let reconciled = core.reconciler().reconcile(&SettingKey::Robots).await.unwrap();
        assert_eq!(reconciled.source, ValueSource::ComputedDefault);
    }

    #[tokio::test]
    async fn test_json_store_quota_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoreFactory::json_store(dir.path().join("settings.json"), Some(10));
        let result = store
            .save(
                &SettingKey::Robots,
                &stell_core::SettingValue::Robots(stell_core::RobotsTxt::new("User-agent: *\n")),
            )
            .await;
        assert!(matches!(
            result,
            Err(stell_core::RepositoryError::QuotaExceeded { limit: 10, .. })
        ));
    }
}
