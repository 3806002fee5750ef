//! Reconciliation of persisted values and defaults.

use std::sync::Arc;

use crate::domain::{SettingKey, SettingValue};
use crate::draft::{Reconciled, ValueSource};
use crate::ports::{CoreError, DefaultsProvider, SettingsStore};
use crate::validation::ValidationError;

/// Chooses the value a draft starts from.
///
/// Priority is strict: a persisted record always wins regardless of its age,
/// then the computed default, then the hard-coded fallback.
#[derive(Clone)]
pub struct Reconciler {
    store: Arc<dyn SettingsStore>,
    defaults: Arc<dyn DefaultsProvider>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn SettingsStore>, defaults: Arc<dyn DefaultsProvider>) -> Self {
        Self { store, defaults }
    }

    /// Reconcile `key` against the store. Store failures are returned as-is;
    /// they never silently fall through to a default.
    pub async fn reconcile(&self, key: &SettingKey) -> Result<Reconciled, CoreError> {
        if let Some(record) = self.store.load(key).await? {
            if record.value.kind() != key.kind() {
                return Err(ValidationError::KindMismatch {
                    key: key.to_string(),
                    expected: key.kind(),
                    actual: record.value.kind(),
                }
                .into());
            }
            tracing::debug!(key = %key, "Reconciled from persisted record");
            return Ok(Reconciled {
                key: key.clone(),
                value: record.value,
                source: ValueSource::Persisted,
                updated_at: Some(record.updated_at),
            });
        }

        Ok(self.fallback(key))
    }

    /// The value `key` has when nothing is persisted.
    pub fn fallback(&self, key: &SettingKey) -> Reconciled {
        let (value, source) = self.defaults.computed_default(key).map_or_else(
            || (SettingValue::hard_coded(key), ValueSource::HardCodedDefault),
            |value| (value, ValueSource::ComputedDefault),
        );
        tracing::debug!(key = %key, source = source.label(), "Reconciled from defaults");
        Reconciled {
            key: key.clone(),
            value,
            source,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RobotsTxt, SettingRecord};
    use crate::ports::{MockSettingsStore, NoDefaults, RepositoryError};
    use crate::services::SiteDefaults;
    use crate::services::test_support::MemoryStore;
    use crate::site::SiteConfig;
    use chrono::{TimeZone, Utc};

    fn site_defaults() -> Arc<SiteDefaults> {
        Arc::new(SiteDefaults::new(SiteConfig::with_defaults()))
    }

    #[tokio::test]
    async fn test_persisted_value_wins_regardless_of_age() {
        let old = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let mut store = MockSettingsStore::new();
        store.expect_load().returning(move |key| {
            Ok(Some(SettingRecord::new(
                key.clone(),
                SettingValue::Robots(RobotsTxt::new("User-agent: *\nDisallow: /\n")),
                old,
            )))
        });
        let reconciler = Reconciler::new(Arc::new(store), site_defaults());

        let reconciled = reconciler.reconcile(&SettingKey::Robots).await.unwrap();
        assert_eq!(reconciled.source, ValueSource::Persisted);
        assert_eq!(reconciled.updated_at, Some(old));
        assert_eq!(
            reconciled.value.as_robots().unwrap().content,
            "User-agent: *\nDisallow: /\n"
        );
    }

    #[tokio::test]
    async fn test_computed_default_for_registered_page() {
        let reconciler = Reconciler::new(Arc::new(MemoryStore::new()), site_defaults());
        let reconciled = reconciler
            .reconcile(&SettingKey::page_seo("/about").unwrap())
            .await
            .unwrap();

        assert_eq!(reconciled.source, ValueSource::ComputedDefault);
        let seo = reconciled.value.as_page_seo().unwrap();
        assert_eq!(seo.title, "About Page");
        assert_eq!(seo.canonical, "https://stellmedia.com/about");
    }

    #[tokio::test]
    async fn test_hard_coded_fallback_when_nothing_computes() {
        let reconciler = Reconciler::new(Arc::new(MemoryStore::new()), Arc::new(NoDefaults));
        let key = SettingKey::page_seo("/unlisted").unwrap();
        let reconciled = reconciler.reconcile(&key).await.unwrap();

        assert_eq!(reconciled.source, ValueSource::HardCodedDefault);
        assert_eq!(reconciled.value, SettingValue::hard_coded(&key));
        assert!(reconciled.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_store_error_is_not_masked_by_defaults() {
        let mut store = MockSettingsStore::new();
        store
            .expect_load()
            .returning(|_| Err(RepositoryError::Storage("disk on fire".into())));
        let reconciler = Reconciler::new(Arc::new(store), site_defaults());

        let result = reconciler.reconcile(&SettingKey::Sitemap).await;
        assert!(matches!(
            result,
            Err(CoreError::Repository(RepositoryError::Storage(_)))
        ));
    }
}
