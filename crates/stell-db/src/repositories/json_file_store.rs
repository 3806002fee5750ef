//! JSON file implementation of the `SettingsStore` trait.
//!
//! All records live in one JSON document, rewritten on every change. An
//! optional byte quota caps the document size the way browser storage does.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use stell_core::{RepositoryError, SettingKey, SettingRecord, SettingValue, SettingsStore};

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    version: u32,
    records: BTreeMap<String, StoredEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: SettingValue,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

/// Settings store backed by a single JSON file.
pub struct JsonFileSettingsStore {
    path: PathBuf,
    quota_bytes: Option<u64>,
    read_only: bool,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes: None,
            read_only: false,
            lock: Mutex::new(()),
        }
    }

    /// Refuse writes that would grow the document past `bytes`.
    #[must_use]
    pub const fn with_quota(mut self, bytes: u64) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Refuse every write with `PermissionDenied`.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, RepositoryError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(map_io_error(&self.path, &e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    async fn write_document(&self, document: &mut Document) -> Result<(), RepositoryError> {
        if self.read_only {
            return Err(RepositoryError::PermissionDenied(format!(
                "{} is opened read-only",
                self.path.display()
            )));
        }

        document.version = DOCUMENT_VERSION;
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(limit) = self.quota_bytes {
            let needed = json.len() as u64;
            if needed > limit {
                tracing::warn!(path = %self.path.display(), needed, limit, "Settings quota exceeded");
                return Err(RepositoryError::QuotaExceeded { needed, limit });
            }
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(parent, &e))?;
        }

        // Write next to the target and rename so readers never see a torn file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| map_io_error(&tmp, &e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| map_io_error(&self.path, &e))?;
        Ok(())
    }
}

fn map_io_error(path: &Path, err: &io::Error) -> RepositoryError {
    match err.kind() {
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            RepositoryError::PermissionDenied(format!("{}: {err}", path.display()))
        }
        _ => RepositoryError::Storage(format!("{}: {err}", path.display())),
    }
}

fn entry_to_record(raw_key: &str, entry: StoredEntry) -> Result<SettingRecord, RepositoryError> {
    let key: SettingKey = raw_key
        .parse()
        .map_err(|e| RepositoryError::Serialization(format!("{raw_key}: {e}")))?;
    Ok(SettingRecord::new(key, entry.value, entry.updated_at))
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn load(&self, key: &SettingKey) -> Result<Option<SettingRecord>, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        let raw_key = key.to_string();
        document
            .records
            .remove(&raw_key)
            .map(|entry| entry_to_record(&raw_key, entry))
            .transpose()
    }

    async fn save(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<SettingRecord, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        let updated_at = Utc::now();
        document.records.insert(
            key.to_string(),
            StoredEntry {
                value: value.clone(),
                updated_at,
            },
        );
        self.write_document(&mut document).await?;

        tracing::debug!(key = %key, path = %self.path.display(), "Stored setting in JSON file");
        Ok(SettingRecord::new(key.clone(), value.clone(), updated_at))
    }

    async fn delete(&self, key: &SettingKey) -> Result<bool, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if document.records.remove(&key.to_string()).is_none() {
            return Ok(false);
        }
        self.write_document(&mut document).await?;
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<SettingRecord>, RepositoryError> {
        let _guard = self.lock.lock().await;
        let document = self.read_document().await?;
        document
            .records
            .into_iter()
            .map(|(raw_key, entry)| entry_to_record(&raw_key, entry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stell_core::{RedirectList, RedirectRule, RedirectStatus, RobotsTxt};
    use tempfile::tempdir;

    fn redirects() -> SettingValue {
        SettingValue::Redirects(RedirectList::new(vec![RedirectRule::new(
            "/old-services",
            "/services",
            RedirectStatus::MovedPermanently,
        )]))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("settings.json"));
        assert!(store.load(&SettingKey::Redirects).await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let saved = JsonFileSettingsStore::new(&path)
            .save(&SettingKey::Redirects, &redirects())
            .await
            .unwrap();

        let reopened = JsonFileSettingsStore::new(&path);
        let loaded = reopened.load(&SettingKey::Redirects).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_quota_exceeded_leaves_file_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = JsonFileSettingsStore::new(&path).with_quota(400);

        store
            .save(&SettingKey::Robots, &SettingValue::Robots(RobotsTxt::new("User-agent: *\n")))
            .await
            .unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let big = SettingValue::Robots(RobotsTxt::new("Disallow: /x\n".repeat(100)));
        let result = store.save(&SettingKey::Robots, &big).await;

        match result {
            Err(RepositoryError::QuotaExceeded { needed, limit }) => {
                assert_eq!(limit, 400);
                assert!(needed > limit);
            }
            other => panic!("expected quota error, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_read_only_store_denies_writes() {
        let dir = tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("settings.json")).read_only();

        let result = store.save(&SettingKey::Redirects, &redirects()).await;
        assert!(matches!(result, Err(RepositoryError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ definitely not json").unwrap();

        let store = JsonFileSettingsStore::new(&path);
        assert!(matches!(
            store.list().await,
            Err(RepositoryError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("settings.json"));
        store.save(&SettingKey::Redirects, &redirects()).await.unwrap();

        assert!(store.delete(&SettingKey::Redirects).await.unwrap());
        assert!(!store.delete(&SettingKey::Redirects).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
