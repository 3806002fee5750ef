//! Settings change events.
//!
//! Events are a same-process refresh signal: they tell other open views that
//! a setting changed. They carry no delivery or ordering guarantee and are
//! never persisted.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "setting_saved", "key": "seo:/about", "value": { "kind": "page_seo", ... }, "updatedAt": "..." }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SettingKey, SettingRecord, SettingValue};

/// A settings change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingsEvent {
    /// A record was saved through the Save Gate.
    SettingSaved {
        key: SettingKey,
        value: SettingValue,
        #[serde(rename = "updatedAt")]
        updated_at: DateTime<Utc>,
    },

    /// A record was deleted; consumers fall back to computed defaults.
    SettingDeleted { key: SettingKey },
}

impl SettingsEvent {
    /// Create a saved event from the stored record.
    pub fn saved(record: &SettingRecord) -> Self {
        Self::SettingSaved {
            key: record.key.clone(),
            value: record.value.clone(),
            updated_at: record.updated_at,
        }
    }

    /// Create a deleted event.
    pub const fn deleted(key: SettingKey) -> Self {
        Self::SettingDeleted { key }
    }

    /// The key the event is about.
    pub const fn key(&self) -> &SettingKey {
        match self {
            Self::SettingSaved { key, .. } | Self::SettingDeleted { key } => key,
        }
    }

    /// Event name for wire protocols and log fields.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::SettingSaved { .. } => "setting:saved",
            Self::SettingDeleted { .. } => "setting:deleted",
        }
    }
}
