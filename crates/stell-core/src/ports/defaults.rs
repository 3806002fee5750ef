//! Computed default provider port.

use crate::domain::{SettingKey, SettingValue};

/// Source of computed defaults, the middle layer of reconciliation.
///
/// Returns `None` when no default can be derived for `key`; the reconciler
/// then falls back to [`SettingValue::hard_coded`].
pub trait DefaultsProvider: Send + Sync {
    fn computed_default(&self, key: &SettingKey) -> Option<SettingValue>;
}

/// Provider that never computes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultsProvider for NoDefaults {
    fn computed_default(&self, _key: &SettingKey) -> Option<SettingValue> {
        None
    }
}
