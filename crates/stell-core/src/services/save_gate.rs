//! Save Gate: the only path from a draft to the store.

use thiserror::Error;

use crate::domain::{SettingKey, SettingRecord};
use crate::draft::Draft;
use crate::ports::{ErrorCategory, RepositoryError};
use crate::services::SettingsService;
use crate::validation::{ValidationError, validate_setting};

/// Why a draft could not be saved. The draft stays as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error("Nothing to save for {0}: no unsaved edits")]
    NotDirty(SettingKey),

    #[error("Draft for {0} is still loading")]
    NotLoaded(SettingKey),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

impl SaveError {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotDirty(_) | Self::NotLoaded(_) | Self::Validation(_) => {
                ErrorCategory::Validation
            }
            Self::Persistence(e) => e.category(),
        }
    }
}

/// Permits a write only when the draft is dirty and its value validates.
#[derive(Clone)]
pub struct SaveGate {
    service: SettingsService,
}

impl SaveGate {
    pub const fn new(service: SettingsService) -> Self {
        Self { service }
    }

    /// Whether [`save`](Self::save) would reach the store.
    pub fn check(draft: &Draft) -> Result<(), SaveError> {
        let Some(value) = draft.value() else {
            return Err(SaveError::NotLoaded(draft.key().clone()));
        };
        if !draft.is_dirty() {
            return Err(SaveError::NotDirty(draft.key().clone()));
        }
        validate_setting(draft.key(), value)?;
        Ok(())
    }

    /// Write the draft. On success the draft becomes reconciled from the
    /// stored record; on failure it is left dirty with its edits intact.
    pub async fn save(&self, draft: &mut Draft) -> Result<SettingRecord, SaveError> {
        Self::check(draft)?;
        let Some(value) = draft.value() else {
            return Err(SaveError::NotLoaded(draft.key().clone()));
        };
        let record = self.service.write(draft.key(), value).await?;
        draft.mark_saved(record.clone());
        Ok(record)
    }
}
