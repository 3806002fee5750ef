//! Settings editor session.
//!
//! Holds the single active [`Draft`] and wires it to the reconciler, the
//! Save Gate and the discard confirmation. One editor edits one record at a
//! time.

use std::sync::Arc;

use crate::domain::{SeoUpdate, SettingKey, SettingRecord};
use crate::draft::{Draft, DraftError, ValueSource};
use crate::events::SettingsEvent;
use crate::ports::{CoreError, DiscardConfirmation};
use crate::services::export::{ExportedFile, export_value};
use crate::services::{Reconciler, SaveGate, SettingsService};

/// Result of asking the editor to open a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The key is now active, reconciled from `source`.
    Opened(ValueSource),
    /// The user declined to discard unsaved edits; the previous draft stays.
    Declined,
}

pub struct SettingsEditor {
    reconciler: Reconciler,
    gate: SaveGate,
    service: SettingsService,
    confirmation: Arc<dyn DiscardConfirmation>,
    draft: Option<Draft>,
}

impl SettingsEditor {
    pub fn new(
        reconciler: Reconciler,
        service: SettingsService,
        confirmation: Arc<dyn DiscardConfirmation>,
    ) -> Self {
        Self {
            reconciler,
            gate: SaveGate::new(service.clone()),
            service,
            confirmation,
            draft: None,
        }
    }

    pub const fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn active_key(&self) -> Option<&SettingKey> {
        self.draft.as_ref().map(Draft::key)
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.as_ref().is_some_and(Draft::is_dirty)
    }

    /// Make `key` the active record.
    ///
    /// With unsaved edits on another key the confirmation port is asked
    /// first. The new draft is the freshly reconciled value for `key`, never
    /// a merge with the old one. If reconciliation fails the previous draft
    /// is kept.
    pub async fn open(&mut self, key: SettingKey) -> Result<OpenOutcome, CoreError> {
        if let Some(current) = &self.draft {
            if current.is_dirty() {
                if current.key() == &key {
                    return Ok(OpenOutcome::Opened(
                        current.source().unwrap_or(ValueSource::Persisted),
                    ));
                }
                if !self.confirmation.confirm_discard(current.key(), &key) {
                    tracing::debug!(current = %current.key(), next = %key, "Discard declined");
                    return Ok(OpenOutcome::Declined);
                }
                tracing::info!(key = %current.key(), "Discarding unsaved edits");
            }
        }

        let reconciled = self.reconciler.reconcile(&key).await?;
        let source = reconciled.source;
        self.draft = Some(Draft::from_reconciled(reconciled));
        Ok(OpenOutcome::Opened(source))
    }

    /// The active draft for editing.
    pub fn draft_mut(&mut self) -> Result<&mut Draft, CoreError> {
        self.draft
            .as_mut()
            .ok_or_else(|| CoreError::Unsupported("no setting is open".to_string()))
    }

    pub fn edit_seo(&mut self, update: &SeoUpdate) -> Result<(), CoreError> {
        Ok(self.draft_mut()?.edit_seo(update)?)
    }

    pub fn set_robots(&mut self, text: impl Into<String>) -> Result<(), CoreError> {
        Ok(self.draft_mut()?.set_robots(text)?)
    }

    /// Replace the sitemap draft from XML. On a parse error the draft is
    /// left exactly as it was.
    pub fn import_sitemap_xml(&mut self, xml: &str) -> Result<usize, CoreError> {
        let draft = self.draft_mut()?;
        match draft.import_sitemap_xml(xml) {
            Ok(count) => Ok(count),
            Err(DraftError::Parse(e)) => {
                tracing::warn!(error = %e, "Sitemap import rejected");
                Err(CoreError::Parse(e))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save the active draft through the Save Gate.
    pub async fn save(&mut self) -> Result<SettingRecord, CoreError> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(CoreError::Unsupported("no setting is open".to_string()));
        };
        Ok(self.gate.save(draft).await?)
    }

    /// Drop unsaved edits of the active draft.
    pub fn discard(&mut self) -> Result<(), CoreError> {
        self.draft_mut()?.discard();
        Ok(())
    }

    /// Delete the stored record of the active key. The draft is reconciled
    /// again and falls back to its defaults.
    pub async fn delete(&mut self) -> Result<bool, CoreError> {
        let Some(key) = self.active_key().cloned() else {
            return Err(CoreError::Unsupported("no setting is open".to_string()));
        };
        let existed = self.service.delete(&key).await?;
        let reconciled = self.reconciler.reconcile(&key).await?;
        self.draft = Some(Draft::from_reconciled(reconciled));
        Ok(existed)
    }

    /// Render the current draft value as a downloadable file.
    pub fn export(&self) -> Result<ExportedFile, CoreError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| CoreError::Unsupported("no setting is open".to_string()))?;
        let value = draft
            .value()
            .ok_or_else(|| CoreError::Draft(DraftError::NotLoaded(draft.key().clone())))?;
        export_value(draft.key(), value)
    }

    /// React to a change made elsewhere.
    ///
    /// A clean draft for the same key picks up the new value. A dirty draft
    /// keeps the user's edits. Returns whether the draft changed.
    pub fn apply_event(&mut self, event: &SettingsEvent) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        if draft.key() != event.key() || draft.is_dirty() {
            return false;
        }
        match event {
            SettingsEvent::SettingSaved {
                key,
                value,
                updated_at,
            } => {
                draft.mark_saved(SettingRecord::new(key.clone(), value.clone(), *updated_at));
            }
            SettingsEvent::SettingDeleted { key } => {
                let reconciled = self.reconciler.fallback(key);
                draft.reconcile(reconciled);
            }
        }
        true
    }
}
