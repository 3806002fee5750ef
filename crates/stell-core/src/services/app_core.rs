//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, tests)
//! receive an `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{DiscardConfirmation, Ports};
use crate::site::SiteConfig;

use super::{AuditService, Reconciler, SaveGate, SettingsEditor, SettingsService};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let broadcaster = Arc::new(ChangeBroadcaster::with_defaults());
/// let ports = Ports::new(store, Arc::new(SiteDefaults::new(site.clone())), broadcaster);
/// let core = AppCore::new(ports, site);
///
/// let mut editor = core.editor(Arc::new(FixedConfirmation(true)));
/// editor.open(SettingKey::Sitemap).await?;
/// ```
pub struct AppCore {
    settings: SettingsService,
    reconciler: Reconciler,
    gate: SaveGate,
    audit: AuditService,
    site: SiteConfig,
}

impl AppCore {
    pub fn new(ports: Ports, site: SiteConfig) -> Self {
        let settings = SettingsService::new(ports.store.clone(), ports.emitter);
        let reconciler = Reconciler::new(ports.store, ports.defaults);
        Self {
            gate: SaveGate::new(settings.clone()),
            audit: AuditService::new(reconciler.clone(), settings.clone(), site.clone()),
            settings,
            reconciler,
            site,
        }
    }

    /// Access the settings service.
    pub const fn settings(&self) -> &SettingsService {
        &self.settings
    }

    pub const fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub const fn gate(&self) -> &SaveGate {
        &self.gate
    }

    pub const fn audit(&self) -> &AuditService {
        &self.audit
    }

    pub const fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Start an editing session that asks `confirmation` before discarding
    /// unsaved edits.
    pub fn editor(&self, confirmation: Arc<dyn DiscardConfirmation>) -> SettingsEditor {
        SettingsEditor::new(self.reconciler.clone(), self.settings.clone(), confirmation)
    }
}
