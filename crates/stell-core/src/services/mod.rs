//! Core services - the application's business logic layer.
//!
//! This module contains high-level service abstractions that orchestrate
//! between ports (trait interfaces) and domain logic. Services here are
//! pure orchestrators - they don't know about concrete implementations.

mod app_core;
mod audit;
mod broadcaster;
mod editor;
mod export;
mod reconciler;
mod save_gate;
mod settings_service;
mod site_defaults;

#[cfg(test)]
pub(crate) mod test_support;

pub use app_core::AppCore;
pub use audit::{AuditFinding, AuditReport, AuditService, Severity, SiteSnapshot, audit_snapshot};
pub use broadcaster::ChangeBroadcaster;
pub use editor::{OpenOutcome, SettingsEditor};
pub use export::{ExportedFile, export_value};
pub use reconciler::Reconciler;
pub use save_gate::{SaveError, SaveGate};
pub use settings_service::SettingsService;
pub use site_defaults::SiteDefaults;
