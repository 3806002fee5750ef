#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod codec;
pub mod domain;
pub mod draft;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod site;
pub mod validation;

// Re-export commonly used types for convenience
pub use codec::{ParseError, parse_robots, parse_sitemap, render_sitemap};
pub use domain::{
    ChangeFreq, ContentSection, PageContent, PagePath, PageSeo, RedirectList, RedirectRule,
    RedirectStatus, RobotsTxt, SeoUpdate, SettingKey, SettingKind, SettingRecord, SettingValue,
    Sitemap, SitemapUrl,
};
pub use draft::{Draft, DraftError, DraftState, Reconciled, ValueSource};
pub use events::SettingsEvent;
pub use ports::{
    CoreError, DefaultsProvider, DiscardConfirmation, ErrorCategory, FixedConfirmation,
    NoDefaults, NoopEmitter, Ports, RepositoryError, SettingsEventEmitter, SettingsStore,
};
pub use services::{
    AppCore, AuditFinding, AuditReport, AuditService, ChangeBroadcaster, ExportedFile,
    OpenOutcome, Reconciler, SaveError, SaveGate, SettingsEditor, SettingsService, Severity,
    SiteDefaults, export_value,
};
pub use site::{PageDefinition, SiteConfig};
pub use validation::{ValidationError, validate_setting};

// Re-export path utilities
pub use paths::{
    PathError, data_root, database_path, env_file_path, json_store_path, normalize_user_path,
    persist_env_value,
};

#[cfg(test)]
use tokio_test as _;
