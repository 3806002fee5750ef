//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Settings store (`SQLite` or JSON file, via stell-db)
//! - Change broadcaster shared by every editor of this process
//! - Core services (via stell-core)
//!
//! Command handlers receive the composed context and delegate to `AppCore`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::ValueEnum;
use stell_core::paths::{database_path, json_store_path, normalize_user_path};
use stell_core::services::{AppCore, ChangeBroadcaster, SettingsEditor};
use stell_core::{DiscardConfirmation, SettingsStore, SiteConfig};
use stell_db::{CoreFactory, setup_database};

use crate::parser::Cli;

/// Where settings records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// `SQLite` database (default)
    Sqlite,
    /// Single JSON document, optionally size-capped
    Json,
}

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub backend: StoreBackend,
    /// Store file; the platform data directory is used when `None`.
    pub store_path: Option<PathBuf>,
    /// Byte limit for the JSON store.
    pub quota_bytes: Option<u64>,
    pub site: SiteConfig,
}

impl CliConfig {
    /// Default backend and paths, site read from the environment.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            backend: StoreBackend::Sqlite,
            store_path: None,
            quota_bytes: None,
            site: SiteConfig::from_env()?,
        })
    }

    /// Apply the global command-line options.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            backend: cli.store,
            store_path: cli.db.clone(),
            quota_bytes: cli.quota,
            ..Self::with_defaults()?
        })
    }

    /// The store file this configuration resolves to. An explicit path may
    /// come from a `.env` file, so `~` is expanded here.
    pub fn resolved_store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store_path {
            return Ok(normalize_user_path(&path.to_string_lossy())?);
        }
        Ok(match self.backend {
            StoreBackend::Sqlite => database_path()?,
            StoreBackend::Json => json_store_path()?,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Broadcaster every save and delete of this process is published on.
    pub broadcaster: Arc<ChangeBroadcaster>,
}

impl CliContext {
    /// Access the `AppCore`.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    pub const fn broadcaster(&self) -> &Arc<ChangeBroadcaster> {
        &self.broadcaster
    }

    /// A fresh editor session using `confirmation` for discard prompts.
    pub fn editor(&self, confirmation: Arc<dyn DiscardConfirmation>) -> SettingsEditor {
        self.app.editor(confirmation)
    }
}

/// Bootstrap the CLI application.
///
/// Opens the configured store (creating the `SQLite` schema when needed) and
/// assembles the `AppCore` around it.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let path = config.resolved_store_path()?;
    let store: Arc<dyn SettingsStore> = match config.backend {
        StoreBackend::Sqlite => {
            let pool = setup_database(&path).await?;
            CoreFactory::sqlite_store(pool)
        }
        StoreBackend::Json => CoreFactory::json_store(path.clone(), config.quota_bytes),
    };
    tracing::debug!(backend = ?config.backend, path = %path.display(), "Settings store opened");

    Ok(bootstrap_with(store, config.site))
}

/// Bootstrap around an existing store (for testing).
pub fn bootstrap_with(store: Arc<dyn SettingsStore>, site: SiteConfig) -> CliContext {
    let broadcaster = Arc::new(ChangeBroadcaster::with_defaults());
    let app = CoreFactory::build_app_core(store, site, broadcaster.clone());
    CliContext { app, broadcaster }
}
