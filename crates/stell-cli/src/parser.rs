//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::bootstrap::StoreBackend;
use crate::commands::Commands;

/// Command-line interface for editing the site's SEO settings.
///
/// Global options pick the storage backend; subcommands do the work.
#[derive(Parser)]
#[command(name = "stell")]
#[command(about = "Edit sitemap, robots.txt, redirects and page SEO for the Stell site")]
#[command(version)]
pub struct Cli {
    /// Storage backend for settings records
    #[arg(long, value_enum, env = "STELL_STORE", global = true, default_value_t = StoreBackend::Sqlite)]
    pub store: StoreBackend,

    /// Path of the store file (SQLite database or JSON document)
    #[arg(long = "db", env = "STELL_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Size limit in bytes for the JSON store
    #[arg(long, global = true)]
    pub quota: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
