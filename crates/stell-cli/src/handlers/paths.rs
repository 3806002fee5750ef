//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics.

use anyhow::Result;
use stell_core::paths::{DATA_DIR_ENV, data_root, database_path, env_file_path, json_store_path};

use crate::bootstrap::CliConfig;

/// Print resolved paths in `key = value` format.
pub fn execute(config: &CliConfig) -> Result<()> {
    println!("data_root     = {}", data_root()?.display());
    println!("database      = {}", database_path()?.display());
    println!("json_store    = {}", json_store_path()?.display());
    println!("env_file      = {}", env_file_path()?.display());
    println!("active_store  = {}", config.resolved_store_path()?.display());
    println!("(override the data root with {DATA_DIR_ENV})");
    Ok(())
}
