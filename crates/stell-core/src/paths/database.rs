//! Storage file locations.

use std::fs;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

fn data_dir() -> Result<PathBuf, PathError> {
    let data_dir = data_root()?.join("data");
    fs::create_dir_all(&data_dir).map_err(|e| PathError::CreateFailed {
        path: data_dir.clone(),
        reason: e.to_string(),
    })?;
    Ok(data_dir)
}

/// Path to the `SQLite` database (`<data>/data/stell.db`).
///
/// The `data/` subdirectory is created if it doesn't exist.
pub fn database_path() -> Result<PathBuf, PathError> {
    Ok(data_dir()?.join("stell.db"))
}

/// Path to the JSON settings document (`<data>/data/settings.json`).
pub fn json_store_path() -> Result<PathBuf, PathError> {
    Ok(data_dir()?.join("settings.json"))
}
