//! `.env` file utilities.
//!
//! User overrides (site URL, site name) live in `<data>/.env` and are loaded
//! with `dotenvy` at startup by the CLI.

use std::fs;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;
use crate::site::{SITE_NAME_ENV, SITE_URL_ENV};

/// Location of the `.env` file that stores user overrides.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}

/// Persist a key=value pair into the `.env` file.
///
/// An existing key is updated in place; a new key is appended.
pub fn persist_env_value(key: &str, value: &str) -> Result<(), PathError> {
    let env_path = env_file_path()?;
    let env_error = |e: std::io::Error| PathError::EnvFileError {
        path: env_path.clone(),
        reason: e.to_string(),
    };

    let existing = if env_path.exists() {
        fs::read_to_string(&env_path).map_err(env_error)?
    } else {
        String::new()
    };

    let mut updated = false;
    let mut output: Vec<String> = Vec::new();
    for line in existing.lines() {
        match line.split_once('=') {
            Some((lhs, _)) if lhs.trim() == key => {
                if !updated {
                    output.push(format!("{key}={value}"));
                    updated = true;
                }
            }
            _ => output.push(line.to_string()),
        }
    }

    if !updated {
        if output.last().is_some_and(|line| !line.is_empty()) {
            output.push(String::new());
        }
        output.push(format!("{key}={value}"));
    }

    let mut content = output.join("\n");
    content.push('\n');
    fs::write(&env_path, content).map_err(env_error)
}

pub fn persist_site_url(url: &str) -> Result<(), PathError> {
    persist_env_value(SITE_URL_ENV, url)
}

pub fn persist_site_name(name: &str) -> Result<(), PathError> {
    persist_env_value(SITE_NAME_ENV, name)
}
