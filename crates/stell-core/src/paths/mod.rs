//! Path utilities for stell data directories.
//!
//! - Data root (`STELL_DATA_DIR` or the platform data directory)
//! - Database and JSON store locations
//! - The `.env` file holding user overrides
//!
//! No interactive or terminal I/O happens here.

mod config;
mod database;
mod error;
mod platform;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{env_file_path, persist_env_value, persist_site_name, persist_site_url};
pub use database::{database_path, json_store_path};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, normalize_user_path};
