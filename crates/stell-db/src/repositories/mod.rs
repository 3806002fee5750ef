//! Settings store implementations.
//!
//! These encapsulate all SQL and file access. Neither `SqlitePool` nor file
//! handles ever appear in the port trait signatures.

mod json_file_store;
mod row_mappers;
mod sqlite_settings_store;

pub use json_file_store::JsonFileSettingsStore;
pub use sqlite_settings_store::SqliteSettingsStore;
