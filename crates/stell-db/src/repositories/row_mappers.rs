//! Row mapping and error translation shared by the stores.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use stell_core::{RepositoryError, SettingKey, SettingRecord, SettingValue};

// Primary SQLite result codes (extended codes share the low byte).
const SQLITE_PERM: i32 = 3;
const SQLITE_READONLY: i32 = 8;
const SQLITE_CONSTRAINT: i32 = 19;
const SQLITE_AUTH: i32 = 23;

/// Translate a sqlx error into the store's error vocabulary.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        let primary = db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| code & 0xff);
        match primary {
            Some(SQLITE_PERM | SQLITE_READONLY | SQLITE_AUTH) => {
                return RepositoryError::PermissionDenied(db.message().to_string());
            }
            Some(SQLITE_CONSTRAINT) => {
                return RepositoryError::Rejected(db.message().to_string());
            }
            _ => {}
        }
    }
    RepositoryError::Storage(err.to_string())
}

/// Map a `settings_kv` row to a record, checking the stored kind.
pub(crate) fn row_to_record(row: &SqliteRow) -> Result<SettingRecord, RepositoryError> {
    let raw_key: String = row.try_get("key").map_err(map_sqlx_error)?;
    let kind: String = row.try_get("kind").map_err(map_sqlx_error)?;
    let json: String = row.try_get("value").map_err(map_sqlx_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(map_sqlx_error)?;

    let key: SettingKey = raw_key
        .parse()
        .map_err(|e| RepositoryError::Serialization(format!("{raw_key}: {e}")))?;
    let value: SettingValue = serde_json::from_str(&json)
        .map_err(|e| RepositoryError::Serialization(format!("{raw_key}: {e}")))?;

    if value.kind().as_str() != kind {
        return Err(RepositoryError::Serialization(format!(
            "{raw_key}: row kind '{kind}' does not match payload kind '{}'",
            value.kind()
        )));
    }

    Ok(SettingRecord::new(key, value, updated_at))
}
