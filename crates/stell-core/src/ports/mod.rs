//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No filesystem implementation details
//! - Store trait is minimal and key-focused

pub mod confirmation;
pub mod defaults;
pub mod event_emitter;
pub mod settings_store;

use std::sync::Arc;
use thiserror::Error;

pub use confirmation::{DiscardConfirmation, FixedConfirmation};
pub use defaults::{DefaultsProvider, NoDefaults};
pub use event_emitter::{NoopEmitter, SettingsEventEmitter};
pub use settings_store::SettingsStore;

#[cfg(test)]
pub use settings_store::MockSettingsStore;

/// Container for the infrastructure a settings session needs.
///
/// Built once at the composition root and handed to `AppCore`.
#[derive(Clone)]
pub struct Ports {
    /// Persistence for Named Setting Records.
    pub store: Arc<dyn SettingsStore>,
    /// Computed default provider.
    pub defaults: Arc<dyn DefaultsProvider>,
    /// Change notification sink.
    pub emitter: Arc<dyn SettingsEventEmitter>,
}

impl Ports {
    /// Create a new Ports container.
    pub fn new(
        store: Arc<dyn SettingsStore>,
        defaults: Arc<dyn DefaultsProvider>,
        emitter: Arc<dyn SettingsEventEmitter>,
    ) -> Self {
        Self {
            store,
            defaults,
            emitter,
        }
    }
}

/// How an error should be presented to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The value itself is wrong; fix the draft.
    Validation,
    /// The store refused the write (session, permissions, policy).
    Permission,
    /// The store could not complete the write right now; try again.
    Transient,
}

/// Domain-specific errors for store operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The requested record was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to write (read-only file, expired session).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The write would exceed the store's size limit.
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: u64, limit: u64 },

    /// A store-side policy rejected the write.
    #[error("Rejected by policy: {0}")]
    Rejected(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::PermissionDenied(_) | Self::Rejected(_) => ErrorCategory::Permission,
            Self::QuotaExceeded { .. } | Self::Storage(_) => ErrorCategory::Transient,
            Self::NotFound(_) | Self::Serialization(_) => ErrorCategory::Validation,
        }
    }
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map it to their own error types (CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Setting validation failed.
    #[error(transparent)]
    Validation(#[from] crate::validation::ValidationError),

    /// An imported document could not be parsed.
    #[error(transparent)]
    Parse(#[from] crate::codec::ParseError),

    /// The Save Gate refused or failed a save.
    #[error(transparent)]
    Save(#[from] crate::services::SaveError),

    /// A draft edit could not be applied.
    #[error(transparent)]
    Draft(#[from] crate::draft::DraftError),

    /// The requested operation does not apply to the active draft.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Repository(e) => e.category(),
            Self::Save(e) => e.category(),
            Self::Validation(_) | Self::Parse(_) | Self::Draft(_) | Self::Unsupported(_) => {
                ErrorCategory::Validation
            }
            Self::Internal(_) => ErrorCategory::Transient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_categories() {
        assert_eq!(
            RepositoryError::PermissionDenied("read-only".into()).category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            RepositoryError::QuotaExceeded {
                needed: 10,
                limit: 5
            }
            .category(),
            ErrorCategory::Transient
        );
        assert_eq!(
            RepositoryError::Rejected("row level security".into()).category(),
            ErrorCategory::Permission
        );
    }

    #[test]
    fn test_core_error_from_validation() {
        let err: CoreError = crate::validation::ValidationError::EmptyField("title").into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.to_string(), "title cannot be empty");
    }
}
