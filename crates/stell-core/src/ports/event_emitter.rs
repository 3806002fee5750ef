//! Event emitter trait for settings change notifications.
//!
//! This module defines the abstraction for emitting settings events.
//! Implementations handle transport details (broadcast channels, logging).

use crate::events::SettingsEvent;

/// Trait for emitting settings events.
///
/// This abstraction keeps event plumbing consistent across adapters and
/// prevents channel types from becoming part of the public API surface.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and one-shot CLI commands without listeners
/// - `ChangeBroadcaster` - In-process fan-out to subscribed views
pub trait SettingsEventEmitter: Send + Sync {
    /// Emit a settings event.
    ///
    /// Fire-and-forget: this method must not block and must not fail.
    fn emit(&self, event: SettingsEvent);
}

/// A no-op event emitter for tests and CLI contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl SettingsEventEmitter for NoopEmitter {
    fn emit(&self, _event: SettingsEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SettingKey;
    use std::sync::Arc;

    #[test]
    fn test_noop_emitter() {
        let emitter = NoopEmitter::new();
        emitter.emit(SettingsEvent::deleted(SettingKey::Robots));
    }

    #[test]
    fn test_arc_emitter() {
        let emitter: Arc<dyn SettingsEventEmitter> = Arc::new(NoopEmitter::new());
        emitter.emit(SettingsEvent::deleted(SettingKey::Sitemap));
    }
}
