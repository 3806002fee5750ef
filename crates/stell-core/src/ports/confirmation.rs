//! Discard confirmation port.
//!
//! Switching the active key while the draft has unsaved edits asks the user
//! first. Adapters decide how to ask (terminal prompt, dialog, or a fixed
//! answer in tests).

use crate::domain::SettingKey;

pub trait DiscardConfirmation: Send + Sync {
    /// Return `true` to discard unsaved edits of `current` and open `next`.
    fn confirm_discard(&self, current: &SettingKey, next: &SettingKey) -> bool;
}

/// Always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub bool);

impl DiscardConfirmation for FixedConfirmation {
    fn confirm_discard(&self, _current: &SettingKey, _next: &SettingKey) -> bool {
        self.0
    }
}
