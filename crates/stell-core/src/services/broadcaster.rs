//! In-process change broadcaster.
//!
//! Every open view that wants to hear about saved or deleted settings holds a
//! receiver from [`ChangeBroadcaster::subscribe`]. The broadcaster is an
//! explicit value created at the composition root and passed to whoever needs
//! it; there is no process-wide instance.

use tokio::sync::broadcast;

use crate::events::SettingsEvent;
use crate::ports::SettingsEventEmitter;

/// Fan-out of [`SettingsEvent`]s to any number of subscribers.
///
/// Slow subscribers may miss events when the buffer overflows; they see a
/// `Lagged` error and should reload what they display.
#[derive(Debug, Clone)]
pub struct ChangeBroadcaster {
    sender: broadcast::Sender<SettingsEvent>,
}

impl ChangeBroadcaster {
    /// Create a broadcaster buffering up to `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a broadcaster with the default capacity (256 events).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// Register a new listener. It receives events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBroadcaster {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SettingsEventEmitter for ChangeBroadcaster {
    fn emit(&self, event: SettingsEvent) {
        tracing::debug!(
            event = event.event_name(),
            key = %event.key(),
            subscribers = self.sender.receiver_count(),
            "Broadcasting settings change"
        );
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SettingKey;

    #[tokio::test]
    async fn test_every_subscriber_receives_event() {
        let broadcaster = ChangeBroadcaster::with_defaults();
        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        broadcaster.emit(SettingsEvent::deleted(SettingKey::Robots));

        assert_eq!(first.recv().await.unwrap().key(), &SettingKey::Robots);
        assert_eq!(second.recv().await.unwrap().key(), &SettingKey::Robots);
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let broadcaster = ChangeBroadcaster::new(4);
        broadcaster.emit(SettingsEvent::deleted(SettingKey::Sitemap));
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let broadcaster = ChangeBroadcaster::with_defaults();
        broadcaster.emit(SettingsEvent::deleted(SettingKey::Sitemap));

        let mut late = broadcaster.subscribe();
        broadcaster.emit(SettingsEvent::deleted(SettingKey::Redirects));
        assert_eq!(late.recv().await.unwrap().key(), &SettingKey::Redirects);
    }

    #[tokio::test]
    async fn test_independent_broadcasters_do_not_share_events() {
        let a = ChangeBroadcaster::with_defaults();
        let b = ChangeBroadcaster::with_defaults();
        let mut rx_b = b.subscribe();

        a.emit(SettingsEvent::deleted(SettingKey::Robots));
        assert!(rx_b.try_recv().is_err());
    }
}
