//! Typed in-process event bus.
//!
//! Views that render state owned by another store subscribe here instead of
//! sharing that store's memory.

use tokio::sync::broadcast;

use crate::document::DocumentType;

const DEFAULT_CAPACITY: usize = 64;

/// Notifications published by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The document-type allowlist was changed and persisted.
    DocumentTypesChanged { types: Vec<DocumentType> },
    /// The user configuration was changed and persisted.
    ConfigChanged,
    /// The selection cursor moved to another document.
    DocumentSelected { id: String },
}

/// Fire-and-forget broadcast of [`SessionEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event; returns how many subscribers received it.
    ///
    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, event: SessionEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let delivered = bus.publish(SessionEvent::ConfigChanged);
        assert_eq!(delivered, 2);
        assert_eq!(a.recv().await.unwrap(), SessionEvent::ConfigChanged);
        assert_eq!(b.recv().await.unwrap(), SessionEvent::ConfigChanged);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(SessionEvent::ConfigChanged), 0);
    }
}
