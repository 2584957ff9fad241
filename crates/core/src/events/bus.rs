use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::ContentEvent;

/// In-process event bus backed by `tokio::broadcast`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<ContentEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers. Returns how many
    /// subscribers received it; having none is not an error.
    pub fn publish(&self, event: ContentEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!("content event dropped, no subscribers");
                0
            }
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Collection, DocumentPath};
    use crate::events::types::{ChangeEvent, ChangeKind};
    use chrono::Utc;

    fn change(id: &'static str, rev: &str) -> ContentEvent {
        ContentEvent::DocumentChanged(ChangeEvent {
            path: DocumentPath::fixed(Collection::Content, id),
            kind: ChangeKind::Merged,
            previous_rev: None,
            result_rev: rev.to_string(),
            timestamp: Utc::now(),
        })
    }

    fn revision(event: ContentEvent) -> String {
        match event {
            ContentEvent::DocumentChanged(change) => change.result_rev,
            ContentEvent::Reconnect => String::new(),
        }
    }

    #[tokio::test]
    async fn delivers_in_publish_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(change("hero", "r1"));
        bus.publish(change("hero", "r2"));

        assert_eq!(revision(rx.recv().await.unwrap()), "r1");
        assert_eq!(revision(rx.recv().await.unwrap()), "r2");
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        assert_eq!(bus.publish(ContentEvent::Reconnect), 2);

        assert!(matches!(rx1.recv().await.unwrap(), ContentEvent::Reconnect));
        assert!(matches!(rx2.recv().await.unwrap(), ContentEvent::Reconnect));
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(ContentEvent::Reconnect), 0);
    }
}
