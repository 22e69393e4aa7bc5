//! Typed socket notifications and the fan-out channel delivering them.
//!
//! The session's read loop turns every inbound frame (and every transport
//! transition) into one [`SocketEvent`] and hands it to the [`EventBus`];
//! console views, stat collectors, and tests subscribe independently.

use tokio::sync::broadcast;

/// Notification emitted by a [`SocketSession`](super::SocketSession).
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    /// A parsed `stats` payload.
    Stats(serde_json::Value),
    /// The panel announced token expiry; the session has already
    /// re-fetched and re-sent its auth frame when this is delivered.
    TokenExpiring,
    /// A transport-level error, forwarded rather than thrown.
    TransportError(String),
    /// The connection closed; emitted exactly once per connection.
    Closed {
        /// Close reason — `"closed by caller"` for explicit closes,
        /// otherwise the peer's reason.
        reason: String,
    },
    /// Any other event, under its underscore-normalized name.
    Named {
        /// Normalized event name (spaces replaced with underscores).
        name: String,
        /// First frame argument, if the frame carried any.
        payload: Option<serde_json::Value>,
    },
}

impl SocketEvent {
    /// The normalized name of this event, as used by [`EventFilter`](super::EventFilter).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Stats(_) => "stats",
            Self::TokenExpiring => "token_expiring",
            Self::TransportError(_) => "error",
            Self::Closed { .. } => "close",
            Self::Named { name, .. } => name,
        }
    }
}

/// Fan-out channel for [`SocketEvent`]s.
///
/// A receiver that falls more than `capacity` events behind loses the
/// oldest ones; console traffic is bursty, so callers size the capacity
/// through [`PanelConfig`](crate::PanelConfig).
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SocketEvent>,
}

impl EventBus {
    /// Creates a bus whose ring buffer holds `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Delivers an event to every current receiver, returning how many
    /// got it. With nobody listening the event is dropped.
    pub fn publish(&self, event: SocketEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Opens a receiver for everything published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SocketEvent> {
        self.sender.subscribe()
    }

    /// Number of receivers currently listening.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn publish_with_no_listeners_drops_the_event() {
        let bus = EventBus::new(8);
        assert_eq!(bus.publish(SocketEvent::TokenExpiring), 0);
    }

    #[tokio::test]
    async fn subscriber_gets_the_stats_payload() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(SocketEvent::Stats(
            serde_json::json!({"memory_bytes": 512, "cpu_absolute": 3.0}),
        ));

        let Ok(SocketEvent::Stats(stats)) = rx.recv().await else {
            panic!("expected a stats notification");
        };
        assert_eq!(stats.get("memory_bytes"), Some(&serde_json::json!(512)));
    }

    #[tokio::test]
    async fn every_receiver_sees_the_close() {
        let bus = EventBus::new(8);
        let mut console = bus.subscribe();
        let mut collector = bus.subscribe();

        let delivered = bus.publish(SocketEvent::Closed {
            reason: "closed by caller".to_string(),
        });
        assert_eq!(delivered, 2);

        for rx in [&mut console, &mut collector] {
            let Ok(SocketEvent::Closed { reason }) = rx.recv().await else {
                panic!("expected a close notification");
            };
            assert_eq!(reason, "closed by caller");
        }
    }

    #[test]
    fn receiver_count_follows_subscriptions() {
        let bus = EventBus::new(8);
        assert_eq!(bus.receiver_count(), 0);

        let console = bus.subscribe();
        let _collector = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        drop(console);
        assert_eq!(bus.receiver_count(), 1);
    }

    #[test]
    fn event_names_are_normalized_forms() {
        assert_eq!(SocketEvent::TokenExpiring.name(), "token_expiring");
        assert_eq!(
            SocketEvent::Closed {
                reason: String::new()
            }
            .name(),
            "close"
        );
        assert_eq!(
            SocketEvent::TransportError("boom".to_string()).name(),
            "error"
        );
    }
}
