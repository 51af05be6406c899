//! Broadcast channel for domain events.
//!
//! Pair upserts, pair removals and token-list swaps fan out to WebSocket
//! sessions through a single [`tokio::sync::broadcast`] channel. Sessions
//! filter what they forward; the bus itself carries everything.

use tokio::sync::broadcast;

use super::GatewayEvent;

/// Fan-out of [`GatewayEvent`]s to connected sessions.
///
/// Capacity comes from `EVENT_BUS_CAPACITY`. A session that falls more than
/// that many events behind loses the oldest ones and is told how many.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<GatewayEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Hands `event` to every live session and returns how many got it.
    ///
    /// With no session connected the event is discarded and 0 returned.
    pub fn publish(&self, event: GatewayEvent) -> usize {
        let kind = event.event_type_str();
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(kind, delivered, "event published");
        delivered
    }

    /// Opens a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GatewayEvent> {
        self.sender.subscribe()
    }

    /// Number of sessions currently listening.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PairId;
    use chrono::Utc;

    fn removed(id: &str) -> GatewayEvent {
        GatewayEvent::PairRemoved {
            pair_id: PairId::new(id),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(100);
        assert_eq!(bus.publish(removed("0x1")), 0);
    }

    #[tokio::test]
    async fn zero_capacity_still_delivers() {
        let bus = EventBus::new(0);
        let mut rx = bus.subscribe();
        assert_eq!(bus.publish(removed("0x9")), 1);
        let Ok(event) = rx.recv().await else {
            panic!("expected to receive event");
        };
        assert_eq!(event.event_type_str(), "pair_removed");
    }

    #[tokio::test]
    async fn subscriber_receives_event() {
        let bus = EventBus::new(100);
        let mut rx = bus.subscribe();
        bus.publish(removed("0x1"));

        let Ok(event) = rx.recv().await else {
            panic!("expected to receive event");
        };
        assert_eq!(event.pair_id(), Some(&PairId::new("0x1")));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(100);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.publish(removed("0x2")), 2);

        let (Ok(e1), Ok(e2)) = (rx1.recv().await, rx2.recv().await) else {
            panic!("both receivers should get the event");
        };
        assert_eq!(e1.pair_id(), e2.pair_id());
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(100);
        assert_eq!(bus.receiver_count(), 0);
        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);
        drop(rx1);
        assert_eq!(bus.receiver_count(), 1);
    }
}
