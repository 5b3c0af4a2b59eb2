//! Decoupled event bus for call lifecycle updates.
//!
//! The [`ResilientCaller`](crate::resilience::ResilientCaller) emits events
//! via [`EventBus::emit`]; the spinner and anything else interested subscribe
//! via [`EventBus::subscribe`]. Built on [`tokio::sync::broadcast`] so
//! multiple listeners can react independently.

use std::time::Duration;

use tokio::sync::broadcast;

/// Events that flow through the system.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A call began (first attempt about to be issued).
    CallStarted { max_attempts: u32 },
    /// An attempt failed and another one follows after `retry_in`.
    AttemptFailed {
        attempt: u32,
        max_attempts: u32,
        reason: String,
        retry_in: Duration,
    },
    /// The call ended, with text or after exhausting its attempts.
    CallFinished { success: bool, attempts: u32 },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emit_reaches_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.emit(Event::CallStarted { max_attempts: 5 });

        assert_eq!(
            rx.recv().await.unwrap(),
            Event::CallStarted { max_attempts: 5 }
        );
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(Event::CallFinished {
            success: true,
            attempts: 2,
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1, e2);
        assert!(matches!(e1, Event::CallFinished { success: true, attempts: 2 }));
    }

    #[test]
    fn emit_without_subscribers_returns_zero() {
        let bus = EventBus::default();
        assert_eq!(bus.emit(Event::CallStarted { max_attempts: 1 }), 0);
    }

    #[test]
    fn emit_with_subscriber_returns_count() {
        let bus = EventBus::default();
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.emit(Event::CallStarted { max_attempts: 1 }), 2);
    }
}
