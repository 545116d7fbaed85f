use mw_core::{EventSink, WorldEvent};
use parking_lot::Mutex;
use tokio::sync::broadcast;

/// Fans events out to any number of async subscribers.
///
/// Publishing never blocks. Events sent while nobody is subscribed are
/// dropped, and slow subscribers see `RecvError::Lagged` once they fall
/// more than `capacity` events behind.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<WorldEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorldEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventSink for BroadcastSink {
    fn publish(&self, event: WorldEvent) {
        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }
}

/// Keeps every event in memory, in publish order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<WorldEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<WorldEvent> {
        self.events.lock().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<WorldEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: WorldEvent) {
        self.events.lock().push(event);
    }
}

/// Writes each event to the log at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: WorldEvent) {
        tracing::info!(world = %event.world_id(), event = event.event_type(), "world event");
    }
}

#[cfg(test)]
mod tests {
    use mw_core::WorldId;

    use super::*;

    fn saved(world_id: WorldId) -> WorldEvent {
        WorldEvent::WorldSaved { world_id }
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        let a = WorldId::new();
        let b = WorldId::new();
        sink.publish(saved(a));
        sink.publish(saved(b));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.events(), vec![saved(a), saved(b)]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn broadcast_without_subscribers_is_silent() {
        let sink = BroadcastSink::new(4);
        sink.publish(saved(WorldId::new()));
        assert_eq!(sink.subscriber_count(), 0);
    }

    #[test]
    fn broadcast_reaches_every_subscriber() {
        let sink = BroadcastSink::new(4);
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();
        let id = WorldId::new();
        sink.publish(saved(id));
        assert_eq!(first.try_recv().unwrap(), saved(id));
        assert_eq!(second.try_recv().unwrap(), saved(id));
        assert!(first.try_recv().is_err());
    }
}
