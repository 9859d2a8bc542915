use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::InventoryId;

const CHANNEL_CAPACITY: usize = 256;

/// Advisory lifecycle events published per session. Nothing in the engine
/// blocks on subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Validated { violations: usize },
    SaveStarted,
    Saved { inventory_id: InventoryId },
    SaveFailed { reason: String },
    CalendarImported { rows: usize, dropped: usize },
}

/// Broadcast hub for session lifecycle events.
pub struct NotifyHub {
    channels: DashMap<Ulid, broadcast::Sender<SessionEvent>>,
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to a session's events. Creates the channel if needed.
    pub fn subscribe(&self, session_id: Ulid) -> broadcast::Receiver<SessionEvent> {
        let sender = self
            .channels
            .entry(session_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send an event. No-op if nobody is listening.
    pub fn send(&self, session_id: Ulid, event: SessionEvent) {
        if let Some(sender) = self.channels.get(&session_id) {
            let _ = sender.send(event);
        }
    }

    /// Remove a channel (e.g. when a session is closed).
    pub fn remove(&self, session_id: &Ulid) {
        self.channels.remove(session_id);
    }
}
