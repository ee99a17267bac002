use tokio::sync::broadcast;
use tracing::debug;

use crate::ServerEvent;

pub type EventReceiver = broadcast::Receiver<ServerEvent>;

/// Fan-out layer for accepted state changes.
///
/// Every connected client holds a receiver; events sent while the board
/// lock is held are observed by each receiver in acceptance order. Sending
/// never blocks: a slow receiver lags and skips, it cannot hold up the rest.
pub struct EventBroadcaster {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Fire-and-forget broadcast to all current subscribers.
    pub fn send(&self, event: ServerEvent) {
        if let Err(e) = self.sender.send(event) {
            // No receivers connected; nothing to deliver.
            debug!("Dropped broadcast with no subscribers: {}", e);
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Clone for EventBroadcaster {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
