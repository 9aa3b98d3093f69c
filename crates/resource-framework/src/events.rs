//! Application-wide notifications on a `tokio::sync::broadcast` channel.
//!
//! Errors that are not the result of a save (a rejected file, for now) are reported
//! here so an alert component can show them without the form knowing about it.

use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A local file could not be loaded into a form field.
    FileLoadFailed {
        field: String,
        /// Message key, e.g. `error.file.too.large`.
        key: String,
        message: String,
    },
}

/// Fan-out channel shared by every controller of one session.
#[derive(Clone)]
pub struct EventManager {
    sender: broadcast::Sender<AppEvent>,
}

impl EventManager {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes to all current subscribers. Without subscribers the event is dropped.
    pub fn broadcast(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
