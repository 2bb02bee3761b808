pub mod memory_store;
pub mod postgres_store;
pub mod sqlite_store;

use tokio::sync::broadcast;

const CHANGE_FEED_CAPACITY: usize = 256;

/// Fan-out of collection paths written through one store instance.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<String>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, collection: &str) {
        // No receivers is fine.
        let _ = self.tx.send(collection.to_string());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
