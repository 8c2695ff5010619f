//! In-memory queue store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use parley_core::error::QueueError;
use parley_core::queue::{QueueItem, QueueStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the last saved queue in a Vec. Nothing survives the process.
#[derive(Clone, Default)]
pub struct InMemoryQueueStore {
    items: Arc<RwLock<Vec<QueueItem>>>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueStore for InMemoryQueueStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self) -> Result<Vec<QueueItem>, QueueError> {
        Ok(self.items.read().await.clone())
    }

    async fn save(&self, items: &[QueueItem]) -> Result<(), QueueError> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}
