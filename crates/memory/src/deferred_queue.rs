//! Deferred queue — durable, ordered list of postponed inputs.
//!
//! Items are appended as `pending` and later flipped to `completed`; they
//! are never removed. Every mutation writes the full queue to the backing
//! [`QueueStore`] before returning, and a failed write is rolled back in
//! memory, so the in-memory view always matches the last persisted state.

use parley_core::error::QueueError;
use parley_core::queue::{QueueItem, QueueStatus, QueueStore};
use std::sync::Arc;
use tracing::{error, info};

pub struct DeferredQueue {
    store: Arc<dyn QueueStore>,
    items: Vec<QueueItem>,
}

impl DeferredQueue {
    /// Load the queue from `store`.
    pub async fn open(store: Arc<dyn QueueStore>) -> Result<Self, QueueError> {
        let items = store.load().await?;
        info!(backend = store.name(), count = items.len(), "Deferred queue opened");
        Ok(Self { store, items })
    }

    /// Append a new pending item and persist. Returns the item's id.
    pub async fn enqueue(
        &mut self,
        user_input: &str,
        reason: &str,
    ) -> Result<String, QueueError> {
        let item = QueueItem::pending(user_input, reason);
        let id = item.id.clone();
        self.items.push(item);

        if let Err(e) = self.store.save(&self.items).await {
            self.items.pop();
            error!(error = %e, "Failed to persist deferred item");
            return Err(e);
        }

        info!(id = %id, reason, "Input deferred");
        Ok(id)
    }

    /// All pending items, in the order they were enqueued.
    pub fn pending(&self) -> Vec<QueueItem> {
        self.items.iter().filter(|i| i.is_pending()).cloned().collect()
    }

    /// Mark the first item with `id` as completed and persist.
    ///
    /// Returns `Ok(false)` without touching anything when no item has that
    /// id. An item that is already completed is left as is.
    pub async fn complete(&mut self, id: &str) -> Result<bool, QueueError> {
        let Some(index) = self.items.iter().position(|i| i.id == id) else {
            return Ok(false);
        };
        if !self.items[index].is_pending() {
            return Ok(true);
        }

        self.items[index].status = QueueStatus::Completed;
        if let Err(e) = self.store.save(&self.items).await {
            self.items[index].status = QueueStatus::Pending;
            error!(id, error = %e, "Failed to persist completion");
            return Err(e);
        }

        info!(id, "Deferred item completed");
        Ok(true)
    }

    /// Every item, pending and completed, in order.
    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&QueueItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name of the backing store (e.g. "file").
    pub fn backend(&self) -> &str {
        self.store.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileQueueStore, InMemoryQueueStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    /// Accepts writes until `fail` is set.
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryQueueStore,
        fail: AtomicBool,
    }

    #[async_trait]
    impl QueueStore for FlakyStore {
        fn name(&self) -> &str {
            "flaky"
        }
        async fn load(&self) -> Result<Vec<QueueItem>, QueueError> {
            self.inner.load().await
        }
        async fn save(&self, items: &[QueueItem]) -> Result<(), QueueError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(QueueError::Storage("disk full".into()));
            }
            self.inner.save(items).await
        }
    }

    async fn memory_queue() -> DeferredQueue {
        DeferredQueue::open(Arc::new(InMemoryQueueStore::new())).await.unwrap()
    }

    #[tokio::test]
    async fn enqueue_creates_pending_item() {
        let mut queue = memory_queue().await;
        let id = queue.enqueue("Hi", "Too short input").await.unwrap();

        let item = queue.get(&id).unwrap();
        assert_eq!(item.user_input, "Hi");
        assert_eq!(item.reason, "Too short input");
        assert_eq!(item.status, QueueStatus::Pending);
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn pending_preserves_order_and_skips_completed() {
        let mut queue = memory_queue().await;
        let a = queue.enqueue("a", "r").await.unwrap();
        let b = queue.enqueue("b", "r").await.unwrap();
        let c = queue.enqueue("c", "r").await.unwrap();
        assert!(queue.complete(&b).await.unwrap());

        let pending: Vec<String> = queue.pending().into_iter().map(|i| i.id).collect();
        assert_eq!(pending, vec![a, c]);
        // completed items are kept
        assert_eq!(queue.len(), 3);
    }

    #[tokio::test]
    async fn complete_unknown_id_is_noop() {
        let mut queue = memory_queue().await;
        let id = queue.enqueue("Hi", "Too short input").await.unwrap();
        let before = queue.items().to_vec();

        assert!(!queue.complete("no-such-id").await.unwrap());
        assert_eq!(queue.items(), before.as_slice());
        assert_eq!(queue.get(&id).unwrap().status, QueueStatus::Pending);
    }

    #[tokio::test]
    async fn complete_is_idempotent() {
        let mut queue = memory_queue().await;
        let id = queue.enqueue("Hi", "Too short input").await.unwrap();
        assert!(queue.complete(&id).await.unwrap());
        assert!(queue.complete(&id).await.unwrap());
        assert_eq!(queue.get(&id).unwrap().status, QueueStatus::Completed);
    }

    #[tokio::test]
    async fn reload_yields_identical_sequence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.json");

        let mut queue = DeferredQueue::open(Arc::new(FileQueueStore::new(&path))).await.unwrap();
        queue.enqueue("Hi", "Too short input").await.unwrap();
        let second = queue.enqueue("Hey you", "Too short input").await.unwrap();
        queue.complete(&second).await.unwrap();

        let reloaded = DeferredQueue::open(Arc::new(FileQueueStore::new(&path))).await.unwrap();
        assert_eq!(reloaded.items(), queue.items());
        assert_eq!(reloaded.backend(), "file");
    }

    #[tokio::test]
    async fn failed_enqueue_is_rolled_back() {
        let store = Arc::new(FlakyStore::default());
        let mut queue = DeferredQueue::open(store.clone()).await.unwrap();
        queue.enqueue("kept", "r").await.unwrap();

        store.fail.store(true, Ordering::SeqCst);
        let err = queue.enqueue("lost", "r").await.unwrap_err();
        assert!(matches!(err, QueueError::Storage(_)));

        assert_eq!(queue.len(), 1);
        assert_eq!(store.load().await.unwrap(), queue.items());
    }

    #[tokio::test]
    async fn failed_completion_stays_pending() {
        let store = Arc::new(FlakyStore::default());
        let mut queue = DeferredQueue::open(store.clone()).await.unwrap();
        let id = queue.enqueue("Hi", "r").await.unwrap();

        store.fail.store(true, Ordering::SeqCst);
        assert!(queue.complete(&id).await.is_err());
        assert_eq!(queue.get(&id).unwrap().status, QueueStatus::Pending);
        assert_eq!(queue.pending().len(), 1);
    }

    #[tokio::test]
    async fn open_propagates_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.json");
        std::fs::write(&path, "[{\"id\": 1").unwrap();

        let result = DeferredQueue::open(Arc::new(FileQueueStore::new(&path))).await;
        assert!(matches!(result, Err(QueueError::Corrupted { .. })));
    }
}
