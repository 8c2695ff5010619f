//! Deferred work items and the storage trait behind the deferred queue.
//!
//! The queue's durable state is a single collection of [`QueueItem`]s that
//! is overwritten as a whole on every mutation. Implementations of
//! [`QueueStore`] decide where that collection lives.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QueueError;

/// Lifecycle of a deferred item. Items only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Pending,
    Completed,
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// An input that was postponed instead of being answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Unique within the queue (UUID v4)
    pub id: String,

    /// The raw text the user sent
    pub user_input: String,

    /// Why the input was deferred (e.g. "Too short input")
    pub reason: String,

    /// When the item was enqueued, serialized as RFC 3339
    pub timestamp: DateTime<Utc>,

    pub status: QueueStatus,
}

impl QueueItem {
    /// Create a new pending item with a fresh id and the current time.
    pub fn pending(user_input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_input: user_input.into(),
            reason: reason.into(),
            timestamp: Utc::now(),
            status: QueueStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == QueueStatus::Pending
    }
}

/// Durable storage for the full queue contents.
///
/// `save` replaces everything previously stored. After a successful
/// `save(items)`, a later `load()` must return exactly `items`; a failed
/// `save` must leave the previous contents loadable.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Load the last successfully saved collection (empty if none).
    async fn load(&self) -> std::result::Result<Vec<QueueItem>, QueueError>;

    /// Overwrite the stored collection with `items`.
    async fn save(&self, items: &[QueueItem]) -> std::result::Result<(), QueueError>;
}
