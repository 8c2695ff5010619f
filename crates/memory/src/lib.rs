//! Conversation state for Parley: the bounded context window and the
//! durable deferred queue, plus the storage backends behind the queue.

pub mod context_window;
pub mod deferred_queue;
pub mod file_backend;
pub mod in_memory;

pub use context_window::ContextWindow;
pub use deferred_queue::DeferredQueue;
pub use file_backend::FileQueueStore;
pub use in_memory::InMemoryQueueStore;
