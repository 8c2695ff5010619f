//! # Parley Core
//!
//! Domain types, traits, and error definitions for the Parley assistant
//! orchestrator. This crate has no framework dependencies: it defines the
//! model that the memory, tools, and agent crates implement against.
//!
//! ## Layout
//!
//! - [`intent`]: the fixed intent categories and the keyword classifier
//! - [`turn`]: one user/assistant exchange held by the context window
//! - [`queue`]: deferred work items and the storage trait behind them
//! - [`session`]: the key that separates concurrent conversations

pub mod error;
pub mod intent;
pub mod queue;
pub mod session;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use error::{Error, QueueError, Result, ToolError};
pub use intent::{Intent, classify};
pub use queue::{QueueItem, QueueStatus, QueueStore};
pub use session::SessionId;
pub use turn::Turn;
