//! Error types for the Parley domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum, and [`enum@Error`] wraps them
//! for callers that cross contexts.

use thiserror::Error;

/// The top-level error type for Parley operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Queue persistence ---
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the durable store behind the deferred queue.
///
/// These are the only errors the orchestration engine can observe.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Failed to read queue store at {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to write queue store at {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Queue store at {path} is corrupted: {reason}")]
    Corrupted { path: String, reason: String },

    #[error("Queue storage error: {0}")]
    Storage(String),
}

/// Failures inside a tool. Never escape the tool registry boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
}
