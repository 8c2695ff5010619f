//! The orchestration engine — the request path of Parley.
//!
//! Each input goes through one pass:
//!
//! 1. **Decide**: inputs with fewer than three words (by default) are deferred
//! 2. **Defer**: enqueue the input and answer with a queued notice, or
//! 3. **Route**: classify the intent and run its handler, calling a tool
//!    when the handler needs one
//! 4. **Remember**: record the exchange in the context window
//!
//! [`SessionManager`] keeps one engine per session for callers that serve
//! several conversations at once.

pub mod engine;
pub mod session;

pub use engine::{
    DEFER_REASON, Engine, QUEUE_FAILED_NOTICE, QUEUED_NOTICE, ReprocessFailure, ReprocessReport,
    ReprocessedItem,
};
pub use session::SessionManager;
