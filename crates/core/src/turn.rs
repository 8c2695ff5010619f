//! A single conversational exchange.

use serde::{Deserialize, Serialize};

/// One user input paired with the assistant's reply.
///
/// Deferred inputs produce a turn as well; the assistant side then holds
/// the queued notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user_text: String,
    pub assistant_text: String,
}

impl Turn {
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
        }
    }
}
