//! Intent classification — maps raw text to one of three fixed categories.
//!
//! The classifier is an ordered keyword cascade over whitespace tokens.
//! It is total: every string, including the empty one, gets an intent.

use serde::{Deserialize, Serialize};

const QA_KEYWORDS: &[&str] = &["what", "how", "why", "when", "where", "who", "is", "are", "does"];
const TASK_KEYWORDS: &[&str] = &["calculate", "compute", "do", "execute", "run", "perform"];
const ANALYSIS_KEYWORDS: &[&str] = &["analyze", "summarize", "review", "examine"];

/// The response strategy an input is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// A question; also the fallback for anything unrecognised.
    QA,
    /// A request to do something, possibly via the calculator.
    TaskRequest,
    /// A request to analyze or summarize text.
    AnalysisRequest,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QA => "qa",
            Self::TaskRequest => "task_request",
            Self::AnalysisRequest => "analysis_request",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `text` into an [`Intent`].
///
/// First match wins:
/// 1. a QA keyword token, or a `?` anywhere in the raw text
/// 2. a task keyword token
/// 3. an analysis keyword token
/// 4. otherwise `QA`
///
/// Keywords match whole tokens only, so `"whatever"` is not a QA keyword.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let has_any = |keywords: &[&str]| tokens.iter().any(|t| keywords.contains(t));

    if has_any(QA_KEYWORDS) || text.contains('?') {
        Intent::QA
    } else if has_any(TASK_KEYWORDS) {
        Intent::TaskRequest
    } else if has_any(ANALYSIS_KEYWORDS) {
        Intent::AnalysisRequest
    } else {
        Intent::QA
    }
}
