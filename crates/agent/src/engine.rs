//! The engine: defer-or-route decision, intent handlers, and reprocessing.

use parley_config::AppConfig;
use parley_core::error::QueueError;
use parley_core::intent::{Intent, classify};
use parley_core::queue::QueueStore;
use parley_core::turn::Turn;
use parley_memory::{ContextWindow, DeferredQueue, FileQueueStore, InMemoryQueueStore};
use parley_tools::ToolRegistry;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Reply sent when an input is deferred.
pub const QUEUED_NOTICE: &str = "Your request has been queued for later processing.";

/// Reply sent when an input should have been deferred but could not be stored.
pub const QUEUE_FAILED_NOTICE: &str =
    "Sorry, your request could not be queued for later processing.";

/// Reason recorded on items deferred for being too short.
pub const DEFER_REASON: &str = "Too short input";

const DEFAULT_DEFER_BELOW_TOKENS: usize = 3;

/// Routes one conversation's inputs to responses.
///
/// Owns the conversation's context window, the tool registry, and the
/// deferred queue. Not meant for concurrent callers; see
/// [`crate::SessionManager`] for that.
pub struct Engine {
    /// Recent turns, oldest first
    context: ContextWindow,

    /// Tools available to the task and analysis handlers
    tools: ToolRegistry,

    /// Where short inputs go
    queue: DeferredQueue,

    /// Inputs with fewer whitespace tokens than this are deferred
    defer_below_tokens: usize,
}

/// A deferred item that was answered during reprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReprocessedItem {
    pub id: String,
    pub response: String,
}

/// A deferred item that stays pending because its completion could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReprocessFailure {
    pub id: String,
    pub error: String,
}

/// Outcome of one [`Engine::reprocess_pending`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReprocessReport {
    pub completed: Vec<ReprocessedItem>,
    pub failed: Vec<ReprocessFailure>,
}

impl ReprocessReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Engine {
    /// Create an engine around an opened queue.
    pub fn new(queue: DeferredQueue, tools: ToolRegistry, max_turns: usize) -> Self {
        Self {
            context: ContextWindow::new(max_turns),
            tools,
            queue,
            defer_below_tokens: DEFAULT_DEFER_BELOW_TOKENS,
        }
    }

    /// Set the word count below which inputs are deferred.
    pub fn with_defer_below_tokens(mut self, tokens: usize) -> Self {
        self.defer_below_tokens = tokens;
        self
    }

    /// Build an engine from configuration, opening the configured queue.
    pub async fn from_config(config: &AppConfig) -> Result<Self, QueueError> {
        Self::from_config_at(config, &config.queue.path).await
    }

    /// Like [`Engine::from_config`], with the file backend rooted at `queue_path`.
    pub async fn from_config_at(config: &AppConfig, queue_path: &Path) -> Result<Self, QueueError> {
        let store: Arc<dyn QueueStore> = match config.queue.backend.as_str() {
            "memory" => Arc::new(InMemoryQueueStore::new()),
            _ => Arc::new(FileQueueStore::new(queue_path)),
        };
        let queue = DeferredQueue::open(store).await?;
        Ok(Self::new(queue, ToolRegistry::builtin(), config.context.max_turns)
            .with_defer_below_tokens(config.queue.defer_below_tokens))
    }

    /// Produce a response for `input`. Never fails.
    ///
    /// Short inputs are deferred to the queue; everything else is routed by
    /// intent. Either way the exchange is recorded in the context window.
    pub async fn generate_response(&mut self, input: &str) -> String {
        let response = if self.should_defer(input) {
            self.defer(input).await
        } else {
            let (intent, response) = self.route(input);
            debug!(intent = %intent, "Input routed");
            response
        };

        self.context.record(Turn::new(input, response.as_str()));
        response
    }

    /// Classify `input` and run its handler, without deferring or recording.
    pub fn route(&self, input: &str) -> (Intent, String) {
        let intent = classify(input);
        let response = match intent {
            Intent::QA => self.handle_qa(input),
            Intent::TaskRequest => self.handle_task(input),
            Intent::AnalysisRequest => self.handle_analysis(input),
        };
        (intent, response)
    }

    /// Answer every pending item and mark it completed.
    ///
    /// Items go through [`Engine::route`] directly: they were deferred for
    /// being short, so the defer check would only queue them again. An item
    /// is completed only after its answer is produced, and its turn is
    /// recorded only once the completion is stored.
    pub async fn reprocess_pending(&mut self) -> ReprocessReport {
        let mut report = ReprocessReport::default();

        for item in self.queue.pending() {
            let (intent, response) = self.route(&item.user_input);
            debug!(id = %item.id, intent = %intent, "Reprocessing deferred item");

            match self.queue.complete(&item.id).await {
                Ok(_) => {
                    self.context.record(Turn::new(item.user_input.as_str(), response.as_str()));
                    report.completed.push(ReprocessedItem { id: item.id, response });
                }
                Err(e) => {
                    warn!(id = %item.id, error = %e, "Reprocessed item left pending");
                    report.failed.push(ReprocessFailure {
                        id: item.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            completed = report.completed.len(),
            failed = report.failed.len(),
            "Reprocessing finished"
        );
        report
    }

    /// Mark a deferred item completed. `Ok(false)` if no item has `id`.
    pub async fn complete(&mut self, id: &str) -> Result<bool, QueueError> {
        self.queue.complete(id).await
    }

    /// The current conversation history, oldest first.
    pub fn history(&self) -> Vec<Turn> {
        self.context.snapshot()
    }

    pub fn queue(&self) -> &DeferredQueue {
        &self.queue
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn should_defer(&self, input: &str) -> bool {
        input.split_whitespace().count() < self.defer_below_tokens
    }

    async fn defer(&mut self, input: &str) -> String {
        match self.queue.enqueue(input, DEFER_REASON).await {
            Ok(_) => QUEUED_NOTICE.to_string(),
            Err(e) => {
                error!(error = %e, "Could not defer input");
                QUEUE_FAILED_NOTICE.to_string()
            }
        }
    }

    fn handle_qa(&self, input: &str) -> String {
        format!("Regarding your question '{input}', here's a basic answer.")
    }

    fn handle_task(&self, input: &str) -> String {
        if input.to_lowercase().contains("calculate") {
            let result = self.tools.invoke("calculator", input);
            return format!("Calculation result: {result}");
        }
        format!("Task '{input}' executed.")
    }

    fn handle_analysis(&self, input: &str) -> String {
        let result = self.tools.invoke("summarizer", input);
        format!("Analysis: {result}")
    }
}
