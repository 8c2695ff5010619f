//! End-to-end integration tests for the Parley orchestrator.
//!
//! These tests drive the full pipeline from user input to response through
//! the library crates: defer decision, classification, tool dispatch,
//! context window, and the on-disk deferred queue.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parley_agent::{DEFER_REASON, Engine, QUEUE_FAILED_NOTICE, QUEUED_NOTICE, SessionManager};
use parley_config::AppConfig;
use parley_core::error::QueueError;
use parley_core::intent::{Intent, classify};
use parley_core::queue::{QueueItem, QueueStatus, QueueStore};
use parley_core::session::SessionId;
use parley_memory::{DeferredQueue, FileQueueStore, InMemoryQueueStore};
use parley_tools::ToolRegistry;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────

async fn file_engine(dir: &TempDir) -> Engine {
    let store = Arc::new(FileQueueStore::new(dir.path().join("queue.json")));
    let queue = DeferredQueue::open(store).await.unwrap();
    Engine::new(queue, ToolRegistry::builtin(), 10)
}

async fn reopen_queue(dir: &TempDir) -> DeferredQueue {
    let store = Arc::new(FileQueueStore::new(dir.path().join("queue.json")));
    DeferredQueue::open(store).await.unwrap()
}

/// A store whose writes can be switched off mid-test.
#[derive(Default)]
struct SwitchableStore {
    inner: InMemoryQueueStore,
    down: AtomicBool,
}

#[async_trait::async_trait]
impl QueueStore for SwitchableStore {
    fn name(&self) -> &str {
        "switchable"
    }

    async fn load(&self) -> Result<Vec<QueueItem>, QueueError> {
        self.inner.load().await
    }

    async fn save(&self, items: &[QueueItem]) -> Result<(), QueueError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(QueueError::Storage("store offline".into()));
        }
        self.inner.save(items).await
    }
}

// ── Classification & routing ─────────────────────────────────────────────

#[test]
fn e2e_classifier_examples() {
    assert_eq!(classify("What is AI?"), Intent::QA);
    assert_eq!(classify("Calculate 2 + 2"), Intent::TaskRequest);
    assert_eq!(classify("Analyze this data"), Intent::AnalysisRequest);
    assert_eq!(classify("banana"), Intent::QA);
}

#[test]
fn e2e_tool_registry_boundary() {
    let tools = ToolRegistry::builtin();
    assert_eq!(tools.invoke("calculator", "2 + 2"), "4");
    assert_eq!(tools.invoke("calculator", "Calculate 2 + 2"), "Invalid calculation.");
    assert_eq!(tools.invoke("unknown_tool", "x"), "Tool 'unknown_tool' not found.");
}

#[tokio::test]
async fn e2e_question_answered() {
    let dir = TempDir::new().unwrap();
    let mut engine = file_engine(&dir).await;

    let response = engine.generate_response("What is AI?").await;
    assert_eq!(response, "Regarding your question 'What is AI?', here's a basic answer.");
    assert!(engine.queue().is_empty());
}

#[tokio::test]
async fn e2e_every_intent_in_one_conversation() {
    let dir = TempDir::new().unwrap();
    let mut engine = file_engine(&dir).await;

    let replies = [
        engine.generate_response("How does this work").await,
        engine.generate_response("please calculate 6 * 7").await,
        engine.generate_response("execute the deploy script").await,
        engine.generate_response("summarize my inbox today").await,
    ];

    assert_eq!(replies[0], "Regarding your question 'How does this work', here's a basic answer.");
    assert_eq!(replies[1], "Calculation result: Invalid calculation.");
    assert_eq!(replies[2], "Task 'execute the deploy script' executed.");
    assert_eq!(replies[3], "Analysis: Summary: summarize my inbox today");

    let history = engine.history();
    assert_eq!(history.len(), 4);
    for (turn, reply) in history.iter().zip(replies.iter()) {
        assert_eq!(&turn.assistant_text, reply);
    }
}

// ── Deferral & the durable queue ─────────────────────────────────────────

#[tokio::test]
async fn e2e_short_inputs_are_deferred_and_persisted() {
    let dir = TempDir::new().unwrap();
    let mut engine = file_engine(&dir).await;

    for input in ["Hi", "ok then", "", "   "] {
        let before = engine.queue().len();
        assert_eq!(engine.generate_response(input).await, QUEUED_NOTICE);
        assert_eq!(engine.queue().len(), before + 1);
    }

    let reloaded = reopen_queue(&dir).await;
    assert_eq!(reloaded.items(), engine.queue().items());
    assert!(reloaded.items().iter().all(|i| i.reason == DEFER_REASON));
    assert!(reloaded.items().iter().all(|i| i.status == QueueStatus::Pending));
}

#[tokio::test]
async fn e2e_queue_survives_restart_and_reprocesses() {
    let dir = TempDir::new().unwrap();
    {
        let mut engine = file_engine(&dir).await;
        engine.generate_response("Hi").await;
        engine.generate_response("Analyze logs").await;
    }

    // A fresh process picks up where the last one stopped
    let mut engine = file_engine(&dir).await;
    assert_eq!(engine.queue().pending().len(), 2);
    assert!(engine.history().is_empty());

    let report = engine.reprocess_pending().await;
    assert!(report.is_clean());
    assert_eq!(report.completed.len(), 2);
    assert_eq!(report.completed[1].response, "Analysis: Summary: Analyze logs");

    let reloaded = reopen_queue(&dir).await;
    assert!(reloaded.pending().is_empty());
    assert_eq!(reloaded.len(), 2);
}

#[tokio::test]
async fn e2e_complete_unknown_id_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut engine = file_engine(&dir).await;
    engine.generate_response("Hi").await;
    let before = reopen_queue(&dir).await.items().to_vec();

    assert!(!engine.complete("does-not-exist").await.unwrap());
    assert_eq!(reopen_queue(&dir).await.items(), before.as_slice());
}

#[tokio::test]
async fn e2e_storage_outage_is_visible() {
    let store = Arc::new(SwitchableStore::default());
    let queue = DeferredQueue::open(store.clone()).await.unwrap();
    let mut engine = Engine::new(queue, ToolRegistry::builtin(), 10);

    assert_eq!(engine.generate_response("Hi").await, QUEUED_NOTICE);

    store.down.store(true, Ordering::SeqCst);
    assert_eq!(engine.generate_response("Hello").await, QUEUE_FAILED_NOTICE);
    // Routing does not need storage
    assert_eq!(
        engine.generate_response("What is Rust?").await,
        "Regarding your question 'What is Rust?', here's a basic answer."
    );

    let report = engine.reprocess_pending().await;
    assert_eq!(report.failed.len(), 1);

    store.down.store(false, Ordering::SeqCst);
    let report = engine.reprocess_pending().await;
    assert_eq!(report.completed.len(), 1);
    assert_eq!(store.load().await.unwrap().len(), 1);
}

// ── Context window ───────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_context_window_keeps_ten_most_recent() {
    let dir = TempDir::new().unwrap();
    let mut engine = file_engine(&dir).await;

    for i in 0..25 {
        engine.generate_response(&format!("tell me fact number {i}")).await;
    }

    let history = engine.history();
    assert_eq!(history.len(), 10);
    let expected: Vec<String> = (15..25).map(|i| format!("tell me fact number {i}")).collect();
    let actual: Vec<String> = history.into_iter().map(|t| t.user_text).collect();
    assert_eq!(actual, expected);
}

// ── Configuration & sessions ─────────────────────────────────────────────

#[tokio::test]
async fn e2e_engine_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let queue_path = dir.path().join("q").join("queue.json");
    std::fs::write(
        &config_path,
        format!(
            "[context]\nmax_turns = 3\n\n[queue]\npath = {:?}\ndefer_below_tokens = 2\n",
            queue_path.display().to_string()
        ),
    )
    .unwrap();

    let config = AppConfig::load_from(&config_path).unwrap();
    let mut engine = Engine::from_config(&config).await.unwrap();

    assert_eq!(engine.generate_response("Hi").await, QUEUED_NOTICE);
    assert_eq!(
        engine.generate_response("Hi there").await,
        "Regarding your question 'Hi there', here's a basic answer."
    );
    for _ in 0..3 {
        engine.generate_response("what next").await;
    }
    assert_eq!(engine.history().len(), 3);
    assert!(queue_path.exists());
}

#[tokio::test]
async fn e2e_sessions_are_isolated() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.sessions.dir = dir.path().to_path_buf();
    let manager = SessionManager::new(config);

    let a = SessionId::from("a");
    let b = SessionId::from("b");
    assert_eq!(manager.respond(&a, "Hi").await.unwrap(), QUEUED_NOTICE);
    assert_eq!(
        manager.respond(&b, "Analyze this data").await.unwrap(),
        "Analysis: Summary: Analyze this data"
    );

    let a_queue = DeferredQueue::open(Arc::new(FileQueueStore::new(dir.path().join("a.json"))))
        .await
        .unwrap();
    assert_eq!(a_queue.pending().len(), 1);
    assert!(!dir.path().join("b.json").exists());
}
