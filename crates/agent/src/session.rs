//! Per-session engines for serving several conversations at once.
//!
//! Each session gets its own [`Engine`], and with it its own context window
//! and its own queue document (`<sessions.dir>/<id>.json`). Sessions never
//! share mutable state; callers of the same session are serialized by that
//! session's mutex.

use parley_config::AppConfig;
use parley_core::error::QueueError;
use parley_core::session::SessionId;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::engine::Engine;

pub struct SessionManager {
    config: AppConfig,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Engine>>>>,
}

impl SessionManager {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The engine for `id`, opening it on first use.
    pub async fn engine(&self, id: &SessionId) -> Result<Arc<Mutex<Engine>>, QueueError> {
        if let Some(engine) = self.sessions.read().await.get(id) {
            return Ok(engine.clone());
        }

        let mut sessions = self.sessions.write().await;
        // Another caller may have opened it while we waited for the lock
        if let Some(engine) = sessions.get(id) {
            return Ok(engine.clone());
        }

        let engine = Engine::from_config_at(&self.config, &self.queue_path(id)).await?;
        let engine = Arc::new(Mutex::new(engine));
        sessions.insert(id.clone(), engine.clone());
        info!(session = %id, "Session opened");
        Ok(engine)
    }

    /// Respond to `input` within session `id`.
    pub async fn respond(&self, id: &SessionId, input: &str) -> Result<String, QueueError> {
        let engine = self.engine(id).await?;
        let mut engine = engine.lock().await;
        Ok(engine.generate_response(input).await)
    }

    /// Ids of all open sessions, sorted.
    pub async fn sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop a session's in-memory state. Its queue document stays on disk.
    pub async fn close(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!(session = %id, "Session closed");
        }
        removed
    }

    /// Where the file backend keeps the queue for `id`.
    pub fn queue_path(&self, id: &SessionId) -> PathBuf {
        self.config.sessions.dir.join(format!("{}.json", file_stem(id)))
    }
}

/// Reduce a session id to characters that are safe in a file name.
fn file_stem(id: &SessionId) -> String {
    let stem: String = id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() { "_".into() } else { stem }
}
