//! File-based queue store — the whole queue as one JSON document.
//!
//! Default location: `~/.parley/queue.json`. Every save rewrites the full
//! document through a temporary sibling file followed by a rename, so a
//! reader never observes a half-written queue.

use async_trait::async_trait;
use parley_core::error::QueueError;
use parley_core::queue::{QueueItem, QueueStore};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A queue store backed by a pretty-printed JSON array on disk.
pub struct FileQueueStore {
    path: PathBuf,
}

impl FileQueueStore {
    /// Use the document at `path`. Nothing is read or created until the
    /// first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_error(&self, reason: impl std::fmt::Display) -> QueueError {
        QueueError::Write {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl QueueStore for FileQueueStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Vec<QueueItem>, QueueError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            // Nothing persisted yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(QueueError::Read {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items: Vec<QueueItem> =
            serde_json::from_str(&content).map_err(|e| QueueError::Corrupted {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(path = %self.path.display(), count = items.len(), "Queue document loaded");
        Ok(items)
    }

    async fn save(&self, items: &[QueueItem]) -> Result<(), QueueError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| self.write_error(format!("failed to create directory: {e}")))?;
        }

        let content = serde_json::to_string_pretty(items)
            .map_err(|e| self.write_error(format!("failed to serialize queue: {e}")))?;

        let tmp = self.temp_path();
        if let Err(e) = write_synced(&tmp, content.as_bytes()) {
            let _ = std::fs::remove_file(&tmp);
            return Err(self.write_error(format!("failed to write temp file: {e}")));
        }

        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(self.write_error(format!("failed to replace queue file: {e}")));
        }

        debug!(path = %self.path.display(), count = items.len(), "Queue document saved");
        Ok(())
    }
}

/// Write `bytes` to `path` and flush them to the device before returning.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
