//! Full-snapshot persistence for the task collection.
//!
//! # Responsibility
//! - Serialize the whole collection as one JSON array under a fixed key.
//! - Restore that array at startup.
//!
//! # Invariants
//! - `save` overwrites the previous snapshot; there are no incremental writes.
//! - Absent or malformed data loads as an empty collection (malformed data
//!   also emits a `warn` line). A failed storage read is returned as an
//!   error so the caller never overwrites data it could not see.
//! - Task content is never written to logs.

use crate::model::task::Task;
use crate::repo::kv_store::{KeyValueStore, KvError, KvResult};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when none is configured.
pub const DEFAULT_TASKS_KEY: &str = "tasks";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Failure while reading or writing a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Storage(KvError),
    Encode(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "task snapshot storage failed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for SnapshotError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Reads and writes the task collection through a [`KeyValueStore`].
pub struct TaskSnapshotRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TaskSnapshotRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_TASKS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Restores the persisted collection.
    ///
    /// Absent and malformed snapshots both load as empty.
    ///
    /// # Errors
    /// - Storage read failures, which must not be mistaken for "no data".
    pub fn load(&self) -> KvResult<Vec<Task>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=tasks_load module=persistence status=empty key={}", self.key);
                return Ok(Vec::new());
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=persistence status=error key={} reason=read_failed error={err}",
                    self.key
                );
                return Err(err);
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                debug!(
                    "event=tasks_load module=persistence status=ok key={} count={}",
                    self.key,
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(err) => {
                // serde_json errors carry only position and category, not input text.
                warn!(
                    "event=tasks_load module=persistence status=discarded key={} reason=malformed bytes={} error={err}",
                    self.key,
                    raw.len()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Writes the full collection, replacing the previous snapshot.
    pub fn save(&mut self, tasks: &[Task]) -> SnapshotResult<()> {
        let encoded = serde_json::to_string(tasks)?;
        self.store.set(&self.key, &encoded)?;
        debug!(
            "event=tasks_save module=persistence status=ok key={} count={} bytes={}",
            self.key,
            tasks.len(),
            encoded.len()
        );
        Ok(())
    }
}
