//! Runtime configuration for opening a task store.
//!
//! # Responsibility
//! - Resolve where the durable store lives and which key holds the snapshot.
//! - Provide the one-call bootstrap used by binaries.
//! - Place log files next to the database they describe.

use crate::repo::kv_store::SqliteKeyValueStore;
use crate::repo::task_snapshot::{TaskSnapshotRepository, DEFAULT_TASKS_KEY};
use crate::service::task_store::{StoreResult, TaskStore};
use std::path::{Path, PathBuf};

/// Database file name used inside a data directory.
pub const DB_FILE_NAME: &str = "taskdeck.sqlite3";

/// Log directory name, created beside the database file.
pub const LOG_DIR_NAME: &str = "logs";

/// Location and key of the persisted task snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
}

impl CoreConfig {
    /// Uses `<dir>/taskdeck.sqlite3` and the default `tasks` key.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at_path(dir.as_ref().join(DB_FILE_NAME))
    }

    pub fn at_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            storage_key: DEFAULT_TASKS_KEY.to_string(),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Absolute `logs/` directory next to the database file.
    ///
    /// Relative database paths are resolved against `base`.
    pub fn log_dir_from(&self, base: impl AsRef<Path>) -> PathBuf {
        let db_path = if self.db_path.is_absolute() {
            self.db_path.clone()
        } else {
            base.as_ref().join(&self.db_path)
        };
        let parent = db_path.parent().unwrap_or(base.as_ref());
        parent.join(LOG_DIR_NAME)
    }
}

/// Opens the SQLite store described by `config` and restores its tasks.
///
/// The returned store is already in the ready state.
///
/// # Errors
/// - The database cannot be opened or migrated.
/// - The persisted snapshot cannot be read.
pub fn open_task_store(config: &CoreConfig) -> StoreResult<TaskStore<SqliteKeyValueStore>> {
    let kv = SqliteKeyValueStore::open(&config.db_path)?;
    let snapshots = TaskSnapshotRepository::with_key(kv, config.storage_key.clone());
    TaskStore::restored(snapshots)
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_FILE_NAME, LOG_DIR_NAME};
    use std::path::Path;

    #[test]
    fn in_dir_uses_default_file_and_key() {
        let config = CoreConfig::in_dir("/var/lib/taskdeck");
        assert_eq!(config.db_path, Path::new("/var/lib/taskdeck").join(DB_FILE_NAME));
        assert_eq!(config.storage_key, "tasks");

        let custom = config.with_storage_key("work");
        assert_eq!(custom.storage_key, "work");
    }

    #[test]
    fn log_dir_sits_beside_the_database() {
        let base = Path::new("/home/user");

        let relative = CoreConfig::at_path("data/board.sqlite3");
        assert_eq!(
            relative.log_dir_from(base),
            Path::new("/home/user/data").join(LOG_DIR_NAME)
        );

        let bare = CoreConfig::at_path("board.sqlite3");
        assert_eq!(bare.log_dir_from(base), base.join(LOG_DIR_NAME));

        let absolute = CoreConfig::in_dir("/var/lib/taskdeck");
        assert_eq!(
            absolute.log_dir_from(base),
            Path::new("/var/lib/taskdeck").join(LOG_DIR_NAME)
        );
        assert!(absolute.log_dir_from(base).is_absolute());
    }
}
