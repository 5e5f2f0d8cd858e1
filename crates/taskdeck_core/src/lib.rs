//! Core domain logic for taskdeck.
//! This crate owns the task collection, its persistence and its views.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{open_task_store, CoreConfig, DB_FILE_NAME, LOG_DIR_NAME};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingConfig, LoggingError,
};
pub use model::task::{
    parse_due_date, Priority, Task, TaskDraft, TaskId, TaskPatch, TaskValidationError,
};
pub use repo::kv_store::{
    KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore,
};
pub use repo::task_snapshot::{
    SnapshotError, SnapshotResult, TaskSnapshotRepository, DEFAULT_TASKS_KEY,
};
pub use service::task_store::{StoreError, StoreResult, StoreState, TaskStore};
pub use view::projection::{
    project, EmptyState, PriorityFilter, Projection, StatusFilter, TaskCounts, TaskQuery,
    UnknownFilter,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
