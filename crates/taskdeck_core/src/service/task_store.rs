//! In-memory task store with write-through persistence.
//!
//! # Responsibility
//! - Own the authoritative task collection for one running instance.
//! - Persist a full snapshot after every successful mutation.
//!
//! # Invariants
//! - Mutations are rejected until `restore()` has loaded persisted state.
//! - A failed storage read keeps the store uninitialized.
//! - A mutation is committed in memory only after its snapshot is saved.
//! - Unknown IDs are a no-op (`Ok(false)`), never an error.
//! - Base order is newest first; `add` prepends.

use crate::model::task::{Task, TaskDraft, TaskPatch, TaskValidationError};
use crate::repo::kv_store::{KeyValueStore, KvError};
use crate::repo::task_snapshot::{SnapshotError, TaskSnapshotRepository};
use crate::view::projection::{project, Projection, TaskQuery};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
#[derive(Debug)]
pub enum StoreError {
    /// A mutation arrived before the initial restore finished.
    NotReady,
    Validation(TaskValidationError),
    Persistence(SnapshotError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "task store has not been restored yet"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotReady => None,
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Persistence(SnapshotError::Storage(value))
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Persistence(value)
    }
}

/// Lifecycle phase of a [`TaskStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Ready,
}

/// Owning task store for one session.
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    state: StoreState,
    snapshots: TaskSnapshotRepository<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates an uninitialized store. Call [`TaskStore::restore`] before mutating.
    pub fn new(snapshots: TaskSnapshotRepository<S>) -> Self {
        Self {
            tasks: Vec::new(),
            state: StoreState::Uninitialized,
            snapshots,
        }
    }

    /// Creates a store and immediately restores persisted state.
    pub fn restored(snapshots: TaskSnapshotRepository<S>) -> StoreResult<Self> {
        let mut store = Self::new(snapshots);
        store.restore()?;
        Ok(store)
    }

    /// Loads persisted tasks and enters the ready state.
    ///
    /// Returns the number of tasks held. Calling again once ready does not
    /// reload, so in-memory state is never clobbered.
    ///
    /// # Errors
    /// - `Persistence` when storage cannot be read. The store stays
    ///   uninitialized and a later `restore` may retry.
    pub fn restore(&mut self) -> StoreResult<usize> {
        if self.state == StoreState::Ready {
            return Ok(self.tasks.len());
        }

        let tasks = match self.snapshots.load() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=store_restore module=store status=error key={} error={err}",
                    self.snapshots.key()
                );
                return Err(err.into());
            }
        };
        self.tasks = tasks;
        self.state = StoreState::Ready;
        info!(
            "event=store_restore module=store status=ok key={} count={}",
            self.snapshots.key(),
            self.tasks.len()
        );
        Ok(self.tasks.len())
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == StoreState::Ready
    }

    /// Tasks in base (storage) order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn snapshots(&self) -> &TaskSnapshotRepository<S> {
        &self.snapshots
    }

    /// Filtered, sorted view of the current collection.
    pub fn project(&self, query: &TaskQuery) -> Projection<'_> {
        project(&self.tasks, query)
    }

    /// Creates a task and prepends it.
    ///
    /// # Errors
    /// - `Validation(EmptyTitle)` for a blank title; nothing is written.
    /// - `NotReady` before restore.
    /// - `Persistence` when the snapshot cannot be saved; nothing changes.
    pub fn add(&mut self, draft: TaskDraft) -> StoreResult<Task> {
        self.ensure_ready("add")?;

        let task = match Task::create(draft) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_add module=store status=rejected reason={err}");
                return Err(err.into());
            }
        };
        if self.get(&task.id).is_some() {
            // IDs must stay unique within the collection.
            warn!("event=task_add module=store status=error reason=duplicate_id");
            return Err(TaskValidationError::DuplicateId(task.id).into());
        }

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task.clone());
        next.extend(self.tasks.iter().cloned());
        self.commit(next)?;

        info!(
            "event=task_add module=store status=ok id={} priority={} count={}",
            task.id,
            task.priority,
            self.tasks.len()
        );
        Ok(task)
    }

    /// Merges `patch` into every task with `id`.
    ///
    /// Returns `Ok(false)` when no such task exists. No validation is applied.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> StoreResult<bool> {
        self.ensure_ready("update")?;
        self.modify("task_update", id, |task| task.apply(patch.clone()))
    }

    /// Flips the completion flag of every task with `id`.
    pub fn toggle(&mut self, id: &str) -> StoreResult<bool> {
        self.ensure_ready("toggle")?;
        self.modify("task_toggle", id, |task| task.completed = !task.completed)
    }

    /// Removes every task with `id`. Repeated deletes are a no-op.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        self.ensure_ready("delete")?;

        if self.get(id).is_none() {
            debug!("event=task_delete module=store status=noop id={id}");
            return Ok(false);
        }

        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        info!(
            "event=task_delete module=store status=ok id={id} count={}",
            self.tasks.len()
        );
        Ok(true)
    }

    fn modify(
        &mut self,
        event: &str,
        id: &str,
        mut change: impl FnMut(&mut Task),
    ) -> StoreResult<bool> {
        if self.get(id).is_none() {
            debug!("event={event} module=store status=noop id={id}");
            return Ok(false);
        }

        // Snapshots from older clients may repeat an id; every copy is changed.
        let mut next = self.tasks.clone();
        let mut matched = 0;
        for task in next.iter_mut().filter(|task| task.id == id) {
            change(task);
            matched += 1;
        }
        self.commit(next)?;

        info!("event={event} module=store status=ok id={id} matched={matched}");
        Ok(true)
    }

    fn commit(&mut self, next: Vec<Task>) -> StoreResult<()> {
        if let Err(err) = self.snapshots.save(&next) {
            warn!("event=tasks_save module=store status=error error={err}");
            return Err(err.into());
        }
        self.tasks = next;
        Ok(())
    }

    fn ensure_ready(&self, operation: &str) -> StoreResult<()> {
        if self.state == StoreState::Ready {
            return Ok(());
        }
        warn!("event=store_guard module=store status=rejected operation={operation} reason=not_ready");
        Err(StoreError::NotReady)
    }
}
