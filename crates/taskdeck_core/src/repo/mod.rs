//! Persistence layer: durable key-value storage and task snapshots.
//!
//! # Responsibility
//! - Define the storage seam (`KeyValueStore`) and its implementations.
//! - Keep JSON encoding of the task collection out of the store logic.

pub mod kv_store;
pub mod task_snapshot;
