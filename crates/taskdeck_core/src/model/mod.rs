//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define canonical data structures used by store, persistence and views.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod task;
