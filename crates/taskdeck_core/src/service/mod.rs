//! Core use-case services.
//!
//! # Responsibility
//! - Expose the task operations callers drive (add, update, toggle, delete).
//! - Keep callers decoupled from storage and encoding details.

pub mod task_store;
