//! Read-only views derived from the task collection.

pub mod projection;
