//! CLI command implementations.

pub mod schedule;
pub mod task;
