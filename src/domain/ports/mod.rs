//! Port trait definitions (Hexagonal Architecture)
//!
//! - FactStore: storage of task facts, implemented by the in-memory and
//!   SQLite adapters

pub mod errors;
pub mod fact_store;

pub use errors::StoreError;
pub use fact_store::{FactStore, TaskFilter};
