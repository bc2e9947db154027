//! Fact store adapters.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryFactStore;
pub use sqlite::SqliteFactStore;
