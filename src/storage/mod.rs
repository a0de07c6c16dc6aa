//! Storage layer for photodisk.
//!
//! Provides persistent storage using `SQLite`. The storage layer owns the
//! schema, the transactional command executor, the entity and association
//! operations, and the analytical queries.

pub mod analytics;
pub mod executor;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use executor::ReturnValue;
pub use schema::{CURRENT_SCHEMA_VERSION, SCHEMA_SQL};
pub use sqlite::SqliteStorage;
pub use traits::{Analytics, Storage, StorageStats};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".photodisk/photodisk.db";
