//! # photodisk
//!
//! Relational store for photos, disks and RAM modules on `SQLite`.
//!
//! Photos are placed on disks, consuming the disk's free space; RAM modules
//! are installed in disks. Every mutation runs in its own transaction and
//! reports a [`ReturnValue`] code. Read-only analytics answer capacity, cost
//! and co-location questions over the stored data.
//!
//! ## Features
//!
//! - **Schema lifecycle**: create, clear and drop tables and views
//! - **Atomic mutations**: constraint failures classified into result codes
//! - **Analytics**: ranked and aggregate queries through [`Analytics`]
//! - **CLI**: the `photodisk` binary wraps every operation

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Disk, Photo, Ram};

// Re-export storage types
pub use storage::{
    Analytics, DEFAULT_DB_PATH, ReturnValue, SqliteStorage, Storage, StorageStats,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
