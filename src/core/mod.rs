//! Core domain models for photodisk.
//!
//! Plain data carriers for the three primary entities: photos, disks and
//! RAM modules. These are pure domain models with no I/O dependencies.

pub mod disk;
pub mod photo;
pub mod ram;

pub use disk::Disk;
pub use photo::Photo;
pub use ram::Ram;
