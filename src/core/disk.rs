//! Disk representation.

use serde::{Deserialize, Serialize};

/// A storage disk.
///
/// `free_space` is the only field that changes after creation: placing a
/// photo on the disk lowers it and removing the photo raises it again.
///
/// # Examples
///
/// ```
/// use photodisk::core::Disk;
///
/// let disk = Disk::new(1, "Seagate", 7200, 1000, 2);
/// assert!(disk.can_fit(1000));
/// assert!(!disk.can_fit(1001));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disk {
    /// Unique positive identifier.
    pub id: i64,

    /// Manufacturer name.
    pub manufacturing_company: String,

    /// Disk speed (positive).
    pub speed: i64,

    /// Remaining free space in bytes (never negative).
    pub free_space: i64,

    /// Storage cost per byte (positive).
    pub cost_per_byte: i64,
}

impl Disk {
    /// Creates a new disk.
    #[must_use]
    pub fn new(
        id: i64,
        manufacturing_company: impl Into<String>,
        speed: i64,
        free_space: i64,
        cost_per_byte: i64,
    ) -> Self {
        Self {
            id,
            manufacturing_company: manufacturing_company.into(),
            speed,
            free_space,
            cost_per_byte,
        }
    }

    /// Returns true if `size` bytes fit in the current free space.
    #[must_use]
    pub const fn can_fit(&self, size: i64) -> bool {
        size <= self.free_space
    }
}
