//! Photo representation.
//!
//! A photo occupies `disk_size_needed` bytes on every disk it is placed on.

use serde::{Deserialize, Serialize};

/// A photo that can be stored on one or more disks.
///
/// # Examples
///
/// ```
/// use photodisk::core::Photo;
///
/// let photo = Photo::new(1, "sunset", 300);
/// assert_eq!(photo.size(), 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Photo {
    /// Unique positive identifier.
    pub id: i64,

    /// Free-form description, used by the cost and containment queries.
    pub description: String,

    /// Bytes required on a disk to store this photo.
    pub disk_size_needed: i64,
}

impl Photo {
    /// Creates a new photo.
    #[must_use]
    pub fn new(id: i64, description: impl Into<String>, disk_size_needed: i64) -> Self {
        Self {
            id,
            description: description.into(),
            disk_size_needed,
        }
    }

    /// Returns the disk space this photo needs.
    #[must_use]
    pub const fn size(&self) -> i64 {
        self.disk_size_needed
    }
}
