//! Storage trait definitions.
//!
//! Defines the interface for persistent storage backends. [`Storage`] holds
//! the schema lifecycle, entity and association operations; [`Analytics`]
//! holds the read-only queries.

use crate::core::{Disk, Photo, Ram};
use crate::error::Result;
use crate::storage::executor::ReturnValue;
use serde::Serialize;

/// Trait for persistent storage backends.
///
/// Mutations report a [`ReturnValue`] and never fail with an error. Each
/// one is atomic: either all of its statements commit or none do.
pub trait Storage {
    // ==================== Schema Operations ====================

    /// Creates all tables and views.
    ///
    /// Idempotent - safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    fn create_schema(&mut self) -> Result<()>;

    /// Deletes all rows from all tables, preserving the structure.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn clear_schema(&mut self) -> Result<()>;

    /// Drops all views and tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a drop fails.
    fn drop_schema(&mut self) -> Result<()>;

    /// Checks if all tables and views exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_initialized(&self) -> Result<bool>;

    // ==================== Photo Operations ====================

    /// Inserts a photo.
    fn add_photo(&mut self, photo: &Photo) -> ReturnValue;

    /// Retrieves a photo by ID. `None` when no photo has this ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_photo_by_id(&self, photo_id: i64) -> Result<Option<Photo>>;

    /// Deletes a photo matching all of its fields.
    ///
    /// Free space is first given back to every disk holding the photo.
    /// Deleting a photo that does not exist is not an error.
    fn delete_photo(&mut self, photo: &Photo) -> ReturnValue;

    /// Lists all photos ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_photos(&self) -> Result<Vec<Photo>>;

    // ==================== Disk Operations ====================

    /// Inserts a disk.
    fn add_disk(&mut self, disk: &Disk) -> ReturnValue;

    /// Retrieves a disk by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_disk_by_id(&self, disk_id: i64) -> Result<Option<Disk>>;

    /// Deletes a disk and, by cascade, all of its placements and installs.
    fn delete_disk(&mut self, disk_id: i64) -> ReturnValue;

    /// Lists all disks ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_disks(&self) -> Result<Vec<Disk>>;

    // ==================== RAM Operations ====================

    /// Inserts a RAM module.
    fn add_ram(&mut self, ram: &Ram) -> ReturnValue;

    /// Retrieves a RAM module by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_ram_by_id(&self, ram_id: i64) -> Result<Option<Ram>>;

    /// Deletes a RAM module.
    fn delete_ram(&mut self, ram_id: i64) -> ReturnValue;

    /// Lists all RAM modules ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_rams(&self) -> Result<Vec<Ram>>;

    /// Inserts a disk and a photo together: both or neither.
    fn add_disk_and_photo(&mut self, disk: &Disk, photo: &Photo) -> ReturnValue;

    // ==================== Association Operations ====================

    /// Places a photo on a disk, consuming its size from the disk's free space.
    fn add_photo_to_disk(&mut self, photo: &Photo, disk_id: i64) -> ReturnValue;

    /// Removes a photo from a disk, giving its size back.
    fn remove_photo_from_disk(&mut self, photo: &Photo, disk_id: i64) -> ReturnValue;

    /// Installs a RAM module in a disk.
    fn add_ram_to_disk(&mut self, ram_id: i64, disk_id: i64) -> ReturnValue;

    /// Uninstalls a RAM module from a disk.
    fn remove_ram_from_disk(&mut self, ram_id: i64, disk_id: i64) -> ReturnValue;

    // ==================== Utility Operations ====================

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    fn stats(&self) -> Result<StorageStats>;
}

/// Read-only analytical queries.
pub trait Analytics {
    /// Mean size of the photos placed on a disk, 0 when it holds none.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn average_photos_size_on_disk(&self, disk_id: i64) -> Result<f64>;

    /// Total size of the RAM installed in a disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_total_ram_on_disk(&self, disk_id: i64) -> Result<i64>;

    /// Storage cost of every placement of photos with this description.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_cost_for_description(&self, description: &str) -> Result<i64>;

    /// Up to five photos fitting the disk's free space, highest ID first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_photos_can_be_added_to_disk(&self, disk_id: i64) -> Result<Vec<i64>>;

    /// Up to five photos fitting both the disk's free space and its total
    /// RAM, lowest ID first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_photos_can_be_added_to_disk_and_ram(&self, disk_id: i64) -> Result<Vec<i64>>;

    /// Whether all RAM in the disk comes from the disk's manufacturer.
    ///
    /// A disk without RAM is exclusive; a missing disk is not.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn is_company_exclusive(&self, disk_id: i64) -> Result<bool>;

    /// Whether some disk holds at least `num` photos with this description.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn is_disk_containing_at_least_num_exists(&self, description: &str, num: i64) -> Result<bool>;

    /// Up to five disks ranked by total stored photo size.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_disks_containing_the_most_data(&self) -> Result<Vec<i64>>;

    /// Disks sharing at least one photo with another disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_conflicting_disks(&self) -> Result<Vec<i64>>;

    /// Up to five disks ranked by how many photos would fit, then speed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn most_available_disks(&self) -> Result<Vec<i64>>;

    /// Up to ten photos close to the given one.
    ///
    /// For a placed photo these are photos sharing at least half of its
    /// disks; for an unplaced photo, any other photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_close_photos(&self, photo_id: i64) -> Result<Vec<i64>>;
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of photos.
    pub photo_count: usize,
    /// Number of disks.
    pub disk_count: usize,
    /// Number of RAM modules.
    pub ram_count: usize,
    /// Number of photo placements.
    pub placement_count: usize,
    /// Number of RAM installs.
    pub install_count: usize,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
