//! `SQLite` storage implementation.
//!
//! Provides persistent storage using `SQLite` with one transaction per
//! mutation. Parameters are always bound, never spliced into SQL text.

// SQLite stores all integers as i64. Counts are never negative.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::{Disk, Photo, Ram};
use crate::error::{Result, StorageError};
use crate::storage::executor::{
    ReturnValue, classify_placement, execute, execute_delete, execute_with,
};
use crate::storage::schema::{
    CHECK_SCHEMA_SQL, CLEAR_SQL, CURRENT_SCHEMA_VERSION, DROP_SQL, SCHEMA_OBJECT_COUNT, SCHEMA_SQL,
};
use crate::storage::traits::{Storage, StorageStats};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

/// SQLite-based storage implementation.
///
/// Owns a single connection. Callers hold the handle and pass it to
/// whatever needs database access.
///
/// # Examples
///
/// ```
/// use photodisk::core::{Disk, Photo};
/// use photodisk::storage::{ReturnValue, SqliteStorage, Storage};
///
/// let mut storage = SqliteStorage::in_memory().unwrap();
/// storage.create_schema().unwrap();
///
/// assert_eq!(storage.add_disk(&Disk::new(1, "A", 10, 1000, 1)), ReturnValue::Ok);
/// assert_eq!(storage.add_photo(&Photo::new(1, "cat", 300)), ReturnValue::Ok);
/// assert_eq!(
///     storage.add_photo_to_disk(&Photo::new(1, "cat", 300), 1),
///     ReturnValue::Ok
/// );
/// assert_eq!(storage.get_disk_by_id(1).unwrap().unwrap().free_space, 700);
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    pub(crate) conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or configured.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        configure(&conn)?;

        // WAL returns the resulting mode as a row
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        tracing::debug!(path = %path.display(), "opened database");

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        configure(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the schema version recorded in `user_version`.
    fn get_schema_version(&self) -> Result<u32> {
        let version: u32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(version)
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
                row.get(0)
            })
            .map_err(StorageError::from)?;
        Ok(count as usize)
    }

    /// Runs a batch of statements plus a version update in one transaction.
    fn run_lifecycle(&mut self, name: &str, sql: &str, version: Option<u32>) -> Result<()> {
        let tx = self.conn.transaction().map_err(StorageError::from)?;
        tx.execute_batch(sql)
            .map_err(|e| StorageError::Transaction(format!("{name}: {e}")))?;
        if let Some(version) = version {
            tx.pragma_update(None, "user_version", version)
                .map_err(StorageError::from)?;
        }
        tx.commit().map_err(StorageError::from)?;
        tracing::info!(operation = name, "schema updated");
        Ok(())
    }
}

/// Per-connection settings.
fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(StorageError::from)?;
    Ok(())
}

fn photo_from_row(row: &Row<'_>) -> rusqlite::Result<Photo> {
    Ok(Photo {
        id: row.get(0)?,
        description: row.get(1)?,
        disk_size_needed: row.get(2)?,
    })
}

fn disk_from_row(row: &Row<'_>) -> rusqlite::Result<Disk> {
    Ok(Disk {
        id: row.get(0)?,
        manufacturing_company: row.get(1)?,
        speed: row.get(2)?,
        free_space: row.get(3)?,
        cost_per_byte: row.get(4)?,
    })
}

fn ram_from_row(row: &Row<'_>) -> rusqlite::Result<Ram> {
    Ok(Ram {
        id: row.get(0)?,
        size: row.get(1)?,
        company: row.get(2)?,
    })
}

fn insert_photo(conn: &Connection, photo: &Photo) -> rusqlite::Result<()> {
    conn.execute(
        r#"INSERT INTO "Photo" (id, description, disk_size_needed) VALUES (?1, ?2, ?3)"#,
        params![photo.id, photo.description, photo.disk_size_needed],
    )?;
    Ok(())
}

fn insert_disk(conn: &Connection, disk: &Disk) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO "Disk" (id, manufacturing_company, speed, free_space, cost_per_byte)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            disk.id,
            disk.manufacturing_company,
            disk.speed,
            disk.free_space,
            disk.cost_per_byte,
        ],
    )?;
    Ok(())
}

impl Storage for SqliteStorage {
    // ==================== Schema Operations ====================

    fn create_schema(&mut self) -> Result<()> {
        self.run_lifecycle("create_schema", SCHEMA_SQL, Some(CURRENT_SCHEMA_VERSION))
    }

    fn clear_schema(&mut self) -> Result<()> {
        self.run_lifecycle("clear_schema", CLEAR_SQL, None)
    }

    fn drop_schema(&mut self) -> Result<()> {
        self.run_lifecycle("drop_schema", DROP_SQL, Some(0))
    }

    fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count as usize == SCHEMA_OBJECT_COUNT)
    }

    // ==================== Photo Operations ====================

    fn add_photo(&mut self, photo: &Photo) -> ReturnValue {
        execute(&mut self.conn, "add_photo", |tx| insert_photo(tx, photo))
    }

    fn get_photo_by_id(&self, photo_id: i64) -> Result<Option<Photo>> {
        let photo = self
            .conn
            .query_row(
                r#"SELECT id, description, disk_size_needed FROM "Photo" WHERE id = ?1"#,
                params![photo_id],
                photo_from_row,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(photo)
    }

    fn delete_photo(&mut self, photo: &Photo) -> ReturnValue {
        execute_delete(&mut self.conn, "delete_photo", false, |tx| {
            tx.execute(
                r#"
                UPDATE "Disk" SET free_space = free_space + ?3
                WHERE id IN (
                    SELECT pid.disk_id
                    FROM "PhotoInDisk" pid
                    INNER JOIN "Photo" p ON p.id = pid.photo_id
                    WHERE p.id = ?1 AND p.description = ?2 AND p.disk_size_needed = ?3
                )
                "#,
                params![photo.id, photo.description, photo.disk_size_needed],
            )?;
            // Placements go with the photo via ON DELETE CASCADE
            tx.execute(
                r#"
                DELETE FROM "Photo"
                WHERE id = ?1 AND description = ?2 AND disk_size_needed = ?3
                "#,
                params![photo.id, photo.description, photo.disk_size_needed],
            )
        })
    }

    fn list_photos(&self) -> Result<Vec<Photo>> {
        let mut stmt = self
            .conn
            .prepare(r#"SELECT id, description, disk_size_needed FROM "Photo" ORDER BY id"#)
            .map_err(StorageError::from)?;

        let photos = stmt
            .query_map([], photo_from_row)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(photos)
    }

    // ==================== Disk Operations ====================

    fn add_disk(&mut self, disk: &Disk) -> ReturnValue {
        execute(&mut self.conn, "add_disk", |tx| insert_disk(tx, disk))
    }

    fn get_disk_by_id(&self, disk_id: i64) -> Result<Option<Disk>> {
        let disk = self
            .conn
            .query_row(
                r#"
                SELECT id, manufacturing_company, speed, free_space, cost_per_byte
                FROM "Disk" WHERE id = ?1
                "#,
                params![disk_id],
                disk_from_row,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(disk)
    }

    fn delete_disk(&mut self, disk_id: i64) -> ReturnValue {
        execute_delete(&mut self.conn, "delete_disk", true, |tx| {
            tx.execute(r#"DELETE FROM "Disk" WHERE id = ?1"#, params![disk_id])
        })
    }

    fn list_disks(&self) -> Result<Vec<Disk>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT id, manufacturing_company, speed, free_space, cost_per_byte
                FROM "Disk" ORDER BY id
                "#,
            )
            .map_err(StorageError::from)?;

        let disks = stmt
            .query_map([], disk_from_row)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(disks)
    }

    // ==================== RAM Operations ====================

    fn add_ram(&mut self, ram: &Ram) -> ReturnValue {
        execute(&mut self.conn, "add_ram", |tx| {
            tx.execute(
                r#"INSERT INTO "RAM" (id, size, company) VALUES (?1, ?2, ?3)"#,
                params![ram.id, ram.size, ram.company],
            )?;
            Ok(())
        })
    }

    fn get_ram_by_id(&self, ram_id: i64) -> Result<Option<Ram>> {
        let ram = self
            .conn
            .query_row(
                r#"SELECT id, size, company FROM "RAM" WHERE id = ?1"#,
                params![ram_id],
                ram_from_row,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(ram)
    }

    fn delete_ram(&mut self, ram_id: i64) -> ReturnValue {
        execute_delete(&mut self.conn, "delete_ram", true, |tx| {
            tx.execute(r#"DELETE FROM "RAM" WHERE id = ?1"#, params![ram_id])
        })
    }

    fn list_rams(&self) -> Result<Vec<Ram>> {
        let mut stmt = self
            .conn
            .prepare(r#"SELECT id, size, company FROM "RAM" ORDER BY id"#)
            .map_err(StorageError::from)?;

        let rams = stmt
            .query_map([], ram_from_row)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(rams)
    }

    fn add_disk_and_photo(&mut self, disk: &Disk, photo: &Photo) -> ReturnValue {
        execute(&mut self.conn, "add_disk_and_photo", |tx| {
            insert_disk(tx, disk)?;
            insert_photo(tx, photo)
        })
    }

    // ==================== Association Operations ====================

    fn add_photo_to_disk(&mut self, photo: &Photo, disk_id: i64) -> ReturnValue {
        execute_with(
            &mut self.conn,
            "add_photo_to_disk",
            classify_placement,
            |tx| {
                // A photo or disk that does not match resolves to NULL here
                tx.execute(
                    r#"
                    INSERT INTO "PhotoInDisk" (photo_id, disk_id) VALUES (
                        (SELECT id FROM "Photo"
                         WHERE id = ?1 AND description = ?2 AND disk_size_needed = ?3),
                        (SELECT id FROM "Disk" WHERE id = ?4)
                    )
                    "#,
                    params![photo.id, photo.description, photo.disk_size_needed, disk_id],
                )?;
                tx.execute(
                    r#"UPDATE "Disk" SET free_space = free_space - ?1 WHERE id = ?2"#,
                    params![photo.disk_size_needed, disk_id],
                )?;
                Ok(())
            },
        )
    }

    fn remove_photo_from_disk(&mut self, photo: &Photo, disk_id: i64) -> ReturnValue {
        execute_delete(&mut self.conn, "remove_photo_from_disk", true, |tx| {
            tx.execute(
                r#"
                UPDATE "Disk" SET free_space = free_space + COALESCE((
                    SELECT p.disk_size_needed
                    FROM "Photo" p
                    INNER JOIN "PhotoInDisk" pid ON pid.photo_id = p.id
                    WHERE p.id = ?1 AND pid.disk_id = ?2
                ), 0)
                WHERE id = ?2
                "#,
                params![photo.id, disk_id],
            )?;
            tx.execute(
                r#"DELETE FROM "PhotoInDisk" WHERE photo_id = ?1 AND disk_id = ?2"#,
                params![photo.id, disk_id],
            )
        })
    }

    fn add_ram_to_disk(&mut self, ram_id: i64, disk_id: i64) -> ReturnValue {
        execute(&mut self.conn, "add_ram_to_disk", |tx| {
            tx.execute(
                r#"INSERT INTO "RAMInDisk" (ram_id, disk_id) VALUES (?1, ?2)"#,
                params![ram_id, disk_id],
            )?;
            Ok(())
        })
    }

    fn remove_ram_from_disk(&mut self, ram_id: i64, disk_id: i64) -> ReturnValue {
        execute_delete(&mut self.conn, "remove_ram_from_disk", true, |tx| {
            tx.execute(
                r#"DELETE FROM "RAMInDisk" WHERE ram_id = ?1 AND disk_id = ?2"#,
                params![ram_id, disk_id],
            )
        })
    }

    // ==================== Utility Operations ====================

    fn stats(&self) -> Result<StorageStats> {
        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len()));

        Ok(StorageStats {
            photo_count: self.count_rows("Photo")?,
            disk_count: self.count_rows("Disk")?,
            ram_count: self.count_rows("RAM")?,
            placement_count: self.count_rows("PhotoInDisk")?,
            install_count: self.count_rows("RAMInDisk")?,
            schema_version: self.get_schema_version()?,
            db_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> SqliteStorage {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.create_schema().unwrap();
        storage
    }

    fn free_space(storage: &SqliteStorage, disk_id: i64) -> i64 {
        storage.get_disk_by_id(disk_id).unwrap().unwrap().free_space
    }

    #[test]
    fn test_create_schema() {
        let mut storage = SqliteStorage::in_memory().unwrap();
        assert!(!storage.is_initialized().unwrap());
        assert!(storage.create_schema().is_ok());
        assert!(storage.is_initialized().unwrap());
    }

    #[test]
    fn test_create_schema_idempotent() {
        let mut storage = setup();
        assert!(storage.create_schema().is_ok());
        assert_eq!(storage.stats().unwrap().schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_drop_schema() {
        let mut storage = setup();
        assert_eq!(storage.add_photo(&Photo::new(1, "a", 1)), ReturnValue::Ok);
        storage.drop_schema().unwrap();
        assert!(!storage.is_initialized().unwrap());
        // Dropping twice is fine
        storage.drop_schema().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), 0);
    }

    #[test]
    fn test_missing_view_is_not_initialized() {
        let storage = setup();
        storage
            .conn
            .execute_batch(r#"DROP VIEW "DiskPhotoCounts";"#)
            .unwrap();
        assert!(!storage.is_initialized().unwrap());
    }

    #[test]
    fn test_clear_schema() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 100, 1)).is_ok());
        assert!(storage.add_photo(&Photo::new(1, "a", 10)).is_ok());
        assert!(storage.add_ram(&Ram::new(1, 8, "A")).is_ok());
        assert!(storage.add_photo_to_disk(&Photo::new(1, "a", 10), 1).is_ok());
        assert!(storage.add_ram_to_disk(1, 1).is_ok());

        storage.clear_schema().unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.photo_count, 0);
        assert_eq!(stats.disk_count, 0);
        assert_eq!(stats.ram_count, 0);
        assert_eq!(stats.placement_count, 0);
        assert_eq!(stats.install_count, 0);
        assert!(storage.is_initialized().unwrap());
    }

    #[test]
    fn test_photo_crud() {
        let mut storage = setup();
        let photo = Photo::new(1, "sunset", 300);

        assert_eq!(storage.add_photo(&photo), ReturnValue::Ok);
        assert_eq!(storage.get_photo_by_id(1).unwrap(), Some(photo.clone()));
        assert_eq!(storage.list_photos().unwrap(), vec![photo.clone()]);

        assert_eq!(storage.delete_photo(&photo), ReturnValue::Ok);
        assert!(storage.get_photo_by_id(1).unwrap().is_none());
    }

    #[test]
    fn test_photo_bad_params() {
        let mut storage = setup();
        assert_eq!(
            storage.add_photo(&Photo::new(0, "zero", 1)),
            ReturnValue::BadParams
        );
        assert_eq!(
            storage.add_photo(&Photo::new(1, "neg", -1)),
            ReturnValue::BadParams
        );
    }

    #[test]
    fn test_delete_photo_requires_full_match() {
        let mut storage = setup();
        assert!(storage.add_photo(&Photo::new(1, "sunset", 300)).is_ok());

        // Same ID, different description: nothing is deleted, still OK
        assert_eq!(
            storage.delete_photo(&Photo::new(1, "other", 300)),
            ReturnValue::Ok
        );
        assert!(storage.get_photo_by_id(1).unwrap().is_some());
    }

    #[test]
    fn test_disk_crud() {
        let mut storage = setup();
        let disk = Disk::new(4, "Seagate", 7200, 5000, 3);

        assert_eq!(storage.add_disk(&disk), ReturnValue::Ok);
        assert_eq!(storage.add_disk(&disk), ReturnValue::AlreadyExists);
        assert_eq!(storage.get_disk_by_id(4).unwrap(), Some(disk));

        assert_eq!(storage.delete_disk(4), ReturnValue::Ok);
        assert_eq!(storage.delete_disk(4), ReturnValue::NotExists);
        assert!(storage.list_disks().unwrap().is_empty());
    }

    #[test]
    fn test_disk_bad_params() {
        let mut storage = setup();
        assert_eq!(
            storage.add_disk(&Disk::new(1, "A", 0, 10, 1)),
            ReturnValue::BadParams
        );
        assert_eq!(
            storage.add_disk(&Disk::new(1, "A", 1, -10, 1)),
            ReturnValue::BadParams
        );
        assert_eq!(
            storage.add_disk(&Disk::new(1, "A", 1, 10, 0)),
            ReturnValue::BadParams
        );
    }

    #[test]
    fn test_ram_crud() {
        let mut storage = setup();
        let ram = Ram::new(2, 16, "Kingston");

        assert_eq!(storage.add_ram(&ram), ReturnValue::Ok);
        assert_eq!(storage.get_ram_by_id(2).unwrap(), Some(ram.clone()));
        assert_eq!(storage.list_rams().unwrap(), vec![ram]);
        assert_eq!(storage.add_ram(&Ram::new(3, 0, "X")), ReturnValue::BadParams);

        assert_eq!(storage.delete_ram(2), ReturnValue::Ok);
        assert_eq!(storage.delete_ram(2), ReturnValue::NotExists);
    }

    #[test]
    fn test_add_disk_and_photo_is_atomic() {
        let mut storage = setup();
        assert!(storage.add_photo(&Photo::new(1, "taken", 5)).is_ok());

        let rv = storage.add_disk_and_photo(&Disk::new(1, "A", 1, 10, 1), &Photo::new(1, "x", 1));
        assert_eq!(rv, ReturnValue::AlreadyExists);
        assert!(storage.get_disk_by_id(1).unwrap().is_none());

        let rv = storage.add_disk_and_photo(&Disk::new(1, "A", 1, 10, 1), &Photo::new(2, "x", 1));
        assert_eq!(rv, ReturnValue::Ok);
        assert!(storage.get_disk_by_id(1).unwrap().is_some());
        assert!(storage.get_photo_by_id(2).unwrap().is_some());
    }

    #[test]
    fn test_photo_placement_round_trip() {
        let mut storage = setup();
        let photo = Photo::new(1, "p", 300);
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 1)).is_ok());
        assert!(storage.add_photo(&photo).is_ok());

        assert_eq!(storage.add_photo_to_disk(&photo, 1), ReturnValue::Ok);
        assert_eq!(free_space(&storage, 1), 700);
        assert_eq!(
            storage.add_photo_to_disk(&photo, 1),
            ReturnValue::AlreadyExists
        );
        assert_eq!(free_space(&storage, 1), 700);

        assert_eq!(storage.remove_photo_from_disk(&photo, 1), ReturnValue::Ok);
        assert_eq!(free_space(&storage, 1), 1000);
        assert_eq!(
            storage.remove_photo_from_disk(&photo, 1),
            ReturnValue::NotExists
        );
        assert_eq!(free_space(&storage, 1), 1000);
    }

    #[test]
    fn test_photo_placement_missing_entities() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 1)).is_ok());
        assert!(storage.add_photo(&Photo::new(1, "p", 300)).is_ok());

        assert_eq!(
            storage.add_photo_to_disk(&Photo::new(9, "p", 300), 1),
            ReturnValue::NotExists
        );
        assert_eq!(
            storage.add_photo_to_disk(&Photo::new(1, "p", 300), 9),
            ReturnValue::NotExists
        );
        assert_eq!(free_space(&storage, 1), 1000);
    }

    #[test]
    fn test_photo_placement_without_space() {
        let mut storage = setup();
        let photo = Photo::new(1, "big", 2000);
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 1)).is_ok());
        assert!(storage.add_photo(&photo).is_ok());

        assert_eq!(storage.add_photo_to_disk(&photo, 1), ReturnValue::BadParams);
        assert_eq!(free_space(&storage, 1), 1000);
        assert_eq!(storage.stats().unwrap().placement_count, 0);
    }

    #[test]
    fn test_ram_install_round_trip() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 1)).is_ok());
        assert!(storage.add_ram(&Ram::new(1, 8, "A")).is_ok());

        assert_eq!(storage.add_ram_to_disk(1, 1), ReturnValue::Ok);
        assert_eq!(storage.add_ram_to_disk(1, 1), ReturnValue::AlreadyExists);
        assert_eq!(storage.add_ram_to_disk(2, 1), ReturnValue::NotExists);
        assert_eq!(storage.add_ram_to_disk(1, 2), ReturnValue::NotExists);

        assert_eq!(storage.remove_ram_from_disk(1, 1), ReturnValue::Ok);
        assert_eq!(storage.remove_ram_from_disk(1, 1), ReturnValue::NotExists);
    }

    #[test]
    fn test_delete_photo_restores_free_space() {
        let mut storage = setup();
        let photo = Photo::new(1, "p", 100);
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 500, 1)).is_ok());
        assert!(storage.add_disk(&Disk::new(2, "B", 1, 300, 1)).is_ok());
        assert!(storage.add_photo(&photo).is_ok());
        assert!(storage.add_photo_to_disk(&photo, 1).is_ok());
        assert!(storage.add_photo_to_disk(&photo, 2).is_ok());

        assert_eq!(storage.delete_photo(&photo), ReturnValue::Ok);
        assert_eq!(free_space(&storage, 1), 500);
        assert_eq!(free_space(&storage, 2), 300);
        assert_eq!(storage.stats().unwrap().placement_count, 0);
    }

    #[test]
    fn test_delete_disk_cascades() {
        let mut storage = setup();
        let photo = Photo::new(1, "p", 100);
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 500, 1)).is_ok());
        assert!(storage.add_photo(&photo).is_ok());
        assert!(storage.add_ram(&Ram::new(1, 8, "A")).is_ok());
        assert!(storage.add_photo_to_disk(&photo, 1).is_ok());
        assert!(storage.add_ram_to_disk(1, 1).is_ok());

        assert_eq!(storage.delete_disk(1), ReturnValue::Ok);

        let stats = storage.stats().unwrap();
        assert_eq!(stats.placement_count, 0);
        assert_eq!(stats.install_count, 0);
        assert_eq!(stats.photo_count, 1);
        assert_eq!(stats.ram_count, 1);
    }

    #[test]
    fn test_stats_in_memory_has_no_size() {
        let storage = setup();
        let stats = storage.stats().unwrap();
        assert!(stats.db_size.is_none());
        assert!(storage.path().is_none());
    }
}
