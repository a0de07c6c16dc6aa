//! Analytical queries over photos, disks and RAM.
//!
//! Every query is a single read-only statement. Intermediate sets are
//! composed with sub-selects and common table expressions, so reads never
//! leave schema objects behind.

use crate::error::{Result, StorageError};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::Analytics;
use rusqlite::{Connection, OptionalExtension, Params, params};

/// Maximum length of the ranked disk and photo lists.
pub const TOP_K: usize = 5;

/// Maximum length of each part of the close-photos result.
pub const CLOSE_PHOTOS_LIMIT: usize = 10;

/// Runs a query returning a single column of IDs.
fn query_ids<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(sql).map_err(StorageError::from)?;
    let ids = stmt
        .query_map(params, |row| row.get(0))
        .map_err(StorageError::from)?
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(StorageError::from)?;
    Ok(ids)
}

#[allow(clippy::cast_possible_wrap)]
impl Analytics for SqliteStorage {
    fn average_photos_size_on_disk(&self, disk_id: i64) -> Result<f64> {
        let average: f64 = self
            .conn
            .query_row(
                r#"
                SELECT COALESCE(AVG(p.disk_size_needed), 0.0)
                FROM "Photo" p
                INNER JOIN "PhotoInDisk" pid ON pid.photo_id = p.id
                WHERE pid.disk_id = ?1
                "#,
                params![disk_id],
                |row| row.get(0),
            )
            .map_err(StorageError::from)?;
        Ok(average)
    }

    fn get_total_ram_on_disk(&self, disk_id: i64) -> Result<i64> {
        // The view has no row for a disk that does not exist
        let total: Option<i64> = self
            .conn
            .query_row(
                r#"SELECT total_ram FROM "TotalRAMInDisk" WHERE disk_id = ?1"#,
                params![disk_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(total.unwrap_or(0))
    }

    fn get_cost_for_description(&self, description: &str) -> Result<i64> {
        let cost: i64 = self
            .conn
            .query_row(
                r#"
                SELECT COALESCE(SUM(d.cost_per_byte * p.disk_size_needed), 0)
                FROM "Disk" d
                INNER JOIN "PhotoInDisk" pid ON pid.disk_id = d.id
                INNER JOIN "Photo" p ON p.id = pid.photo_id
                WHERE p.description = ?1
                "#,
                params![description],
                |row| row.get(0),
            )
            .map_err(StorageError::from)?;
        Ok(cost)
    }

    fn get_photos_can_be_added_to_disk(&self, disk_id: i64) -> Result<Vec<i64>> {
        query_ids(
            &self.conn,
            r#"
            SELECT p.id
            FROM "Disk" d
            INNER JOIN "Photo" p ON p.disk_size_needed <= d.free_space
            WHERE d.id = ?1
            ORDER BY p.id DESC
            LIMIT ?2
            "#,
            params![disk_id, TOP_K as i64],
        )
    }

    fn get_photos_can_be_added_to_disk_and_ram(&self, disk_id: i64) -> Result<Vec<i64>> {
        query_ids(
            &self.conn,
            r#"
            SELECT p.id
            FROM "Disk" d
            INNER JOIN "TotalRAMInDisk" t ON t.disk_id = d.id
            INNER JOIN "Photo" p
                ON p.disk_size_needed <= d.free_space
               AND p.disk_size_needed <= t.total_ram
            WHERE d.id = ?1
            ORDER BY p.id ASC
            LIMIT ?2
            "#,
            params![disk_id, TOP_K as i64],
        )
    }

    fn is_company_exclusive(&self, disk_id: i64) -> Result<bool> {
        // Aggregating over zero rows still yields one row, which evaluates
        // to false for a disk that does not exist.
        let exclusive: Option<bool> = self
            .conn
            .query_row(
                r#"
                SELECT (COUNT(DISTINCT r.company) = 1
                        AND MIN(d.manufacturing_company) = MIN(r.company))
                    OR (COUNT(DISTINCT r.company) = 0
                        AND EXISTS (SELECT 1 FROM "Disk" WHERE id = ?1))
                FROM "Disk" d
                LEFT OUTER JOIN "RAMInDisk" rid ON rid.disk_id = d.id
                LEFT OUTER JOIN "RAM" r ON r.id = rid.ram_id
                WHERE d.id = ?1
                "#,
                params![disk_id],
                |row| row.get(0),
            )
            .map_err(StorageError::from)?;
        Ok(exclusive.unwrap_or(false))
    }

    fn is_disk_containing_at_least_num_exists(&self, description: &str, num: i64) -> Result<bool> {
        let exists: bool = self
            .conn
            .query_row(
                r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM "PhotoInDisk" pid
                    INNER JOIN "Photo" p ON p.id = pid.photo_id
                    WHERE p.description = ?1
                    GROUP BY pid.disk_id
                    HAVING COUNT(*) >= ?2
                )
                "#,
                params![description, num],
                |row| row.get(0),
            )
            .map_err(StorageError::from)?;
        Ok(exists)
    }

    fn get_disks_containing_the_most_data(&self) -> Result<Vec<i64>> {
        query_ids(
            &self.conn,
            r#"
            SELECT pid.disk_id
            FROM "PhotoInDisk" pid
            INNER JOIN "Photo" p ON p.id = pid.photo_id
            GROUP BY pid.disk_id
            ORDER BY SUM(p.disk_size_needed) DESC, pid.disk_id ASC
            LIMIT ?1
            "#,
            params![TOP_K as i64],
        )
    }

    fn get_conflicting_disks(&self) -> Result<Vec<i64>> {
        query_ids(
            &self.conn,
            r#"
            SELECT DISTINCT a.disk_id
            FROM "PhotoInDisk" a
            INNER JOIN "PhotoInDisk" b
                ON a.photo_id = b.photo_id AND a.disk_id <> b.disk_id
            ORDER BY a.disk_id ASC
            "#,
            [],
        )
    }

    fn most_available_disks(&self) -> Result<Vec<i64>> {
        query_ids(
            &self.conn,
            r#"
            SELECT disk_id
            FROM "DiskPhotoCounts"
            ORDER BY photo_count DESC, disk_speed DESC, disk_id ASC
            LIMIT ?1
            "#,
            params![TOP_K as i64],
        )
    }

    fn get_close_photos(&self, photo_id: i64) -> Result<Vec<i64>> {
        // At most one of the two parts is non-empty.
        query_ids(
            &self.conn,
            r#"
            WITH saved_on AS (
                SELECT disk_id FROM "PhotoInDisk" WHERE photo_id = ?1
            ),
            co_located AS (
                SELECT pid.photo_id AS id
                FROM "PhotoInDisk" pid
                WHERE pid.disk_id IN (SELECT disk_id FROM saved_on)
                  AND pid.photo_id <> ?1
                GROUP BY pid.photo_id
                HAVING COUNT(*) >= (SELECT COUNT(*) FROM saved_on) * 0.5
                ORDER BY pid.photo_id ASC
                LIMIT ?2
            ),
            unplaced AS (
                SELECT id
                FROM "Photo"
                WHERE NOT EXISTS (SELECT 1 FROM saved_on) AND id <> ?1
                ORDER BY id ASC
                LIMIT ?2
            )
            SELECT id FROM co_located
            UNION ALL
            SELECT id FROM unplaced
            ORDER BY id ASC
            "#,
            params![photo_id, CLOSE_PHOTOS_LIMIT as i64],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Disk, Photo, Ram};
    use crate::storage::traits::Storage;

    fn setup() -> SqliteStorage {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.create_schema().unwrap();
        storage
    }

    fn place(storage: &mut SqliteStorage, photo: &Photo, disk_id: i64) {
        assert!(storage.add_photo_to_disk(photo, disk_id).is_ok());
    }

    #[test]
    fn test_average_photos_size() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 1)).is_ok());
        assert!((storage.average_photos_size_on_disk(1).unwrap()).abs() < f64::EPSILON);

        let a = Photo::new(1, "a", 100);
        let b = Photo::new(2, "b", 201);
        assert!(storage.add_photo(&a).is_ok());
        assert!(storage.add_photo(&b).is_ok());
        place(&mut storage, &a, 1);
        place(&mut storage, &b, 1);

        let avg = storage.average_photos_size_on_disk(1).unwrap();
        assert!((avg - 150.5).abs() < f64::EPSILON);
        assert!((storage.average_photos_size_on_disk(99).unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_ram_on_disk() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 1)).is_ok());
        assert_eq!(storage.get_total_ram_on_disk(1).unwrap(), 0);
        assert_eq!(storage.get_total_ram_on_disk(42).unwrap(), 0);

        assert!(storage.add_ram(&Ram::new(1, 8, "A")).is_ok());
        assert!(storage.add_ram(&Ram::new(2, 16, "B")).is_ok());
        assert!(storage.add_ram_to_disk(1, 1).is_ok());
        assert!(storage.add_ram_to_disk(2, 1).is_ok());
        assert_eq!(storage.get_total_ram_on_disk(1).unwrap(), 24);
    }

    #[test]
    fn test_cost_for_description() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 2)).is_ok());
        assert!(storage.add_disk(&Disk::new(2, "B", 1, 1000, 5)).is_ok());
        let cat = Photo::new(1, "cat", 10);
        let dog = Photo::new(2, "dog", 7);
        assert!(storage.add_photo(&cat).is_ok());
        assert!(storage.add_photo(&dog).is_ok());
        place(&mut storage, &cat, 1);
        place(&mut storage, &cat, 2);
        place(&mut storage, &dog, 2);

        assert_eq!(storage.get_cost_for_description("cat").unwrap(), 2 * 10 + 5 * 10);
        assert_eq!(storage.get_cost_for_description("dog").unwrap(), 35);
        assert_eq!(storage.get_cost_for_description("bird").unwrap(), 0);
    }

    #[test]
    fn test_photos_can_be_added_to_disk() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 50, 1)).is_ok());
        for id in 1..=8 {
            assert!(storage.add_photo(&Photo::new(id, "p", id * 10)).is_ok());
        }

        // Sizes 10..=50 fit, highest IDs first
        assert_eq!(
            storage.get_photos_can_be_added_to_disk(1).unwrap(),
            vec![5, 4, 3, 2, 1]
        );
        assert!(storage.get_photos_can_be_added_to_disk(2).unwrap().is_empty());
    }

    #[test]
    fn test_photos_can_be_added_to_disk_and_ram() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 100, 1)).is_ok());
        for id in 1..=8 {
            assert!(storage.add_photo(&Photo::new(id, "p", id * 10)).is_ok());
        }

        // No RAM installed: nothing fits
        assert!(storage.get_photos_can_be_added_to_disk_and_ram(1).unwrap().is_empty());

        assert!(storage.add_ram(&Ram::new(1, 30, "A")).is_ok());
        assert!(storage.add_ram_to_disk(1, 1).is_ok());
        assert_eq!(
            storage.get_photos_can_be_added_to_disk_and_ram(1).unwrap(),
            vec![1, 2, 3]
        );

        assert!(storage.add_ram(&Ram::new(2, 500, "A")).is_ok());
        assert!(storage.add_ram_to_disk(2, 1).is_ok());
        assert_eq!(
            storage.get_photos_can_be_added_to_disk_and_ram(1).unwrap(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_company_exclusive() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 100, 1)).is_ok());
        assert!(storage.is_company_exclusive(1).unwrap());
        assert!(!storage.is_company_exclusive(2).unwrap());

        assert!(storage.add_ram(&Ram::new(1, 8, "A")).is_ok());
        assert!(storage.add_ram_to_disk(1, 1).is_ok());
        assert!(storage.is_company_exclusive(1).unwrap());

        assert!(storage.add_ram(&Ram::new(2, 8, "B")).is_ok());
        assert!(storage.add_ram_to_disk(2, 1).is_ok());
        assert!(!storage.is_company_exclusive(1).unwrap());
    }

    #[test]
    fn test_disk_containing_at_least_num() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 100, 1)).is_ok());
        assert!(storage.add_disk(&Disk::new(2, "A", 1, 100, 1)).is_ok());
        let photos = [Photo::new(1, "x", 1), Photo::new(2, "x", 1), Photo::new(3, "y", 1)];
        for photo in &photos {
            assert!(storage.add_photo(photo).is_ok());
        }
        place(&mut storage, &photos[0], 1);
        place(&mut storage, &photos[1], 2);
        place(&mut storage, &photos[2], 1);

        assert!(storage.is_disk_containing_at_least_num_exists("x", 1).unwrap());
        assert!(!storage.is_disk_containing_at_least_num_exists("x", 2).unwrap());

        place(&mut storage, &photos[1], 1);
        assert!(storage.is_disk_containing_at_least_num_exists("x", 2).unwrap());
        assert!(!storage.is_disk_containing_at_least_num_exists("z", 1).unwrap());
    }

    #[test]
    fn test_disks_containing_the_most_data() {
        let mut storage = setup();
        for id in 1..=7 {
            assert!(storage.add_disk(&Disk::new(id, "A", 1, 10_000, 1)).is_ok());
        }
        let small = Photo::new(1, "s", 10);
        let large = Photo::new(2, "l", 100);
        assert!(storage.add_photo(&small).is_ok());
        assert!(storage.add_photo(&large).is_ok());

        place(&mut storage, &small, 3);
        place(&mut storage, &large, 6);
        place(&mut storage, &small, 2);
        place(&mut storage, &large, 4);
        place(&mut storage, &small, 4);
        place(&mut storage, &small, 7);
        place(&mut storage, &small, 5);

        // 4 holds 110, 6 holds 100, the rest tie at 10 and break by ID
        assert_eq!(
            storage.get_disks_containing_the_most_data().unwrap(),
            vec![4, 6, 2, 3, 5]
        );
    }

    #[test]
    fn test_conflicting_disks() {
        let mut storage = setup();
        for id in 1..=3 {
            assert!(storage.add_disk(&Disk::new(id, "A", 1, 1000, 1)).is_ok());
        }
        let shared = Photo::new(5, "p", 1);
        let single = Photo::new(6, "p", 1);
        assert!(storage.add_photo(&shared).is_ok());
        assert!(storage.add_photo(&single).is_ok());
        assert!(storage.get_conflicting_disks().unwrap().is_empty());

        place(&mut storage, &shared, 3);
        place(&mut storage, &shared, 1);
        place(&mut storage, &single, 2);
        assert_eq!(storage.get_conflicting_disks().unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_most_available_disks() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 10, 5, 1)).is_ok());
        assert!(storage.add_disk(&Disk::new(2, "A", 20, 50, 1)).is_ok());
        assert!(storage.add_disk(&Disk::new(3, "A", 30, 50, 1)).is_ok());
        assert!(storage.add_disk(&Disk::new(4, "A", 30, 50, 1)).is_ok());
        assert!(storage.add_photo(&Photo::new(1, "p", 10)).is_ok());
        assert!(storage.add_photo(&Photo::new(2, "p", 40)).is_ok());

        // 2, 3, 4 fit both photos; 1 fits none. Ties by speed then ID.
        assert_eq!(storage.most_available_disks().unwrap(), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_most_available_disks_keeps_top_five() {
        let mut storage = setup();
        for id in 1..=8 {
            assert!(storage.add_disk(&Disk::new(id, "A", id, 100, 1)).is_ok());
        }
        // Disks 8 and 9 share the top speed
        assert!(storage.add_disk(&Disk::new(9, "A", 8, 100, 1)).is_ok());
        assert!(storage.add_photo(&Photo::new(1, "p", 10)).is_ok());
        assert!(storage.add_photo(&Photo::new(2, "p", 60)).is_ok());
        assert!(storage.add_photo_to_disk(&Photo::new(2, "p", 60), 1).is_ok());

        // Disk 1 now has 40 free and fits only photo 1
        let ranked = storage.most_available_disks().unwrap();
        assert_eq!(ranked.len(), TOP_K);
        assert_eq!(ranked, vec![8, 9, 7, 6, 5]);
    }

    #[test]
    fn test_close_photos_missing_photo() {
        let mut storage = setup();
        for id in 1..=3 {
            assert!(storage.add_photo(&Photo::new(id, "p", 1)).is_ok());
        }

        assert_eq!(storage.get_close_photos(99).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_close_photos_placed_is_capped() {
        let mut storage = setup();
        assert!(storage.add_disk(&Disk::new(1, "A", 1, 1000, 1)).is_ok());
        for id in 1..=15 {
            let photo = Photo::new(id, "p", 1);
            assert!(storage.add_photo(&photo).is_ok());
            place(&mut storage, &photo, 1);
        }

        let close = storage.get_close_photos(1).unwrap();
        assert_eq!(close.len(), CLOSE_PHOTOS_LIMIT);
        assert_eq!(close, (2..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_close_photos_odd_disk_count() {
        let mut storage = setup();
        for id in 1..=3 {
            assert!(storage.add_disk(&Disk::new(id, "A", 1, 1000, 1)).is_ok());
        }
        let target = Photo::new(1, "t", 1);
        let two_of_three = Photo::new(2, "a", 1);
        let one_of_three = Photo::new(3, "b", 1);
        for photo in [&target, &two_of_three, &one_of_three] {
            assert!(storage.add_photo(photo).is_ok());
        }
        for disk in 1..=3 {
            place(&mut storage, &target, disk);
        }
        place(&mut storage, &two_of_three, 1);
        place(&mut storage, &two_of_three, 2);
        place(&mut storage, &one_of_three, 3);

        assert_eq!(storage.get_close_photos(1).unwrap(), vec![2]);
    }

    #[test]
    fn test_close_photos_unplaced() {
        let mut storage = setup();
        for id in 1..=12 {
            assert!(storage.add_photo(&Photo::new(id, "p", 1)).is_ok());
        }

        let close = storage.get_close_photos(3).unwrap();
        assert_eq!(close.len(), CLOSE_PHOTOS_LIMIT);
        assert!(!close.contains(&3));
        assert_eq!(close, vec![1, 2, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_close_photos_placed() {
        let mut storage = setup();
        for id in 1..=4 {
            assert!(storage.add_disk(&Disk::new(id, "A", 1, 1000, 1)).is_ok());
        }
        let target = Photo::new(1, "t", 1);
        let half = Photo::new(2, "h", 1);
        let quarter = Photo::new(3, "q", 1);
        let none = Photo::new(4, "n", 1);
        let all = Photo::new(5, "a", 1);
        for photo in [&target, &half, &quarter, &none, &all] {
            assert!(storage.add_photo(photo).is_ok());
        }
        for disk in 1..=4 {
            place(&mut storage, &target, disk);
            place(&mut storage, &all, disk);
        }
        place(&mut storage, &half, 1);
        place(&mut storage, &half, 2);
        place(&mut storage, &quarter, 3);

        assert_eq!(storage.get_close_photos(1).unwrap(), vec![2, 5]);
    }
}
