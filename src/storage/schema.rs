//! Database schema definitions.
//!
//! Contains the table and view DDL for the photodisk `SQLite` database plus
//! the statements used by the clear and drop lifecycle operations.

/// Current schema version, stored in `PRAGMA user_version`.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Base tables, in creation order (referenced tables first).
pub const TABLES: &[&str] = &["Photo", "Disk", "RAM", "PhotoInDisk", "RAMInDisk"];

/// Derived views.
pub const VIEWS: &[&str] = &["TotalRAMInDisk", "DiskPhotoCounts"];

/// SQL schema for database setup. Every statement is idempotent.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS "Photo" (
    id INTEGER NOT NULL PRIMARY KEY CHECK (id > 0),
    description TEXT NOT NULL,
    disk_size_needed INTEGER NOT NULL CHECK (disk_size_needed >= 0)
);

CREATE TABLE IF NOT EXISTS "Disk" (
    id INTEGER NOT NULL PRIMARY KEY CHECK (id > 0),
    manufacturing_company TEXT NOT NULL,
    speed INTEGER NOT NULL CHECK (speed > 0),
    free_space INTEGER NOT NULL CHECK (free_space >= 0),
    cost_per_byte INTEGER NOT NULL CHECK (cost_per_byte > 0)
);

CREATE TABLE IF NOT EXISTS "RAM" (
    id INTEGER NOT NULL PRIMARY KEY CHECK (id > 0),
    size INTEGER NOT NULL CHECK (size > 0),
    company TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS "PhotoInDisk" (
    photo_id INTEGER NOT NULL,
    disk_id INTEGER NOT NULL,
    PRIMARY KEY (photo_id, disk_id),
    FOREIGN KEY (photo_id) REFERENCES "Photo" (id) ON DELETE CASCADE,
    FOREIGN KEY (disk_id) REFERENCES "Disk" (id) ON DELETE CASCADE
);

-- Reverse lookup for per-disk aggregates
CREATE INDEX IF NOT EXISTS idx_photo_in_disk_disk ON "PhotoInDisk"(disk_id);

CREATE TABLE IF NOT EXISTS "RAMInDisk" (
    ram_id INTEGER NOT NULL,
    disk_id INTEGER NOT NULL,
    PRIMARY KEY (ram_id, disk_id),
    FOREIGN KEY (ram_id) REFERENCES "RAM" (id) ON DELETE CASCADE,
    FOREIGN KEY (disk_id) REFERENCES "Disk" (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_ram_in_disk_disk ON "RAMInDisk"(disk_id);

-- Total installed RAM per disk, 0 for disks without RAM
CREATE VIEW IF NOT EXISTS "TotalRAMInDisk" AS
SELECT "Disk".id AS disk_id, COALESCE(SUM("RAM".size), 0) AS total_ram
FROM "Disk"
LEFT OUTER JOIN "RAMInDisk" ON "Disk".id = "RAMInDisk".disk_id
LEFT OUTER JOIN "RAM" ON "RAM".id = "RAMInDisk".ram_id
GROUP BY "Disk".id;

-- Photos that would fit in each disk's current free space (not placements)
CREATE VIEW IF NOT EXISTS "DiskPhotoCounts" AS
SELECT "Disk".id AS disk_id,
       COUNT("Photo".id) AS photo_count,
       "Disk".speed AS disk_speed
FROM "Disk"
LEFT OUTER JOIN "Photo" ON "Disk".free_space >= "Photo".disk_size_needed
GROUP BY "Disk".id, "Disk".speed;
"#;

/// Deletes every row, association tables first.
pub const CLEAR_SQL: &str = r#"
DELETE FROM "PhotoInDisk";
DELETE FROM "RAMInDisk";
DELETE FROM "Photo";
DELETE FROM "Disk";
DELETE FROM "RAM";
"#;

/// Drops views before the tables they read and association tables before
/// the tables they reference.
pub const DROP_SQL: &str = r#"
DROP VIEW IF EXISTS "DiskPhotoCounts";
DROP VIEW IF EXISTS "TotalRAMInDisk";
DROP TABLE IF EXISTS "PhotoInDisk";
DROP TABLE IF EXISTS "RAMInDisk";
DROP TABLE IF EXISTS "Photo";
DROP TABLE IF EXISTS "Disk";
DROP TABLE IF EXISTS "RAM";
"#;

/// SQL to count how many of the tables and views exist.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE (type = 'table' AND name IN ('Photo', 'Disk', 'RAM', 'PhotoInDisk', 'RAMInDisk'))
   OR (type = 'view' AND name IN ('TotalRAMInDisk', 'DiskPhotoCounts'));
";

/// Number of schema objects `CHECK_SCHEMA_SQL` expects to find.
pub const SCHEMA_OBJECT_COUNT: usize = TABLES.len() + VIEWS.len();
