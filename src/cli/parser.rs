//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// photodisk: manage disks, RAM modules and the photos stored on them.
#[derive(Parser, Debug)]
#[command(name = "photodisk")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file.
    ///
    /// Defaults to `.photodisk/photodisk.db` in the current directory.
    #[arg(short, long, env = "PHOTODISK_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database schema.
    ///
    /// Creates the database file, tables and views if they don't exist.
    Init {
        /// Drop the existing schema first (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Show row counts and schema version.
    Status,

    /// Delete all rows, keeping the schema.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Drop all tables and views.
    #[command(name = "drop")]
    DropSchema {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Photo operations.
    #[command(subcommand)]
    Photo(PhotoCommands),

    /// Disk operations.
    #[command(subcommand)]
    Disk(DiskCommands),

    /// RAM module operations.
    #[command(subcommand)]
    Ram(RamCommands),

    /// Add a disk and a photo together, or neither.
    AddDiskAndPhoto {
        /// Disk ID.
        disk_id: i64,
        /// Disk manufacturer.
        company: String,
        /// Disk speed.
        speed: i64,
        /// Disk free space in bytes.
        free_space: i64,
        /// Disk cost per byte.
        cost_per_byte: i64,
        /// Photo ID.
        photo_id: i64,
        /// Photo description.
        description: String,
        /// Photo size in bytes.
        size: i64,
    },

    /// Place a photo on a disk.
    Place {
        /// Photo ID.
        photo_id: i64,
        /// Disk ID.
        disk_id: i64,
    },

    /// Remove a photo from a disk.
    Unplace {
        /// Photo ID.
        photo_id: i64,
        /// Disk ID.
        disk_id: i64,
    },

    /// Install a RAM module in a disk.
    Install {
        /// RAM ID.
        ram_id: i64,
        /// Disk ID.
        disk_id: i64,
    },

    /// Uninstall a RAM module from a disk.
    Uninstall {
        /// RAM ID.
        ram_id: i64,
        /// Disk ID.
        disk_id: i64,
    },

    /// Run an analytical query.
    #[command(subcommand)]
    Query(QueryCommands),
}

/// Photo subcommands.
#[derive(Subcommand, Debug)]
pub enum PhotoCommands {
    /// Add a photo.
    Add {
        /// Photo ID (positive).
        id: i64,
        /// Description.
        description: String,
        /// Size needed on disk in bytes.
        size: i64,
    },
    /// Show a photo.
    Get {
        /// Photo ID.
        id: i64,
    },
    /// Delete a photo, giving its space back to every disk holding it.
    #[command(alias = "rm")]
    Delete {
        /// Photo ID.
        id: i64,
    },
    /// List all photos.
    #[command(alias = "ls")]
    List,
}

/// Disk subcommands.
#[derive(Subcommand, Debug)]
pub enum DiskCommands {
    /// Add a disk.
    Add {
        /// Disk ID (positive).
        id: i64,
        /// Manufacturer.
        company: String,
        /// Speed (positive).
        speed: i64,
        /// Free space in bytes.
        free_space: i64,
        /// Cost per byte (positive).
        cost_per_byte: i64,
    },
    /// Show a disk.
    Get {
        /// Disk ID.
        id: i64,
    },
    /// Delete a disk with its placements and installs.
    #[command(alias = "rm")]
    Delete {
        /// Disk ID.
        id: i64,
    },
    /// List all disks.
    #[command(alias = "ls")]
    List,
}

/// RAM subcommands.
#[derive(Subcommand, Debug)]
pub enum RamCommands {
    /// Add a RAM module.
    Add {
        /// RAM ID (positive).
        id: i64,
        /// Size (positive).
        size: i64,
        /// Company.
        company: String,
    },
    /// Show a RAM module.
    Get {
        /// RAM ID.
        id: i64,
    },
    /// Delete a RAM module.
    #[command(alias = "rm")]
    Delete {
        /// RAM ID.
        id: i64,
    },
    /// List all RAM modules.
    #[command(alias = "ls")]
    List,
}

/// Analytical queries.
#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Average size of the photos on a disk.
    AverageSize {
        /// Disk ID.
        disk_id: i64,
    },
    /// Total RAM installed in a disk.
    TotalRam {
        /// Disk ID.
        disk_id: i64,
    },
    /// Storage cost of all placements of photos with a description.
    Cost {
        /// Photo description.
        description: String,
    },
    /// Photos that fit a disk's free space.
    Fits {
        /// Disk ID.
        disk_id: i64,
    },
    /// Photos that fit both a disk's free space and its RAM.
    FitsWithRam {
        /// Disk ID.
        disk_id: i64,
    },
    /// Whether all RAM in a disk is from the disk's manufacturer.
    Exclusive {
        /// Disk ID.
        disk_id: i64,
    },
    /// Whether a disk holds at least `num` photos with a description.
    AtLeast {
        /// Photo description.
        description: String,
        /// Minimum number of photos.
        num: i64,
    },
    /// Disks holding the most photo data.
    MostData,
    /// Disks sharing photos with other disks.
    Conflicting,
    /// Disks with room for the most photos.
    MostAvailable,
    /// Photos stored close to a photo.
    Close {
        /// Photo ID.
        photo_id: i64,
    },
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}
