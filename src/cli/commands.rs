//! CLI command implementations.
//!
//! Each command opens the database, runs one storage or analytics call and
//! renders the outcome.

use crate::cli::output::{
    OutputFormat, format_disk, format_disk_list, format_photo, format_photo_list,
    format_query_result, format_ram, format_ram_list, format_return_value, format_status,
};
use crate::cli::parser::{Cli, Commands, DiskCommands, PhotoCommands, QueryCommands, RamCommands};
use crate::core::{Disk, Photo, Ram};
use crate::error::{CommandError, Result, StorageError};
use crate::storage::{Analytics, ReturnValue, SqliteStorage, Storage};
use std::path::Path;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails or a mutation is rejected with a
/// non-OK code.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, *force),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Clear { yes } => cmd_clear(&db_path, *yes),
        Commands::DropSchema { yes } => cmd_drop(&db_path, *yes),
        Commands::Photo(cmd) => cmd_photo(&db_path, cmd, format),
        Commands::Disk(cmd) => cmd_disk(&db_path, cmd, format),
        Commands::Ram(cmd) => cmd_ram(&db_path, cmd, format),
        Commands::AddDiskAndPhoto {
            disk_id,
            company,
            speed,
            free_space,
            cost_per_byte,
            photo_id,
            description,
            size,
        } => {
            let mut storage = open_storage(&db_path)?;
            let disk = Disk::new(*disk_id, company, *speed, *free_space, *cost_per_byte);
            let photo = Photo::new(*photo_id, description, *size);
            let rv = storage.add_disk_and_photo(&disk, &photo);
            report("add_disk_and_photo", rv, format)
        }
        Commands::Place { photo_id, disk_id } => {
            let mut storage = open_storage(&db_path)?;
            let rv = match storage.get_photo_by_id(*photo_id)? {
                Some(photo) => match storage.get_disk_by_id(*disk_id)? {
                    Some(disk) if !disk.can_fit(photo.size()) => {
                        tracing::debug!(
                            photo_id,
                            disk_id,
                            size = photo.size(),
                            free_space = disk.free_space,
                            "photo does not fit"
                        );
                        ReturnValue::BadParams
                    }
                    _ => storage.add_photo_to_disk(&photo, *disk_id),
                },
                None => ReturnValue::NotExists,
            };
            report("add_photo_to_disk", rv, format)
        }
        Commands::Unplace { photo_id, disk_id } => {
            let mut storage = open_storage(&db_path)?;
            let rv = match storage.get_photo_by_id(*photo_id)? {
                Some(photo) => storage.remove_photo_from_disk(&photo, *disk_id),
                None => ReturnValue::NotExists,
            };
            report("remove_photo_from_disk", rv, format)
        }
        Commands::Install { ram_id, disk_id } => {
            let mut storage = open_storage(&db_path)?;
            let rv = storage.add_ram_to_disk(*ram_id, *disk_id);
            report("add_ram_to_disk", rv, format)
        }
        Commands::Uninstall { ram_id, disk_id } => {
            let mut storage = open_storage(&db_path)?;
            let rv = storage.remove_ram_from_disk(*ram_id, *disk_id);
            report("remove_ram_from_disk", rv, format)
        }
        Commands::Query(query) => cmd_query(&db_path, query, format),
    }
}

/// Opens the database and checks that the schema exists.
fn open_storage(db_path: &Path) -> Result<SqliteStorage> {
    let storage = SqliteStorage::open(db_path)?;

    if !storage.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(storage)
}

/// Renders a mutation result, turning non-OK codes into an error.
fn report(operation: &str, rv: ReturnValue, format: OutputFormat) -> Result<String> {
    if rv.is_ok() {
        Ok(format_return_value(operation, rv, format))
    } else {
        tracing::debug!(operation, result = %rv, "mutation rejected");
        Err(CommandError::Rejected(rv.to_string()).into())
    }
}

fn cmd_init(db_path: &Path, force: bool) -> Result<String> {
    let mut storage = SqliteStorage::open(db_path)?;

    if storage.is_initialized()? {
        if !force {
            return Err(CommandError::ExecutionFailed(
                "Database already initialized. Use --force to recreate it.".to_string(),
            )
            .into());
        }
        storage.drop_schema()?;
    }

    storage.create_schema()?;

    Ok(format!(
        "Initialized photodisk database at: {}\n",
        db_path.display()
    ))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let stats = storage.stats()?;
    Ok(format_status(&stats, format))
}

fn cmd_clear(db_path: &Path, yes: bool) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm. This will delete all rows.".to_string(),
        )
        .into());
    }

    let mut storage = open_storage(db_path)?;
    storage.clear_schema()?;

    Ok("All rows deleted.\n".to_string())
}

fn cmd_drop(db_path: &Path, yes: bool) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm. This will drop all tables and views.".to_string(),
        )
        .into());
    }

    let mut storage = open_storage(db_path)?;
    storage.drop_schema()?;

    Ok("Schema dropped.\n".to_string())
}

fn cmd_photo(db_path: &Path, cmd: &PhotoCommands, format: OutputFormat) -> Result<String> {
    let mut storage = open_storage(db_path)?;

    match cmd {
        PhotoCommands::Add {
            id,
            description,
            size,
        } => {
            let rv = storage.add_photo(&Photo::new(*id, description, *size));
            report("add_photo", rv, format)
        }
        PhotoCommands::Get { id } => storage
            .get_photo_by_id(*id)?
            .map(|photo| format_photo(&photo, format))
            .ok_or_else(|| StorageError::PhotoNotFound { id: *id }.into()),
        PhotoCommands::Delete { id } => {
            let photo = storage
                .get_photo_by_id(*id)?
                .ok_or(StorageError::PhotoNotFound { id: *id })?;
            let rv = storage.delete_photo(&photo);
            report("delete_photo", rv, format)
        }
        PhotoCommands::List => Ok(format_photo_list(&storage.list_photos()?, format)),
    }
}

fn cmd_disk(db_path: &Path, cmd: &DiskCommands, format: OutputFormat) -> Result<String> {
    let mut storage = open_storage(db_path)?;

    match cmd {
        DiskCommands::Add {
            id,
            company,
            speed,
            free_space,
            cost_per_byte,
        } => {
            let disk = Disk::new(*id, company, *speed, *free_space, *cost_per_byte);
            report("add_disk", storage.add_disk(&disk), format)
        }
        DiskCommands::Get { id } => storage
            .get_disk_by_id(*id)?
            .map(|disk| format_disk(&disk, format))
            .ok_or_else(|| StorageError::DiskNotFound { id: *id }.into()),
        DiskCommands::Delete { id } => report("delete_disk", storage.delete_disk(*id), format),
        DiskCommands::List => Ok(format_disk_list(&storage.list_disks()?, format)),
    }
}

fn cmd_ram(db_path: &Path, cmd: &RamCommands, format: OutputFormat) -> Result<String> {
    let mut storage = open_storage(db_path)?;

    match cmd {
        RamCommands::Add { id, size, company } => {
            report("add_ram", storage.add_ram(&Ram::new(*id, *size, company)), format)
        }
        RamCommands::Get { id } => storage
            .get_ram_by_id(*id)?
            .map(|ram| format_ram(&ram, format))
            .ok_or_else(|| StorageError::RamNotFound { id: *id }.into()),
        RamCommands::Delete { id } => report("delete_ram", storage.delete_ram(*id), format),
        RamCommands::List => Ok(format_ram_list(&storage.list_rams()?, format)),
    }
}

fn cmd_query(db_path: &Path, query: &QueryCommands, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;

    let output = match query {
        QueryCommands::AverageSize { disk_id } => format_query_result(
            "average_photos_size_on_disk",
            &storage.average_photos_size_on_disk(*disk_id)?,
            format,
        ),
        QueryCommands::TotalRam { disk_id } => format_query_result(
            "total_ram_on_disk",
            &storage.get_total_ram_on_disk(*disk_id)?,
            format,
        ),
        QueryCommands::Cost { description } => format_query_result(
            "cost_for_description",
            &storage.get_cost_for_description(description)?,
            format,
        ),
        QueryCommands::Fits { disk_id } => format_query_result(
            "photos_can_be_added_to_disk",
            storage.get_photos_can_be_added_to_disk(*disk_id)?.as_slice(),
            format,
        ),
        QueryCommands::FitsWithRam { disk_id } => format_query_result(
            "photos_can_be_added_to_disk_and_ram",
            storage
                .get_photos_can_be_added_to_disk_and_ram(*disk_id)?
                .as_slice(),
            format,
        ),
        QueryCommands::Exclusive { disk_id } => format_query_result(
            "company_exclusive",
            &storage.is_company_exclusive(*disk_id)?,
            format,
        ),
        QueryCommands::AtLeast { description, num } => format_query_result(
            "disk_containing_at_least_num_exists",
            &storage.is_disk_containing_at_least_num_exists(description, *num)?,
            format,
        ),
        QueryCommands::MostData => format_query_result(
            "disks_containing_the_most_data",
            storage.get_disks_containing_the_most_data()?.as_slice(),
            format,
        ),
        QueryCommands::Conflicting => format_query_result(
            "conflicting_disks",
            storage.get_conflicting_disks()?.as_slice(),
            format,
        ),
        QueryCommands::MostAvailable => format_query_result(
            "most_available_disks",
            storage.most_available_disks()?.as_slice(),
            format,
        ),
        QueryCommands::Close { photo_id } => format_query_result(
            "close_photos",
            storage.get_close_photos(*photo_id)?.as_slice(),
            format,
        ),
    };

    Ok(output)
}
