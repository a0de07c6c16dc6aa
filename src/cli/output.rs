//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{Disk, Photo, Ram};
use crate::error::Error;
use crate::storage::{ReturnValue, StorageStats};
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StorageStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_status_text(stats: &StorageStats) -> String {
    let mut output = String::new();
    output.push_str("photodisk status\n");
    output.push_str("================\n\n");
    let _ = writeln!(output, "  Photos:        {}", stats.photo_count);
    let _ = writeln!(output, "  Disks:         {}", stats.disk_count);
    let _ = writeln!(output, "  RAM modules:   {}", stats.ram_count);
    let _ = writeln!(output, "  Placements:    {}", stats.placement_count);
    let _ = writeln!(output, "  RAM installs:  {}", stats.install_count);
    let _ = writeln!(output, "  Schema:        v{}", stats.schema_version);
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:       {size} bytes");
    }
    output
}

/// Formats the result code of a mutation.
#[must_use]
pub fn format_return_value(operation: &str, value: ReturnValue, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{operation}: {value}\n"),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct MutationOutput<'a> {
                operation: &'a str,
                result: ReturnValue,
            }
            format_json(&MutationOutput {
                operation,
                result: value,
            })
        }
    }
}

/// Formats a single photo.
#[must_use]
pub fn format_photo(photo: &Photo, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Photo {}", photo.id);
            let _ = writeln!(output, "  Description:  {}", photo.description);
            let _ = writeln!(output, "  Size:         {} bytes", photo.disk_size_needed);
            output
        }
        OutputFormat::Json => format_json(photo),
    }
}

/// Formats a single disk.
#[must_use]
pub fn format_disk(disk: &Disk, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Disk {}", disk.id);
            let _ = writeln!(output, "  Company:      {}", disk.manufacturing_company);
            let _ = writeln!(output, "  Speed:        {}", disk.speed);
            let _ = writeln!(output, "  Free space:   {} bytes", disk.free_space);
            let _ = writeln!(output, "  Cost/byte:    {}", disk.cost_per_byte);
            output
        }
        OutputFormat::Json => format_json(disk),
    }
}

/// Formats a single RAM module.
#[must_use]
pub fn format_ram(ram: &Ram, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "RAM {}", ram.id);
            let _ = writeln!(output, "  Size:         {}", ram.size);
            let _ = writeln!(output, "  Company:      {}", ram.company);
            output
        }
        OutputFormat::Json => format_json(ram),
    }
}

/// Formats a photo list.
#[must_use]
pub fn format_photo_list(photos: &[Photo], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if photos.is_empty() {
                return "No photos found.\n".to_string();
            }
            let mut output = String::new();
            let _ = writeln!(output, "{:<8} {:<12} Description", "ID", "Size");
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for photo in photos {
                let _ = writeln!(
                    output,
                    "{:<8} {:<12} {}",
                    photo.id,
                    photo.disk_size_needed,
                    truncate(&photo.description, 30)
                );
            }
            output
        }
        OutputFormat::Json => format_json(&photos),
    }
}

/// Formats a disk list.
#[must_use]
pub fn format_disk_list(disks: &[Disk], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if disks.is_empty() {
                return "No disks found.\n".to_string();
            }
            let mut output = String::new();
            let _ = writeln!(
                output,
                "{:<8} {:<20} {:<8} {:<12} Cost/byte",
                "ID", "Company", "Speed", "Free"
            );
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for disk in disks {
                let _ = writeln!(
                    output,
                    "{:<8} {:<20} {:<8} {:<12} {}",
                    disk.id,
                    truncate(&disk.manufacturing_company, 20),
                    disk.speed,
                    disk.free_space,
                    disk.cost_per_byte
                );
            }
            output
        }
        OutputFormat::Json => format_json(&disks),
    }
}

/// Formats a RAM list.
#[must_use]
pub fn format_ram_list(rams: &[Ram], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if rams.is_empty() {
                return "No RAM modules found.\n".to_string();
            }
            let mut output = String::new();
            let _ = writeln!(output, "{:<8} {:<8} Company", "ID", "Size");
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for ram in rams {
                let _ = writeln!(
                    output,
                    "{:<8} {:<8} {}",
                    ram.id,
                    ram.size,
                    truncate(&ram.company, 20)
                );
            }
            output
        }
        OutputFormat::Json => format_json(&rams),
    }
}

/// Formats the result of an analytical query.
#[must_use]
pub fn format_query_result<T>(query: &str, result: &T, format: OutputFormat) -> String
where
    T: Serialize + QueryText + ?Sized,
{
    match format {
        OutputFormat::Text => format!("{query}: {}\n", result.query_text()),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct QueryOutput<'a, T: Serialize + ?Sized> {
                query: &'a str,
                result: &'a T,
            }
            format_json(&QueryOutput { query, result })
        }
    }
}

/// Text rendering of a query result.
pub trait QueryText {
    /// Returns the human-readable form.
    fn query_text(&self) -> String;
}

impl QueryText for i64 {
    fn query_text(&self) -> String {
        self.to_string()
    }
}

impl QueryText for f64 {
    fn query_text(&self) -> String {
        format!("{self:.2}")
    }
}

impl QueryText for bool {
    fn query_text(&self) -> String {
        if *self { "yes" } else { "no" }.to_string()
    }
}

impl QueryText for [i64] {
    fn query_text(&self) -> String {
        if self.is_empty() {
            return "(none)".to_string();
        }
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({ "error": error.to_string() })),
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
