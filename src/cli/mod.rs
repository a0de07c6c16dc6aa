//! CLI layer for photodisk.
//!
//! Provides the command-line interface using clap, with commands for the
//! schema lifecycle, entity and association management, and analytics.

pub mod commands;
pub mod logging;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use logging::init_tracing;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
