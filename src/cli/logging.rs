//! Tracing subscriber setup for the binary.
//!
//! `RUST_LOG` takes precedence; otherwise the level is `warn`, or `debug`
//! with `--verbose`. Logs go to stderr so stdout stays parseable.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`Error::Config`] if a subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| Error::Config {
            message: format!("failed to install tracing subscriber: {err}"),
        })
}
