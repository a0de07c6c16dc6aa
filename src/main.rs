//! Binary entry point for photodisk.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use photodisk::cli::output::{OutputFormat, format_error};
use photodisk::cli::{Cli, execute, init_tracing};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.format);

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    match execute(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                // Piping into `head` closes stdout early
                if let Err(e) = write!(io::stdout(), "{output}")
                    && e.kind() != io::ErrorKind::BrokenPipe
                {
                    eprintln!("Error writing to stdout: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let error_output = format_error(&e, format);
            match format {
                OutputFormat::Json => println!("{error_output}"),
                OutputFormat::Text => eprintln!("Error: {error_output}"),
            }
            ExitCode::FAILURE
        }
    }
}
