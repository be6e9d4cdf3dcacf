//! medicctl - site health diagnostics CLI.
//!
//! Loads one site, runs the check catalog against it and prints the
//! report grouped by severity.

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use medicctl::cli::{Cli, Commands};
use medicctl::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let exit_code = match &cli.command {
        Commands::Check { json } => commands::execute_check_command(&cli.config, *json)?,
        Commands::Solution { id, json } => {
            commands::execute_solution_command(&cli.config, id, *json)?
        }
        Commands::List { json } => commands::execute_list_command(*json)?,
    };

    std::process::exit(exit_code);
}
