//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap. Keeps argument parsing separate
//! from execution logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Site health diagnostics CLI
#[derive(Parser)]
#[command(name = "medicctl")]
#[command(about = "Site health diagnostics for self-hosted learning platforms", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the site config file
    #[arg(long, global = true, default_value = "medic.toml")]
    pub config: PathBuf,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run every health check and print the report
    Check {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show the suggested fix for one check
    Solution {
        /// Check id, as shown in the report
        id: String,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// List every registered check
    List {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["medicctl", "check", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { json: true }));
        assert_eq!(cli.config, PathBuf::from("medic.toml"));
    }

    #[test]
    fn test_cli_parses_solution_with_config() {
        let cli = Cli::try_parse_from([
            "medicctl",
            "--config",
            "/srv/site/medic.toml",
            "solution",
            "course-category-tree",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/srv/site/medic.toml"));
        match cli.command {
            Commands::Solution { id, json } => {
                assert_eq!(id, "course-category-tree");
                assert!(!json);
            }
            _ => panic!("expected solution command"),
        }
    }
}
