//! CLI argument definitions using clap
//!
//! Commands:
//! - gridquery query --config <path>
//! - gridquery explain --config <path> [--text]
//! - gridquery validate --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gridquery - server-side processing for data grids
#[derive(Parser, Debug)]
#[command(name = "gridquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one grid request against the configured records
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./gridquery.json")]
        config: PathBuf,

        /// Read the request from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Show the plan a grid request would run
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./gridquery.json")]
        config: PathBuf,

        /// Read the request from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print the human-readable plan instead of JSON
        #[arg(long)]
        text: bool,
    },

    /// Check a grid request without planning or executing it
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./gridquery.json")]
        config: PathBuf,

        /// Read the request from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
