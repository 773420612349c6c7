//! CLI module for gridquery
//!
//! Provides command-line interface for:
//! - query: Run one grid request against a records file
//! - explain: Show the plan for one grid request
//! - validate: Check one grid request

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    explain, explain_plan, load_records, query, query_response, run, run_command, validate,
    validation_report, Config,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_json, write_text};
