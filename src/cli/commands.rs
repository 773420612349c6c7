//! CLI command implementations
//!
//! Every command loads the config first, so a bad config fails before
//! any input is read. Records are loaded only by `query`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{check_request, GridHandler, Response};
use crate::executor::MemoryCollection;
use crate::observability::{Event, Logger, Severity};
use crate::planner::{ExplainPlan, FieldPolicy, SortPlacement, DEFAULT_PRIMARY_KEY};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_json, write_text};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding an array of record objects (required)
    pub data_path: String,

    /// Search allow-list (optional, default: columns flagged searchable)
    #[serde(default)]
    pub searchable: Option<Vec<String>>,

    /// Output allow-list (optional, default: every requested column)
    #[serde(default)]
    pub pluckable: Option<Vec<String>>,

    /// Primary key copied into DT_RowId (optional, default "id")
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// Sort placement (optional, default "after_slice")
    #[serde(default)]
    pub sort_placement: SortPlacement,

    /// Minimum log severity (optional, default "WARN")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}
fn default_log_level() -> String {
    Severity::Warn.as_str().to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_path.trim().is_empty() {
            return Err(CliError::config_error("data_path must not be empty"));
        }

        if self.primary_key.is_empty() {
            return Err(CliError::config_error("primary_key must not be empty"));
        }

        for (name, list) in [("searchable", &self.searchable), ("pluckable", &self.pluckable)] {
            if let Some(fields) = list {
                if fields.iter().any(|f| f.is_empty()) {
                    return Err(CliError::config_error(format!(
                        "{} must not contain empty field names",
                        name
                    )));
                }
            }
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse::<Severity>().map_err(|_| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be TRACE, INFO, WARN or ERROR.",
                self.log_level
            ))
        })
    }

    /// Records file path. Relative paths resolve against the config's directory.
    pub fn data_path(&self, config_path: &Path) -> PathBuf {
        let path = Path::new(&self.data_path);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match config_path.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Field policy described by this config
    pub fn to_policy(&self) -> FieldPolicy {
        let mut policy = FieldPolicy::new()
            .with_primary_key(self.primary_key.clone())
            .with_sort_placement(self.sort_placement);
        if let Some(fields) = &self.searchable {
            policy = policy.with_searchable(fields.clone());
        }
        if let Some(fields) = &self.pluckable {
            policy = policy.with_pluckable(fields.clone());
        }
        policy
    }
}

/// Main entry point for CLI.
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query { config, input } => query(&config, input.as_deref()),
        Command::Explain {
            config,
            input,
            text,
        } => explain(&config, input.as_deref(), text),
        Command::Validate { config, input } => validate(&config, input.as_deref()),
    }
}

/// Load config and apply its log level
fn setup(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let path = config_path.display().to_string();
    Logger::info(
        Event::ConfigLoaded.as_str(),
        &[
            ("path", path.as_str()),
            ("sort_placement", config.sort_placement.as_str()),
        ],
    );
    Ok(config)
}

/// Load the records file named by the config
pub fn load_records(config: &Config, config_path: &Path) -> CliResult<MemoryCollection> {
    let path = config.data_path(config_path);
    let records = MemoryCollection::from_path(&path)?;

    let display = path.display().to_string();
    let count = records.len().to_string();
    Logger::info(
        Event::RecordsLoaded.as_str(),
        &[("count", count.as_str()), ("path", display.as_str())],
    );
    Ok(records)
}

/// Run one grid request. Grid errors are written as responses.
pub fn query(config_path: &Path, input: Option<&Path>) -> CliResult<()> {
    let config = setup(config_path)?;
    let records = load_records(&config, config_path)?;
    let request = read_request(input)?;

    let response = query_response(&config, &records, &request);
    write_json(&response)
}

/// Response for one request against loaded records
pub fn query_response(config: &Config, records: &MemoryCollection, request: &Value) -> Response {
    let policy = config.to_policy();
    GridHandler::new(&policy, records).respond(request)
}

/// Show the plan for one request without loading records
pub fn explain(config_path: &Path, input: Option<&Path>, text: bool) -> CliResult<()> {
    let config = setup(config_path)?;
    let request = read_request(input)?;

    let plan = explain_plan(&config, &request);
    if text {
        write_text(&plan.to_string())
    } else {
        write_json(&plan)
    }
}

pub fn explain_plan(config: &Config, request: &Value) -> ExplainPlan {
    let policy = config.to_policy();
    let empty = MemoryCollection::default();
    GridHandler::new(&policy, &empty).explain(request)
}

/// Check one request against the validation rules only
pub fn validate(config_path: &Path, input: Option<&Path>) -> CliResult<()> {
    setup(config_path)?;
    let request = read_request(input)?;

    write_json(&validation_report(&request))
}

pub fn validation_report(request: &Value) -> Value {
    match check_request(request) {
        Ok(()) => json!({"valid": true}),
        Err(err) => json!({
            "valid": false,
            "code": err.code().code(),
            "field": err.field(),
            "message": err.message(),
        }),
    }
}
