//! CLI command implementations

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::components;
use crate::observability::{self, Event};
use crate::schema::{SchemaError, SchemaRegistry};
use crate::split::{self, MemoryUniverse, NodeId};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of schema definition files (required)
    pub schema_dir: String,

    /// Log filter used when RUST_LOG is unset (optional, default "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
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
        if self.schema_dir.trim().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }
        if self.log_filter.trim().is_empty() {
            return Err(CliError::config_error("log_filter must not be empty"));
        }
        Ok(())
    }

    /// Get schema directory as Path
    pub fn schema_path(&self) -> &Path {
        Path::new(&self.schema_dir)
    }
}

/// Main CLI entry point
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
        Command::Validate {
            config,
            schema,
            input,
        } => validate(config.as_deref(), &schema, input.as_deref()),
        Command::Schemas { config } => schemas(config.as_deref()),
        Command::Split {
            text,
            at,
            start,
            end,
        } => {
            start_logging(None)?;
            let mode = SplitMode::from_args(at, start, end)?;
            write_response(split_report(&text, mode)?)
        }
    }
}

/// Validate one spec and print the normalized value or the field errors
pub fn validate(config_path: Option<&Path>, schema: &str, input: Option<&Path>) -> CliResult<()> {
    let registry = boot(config_path)?;
    let spec = read_input(input)?;

    match registry.validate(schema, &spec) {
        Ok(normalized) => write_response(normalized),
        Err(err) => {
            write_error(err.code().code(), err.message(), details_json(&err))?;
            Err(err.into())
        }
    }
}

/// Print every registered schema name
pub fn schemas(config_path: Option<&Path>) -> CliResult<()> {
    let registry = boot(config_path)?;
    write_response(json!(registry.names()))
}

/// Loads config (if any), installs logging and builds the registry.
fn boot(config_path: Option<&Path>) -> CliResult<SchemaRegistry> {
    let config = config_path.map(Config::load).transpose()?;
    start_logging(config.as_ref())?;

    if let Some(path) = config_path {
        observability::log_event(Event::ConfigLoaded, &path.display().to_string());
    }

    build_registry(config.as_ref())
}

fn start_logging(config: Option<&Config>) -> CliResult<()> {
    let filter = config.map_or("warn", |c| c.log_filter.as_str());
    observability::init_logging(filter)
        .map_err(|e| CliError::config_error(format!("{}: {}", e.code(), e)))
}

/// Built-in component schemas plus the configured definition directory.
pub fn build_registry(config: Option<&Config>) -> CliResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    components::register_builtins(&mut registry)?;

    if let Some(config) = config {
        registry.load_dir(config.schema_path())?;
    }

    Ok(registry)
}

fn details_json(err: &SchemaError) -> Value {
    Value::Array(
        err.details()
            .iter()
            .map(|d| {
                json!({
                    "field": d.field,
                    "expected": d.expected,
                    "actual": d.actual,
                })
            })
            .collect(),
    )
}

/// What the split command should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// `split` at one position
    At(usize),
    /// `split_by_pair` over a range
    Range(usize, usize),
}

impl SplitMode {
    fn from_args(at: Option<usize>, start: Option<usize>, end: Option<usize>) -> CliResult<Self> {
        match (at, start, end) {
            (Some(at), None, None) => Ok(SplitMode::At(at)),
            (None, Some(start), Some(end)) => Ok(SplitMode::Range(start, end)),
            _ => Err(CliError::usage_error("pass either --at or both --start and --end")),
        }
    }
}

/// Splits a one-paragraph document and describes the result.
pub fn split_report(text: &str, mode: SplitMode) -> CliResult<Value> {
    let (mut universe, node) = MemoryUniverse::with_paragraph(text);
    let text_of = |universe: &MemoryUniverse, node: Option<NodeId>| {
        node.and_then(|n| universe.text_of(n).map(str::to_string))
    };

    let mut report = match mode {
        SplitMode::At(position) => {
            let result = split::split(&mut universe, &node, position)?;
            json!({
                "before": text_of(&universe, result.before),
                "after": text_of(&universe, result.after),
            })
        }
        SplitMode::Range(start, end) => {
            let middle = split::split_by_pair(&mut universe, &node, start, end)?;
            json!({ "middle": text_of(&universe, Some(middle)) })
        }
    };

    let siblings = universe
        .parent(node)
        .map(|p| universe.child_texts(p))
        .unwrap_or_default();

    report["texts"] = json!(siblings);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("editkit.json");
        fs::write(&path, r#"{"schema_dir": "./schemas"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.schema_path(), Path::new("./schemas"));
    }

    #[test]
    fn test_config_requires_schema_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("editkit.json");
        fs::write(&path, r#"{"log_filter": "debug"}"#).unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(&path, r#"{"schema_dir": "  "}"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.message().contains("schema_dir"));
    }

    #[test]
    fn test_build_registry_merges_builtins_and_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("toggle.json"),
            r#"{"name": "toggle", "schema": {"type": "obj_of", "fields": [
                {"key": "active", "presence": {"defaulted": false}, "schema": {"type": "boolean"}}
            ]}}"#,
        )
        .unwrap();
        let config = Config {
            schema_dir: dir.path().display().to_string(),
            log_filter: default_log_filter(),
        };

        let registry = build_registry(Some(&config)).unwrap();
        assert!(registry.contains("button"));
        assert!(registry.contains("toggle"));
        assert_eq!(
            registry.validate("toggle", &json!({})).unwrap(),
            json!({"active": false})
        );
    }

    #[test]
    fn test_builtin_name_clash_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("button.json"),
            r#"{"name": "button", "schema": {"type": "any"}}"#,
        )
        .unwrap();
        let config = Config {
            schema_dir: dir.path().display().to_string(),
            log_filter: default_log_filter(),
        };

        let err = build_registry(Some(&config)).unwrap_err();
        assert!(err.message().contains("EK_SCHEMA_DUPLICATE"));
    }

    #[test]
    fn test_split_report_at() {
        let report = split_report("hello world", SplitMode::At(5)).unwrap();
        assert_eq!(report["before"], json!("hello"));
        assert_eq!(report["after"], json!(" world"));
        assert_eq!(report["texts"], json!(["hello", " world"]));
    }

    #[test]
    fn test_split_report_at_end() {
        let report = split_report("abc", SplitMode::At(3)).unwrap();
        assert_eq!(report["after"], Value::Null);
        assert_eq!(report["texts"], json!(["abc"]));
    }

    #[test]
    fn test_split_report_range() {
        let report = split_report("hello world", SplitMode::Range(2, 5)).unwrap();
        assert_eq!(report["middle"], json!("llo"));
        assert_eq!(report["texts"], json!(["he", "llo", " world"]));
    }

    #[test]
    fn test_split_report_rejects_bad_offset() {
        let err = split_report("abc", SplitMode::At(10)).unwrap_err();
        assert_eq!(err.code_str(), "EK_CLI_SPLIT_ERROR");
    }

    #[test]
    fn test_split_mode_from_args() {
        assert_eq!(SplitMode::from_args(Some(1), None, None).unwrap(), SplitMode::At(1));
        assert_eq!(
            SplitMode::from_args(None, Some(1), Some(3)).unwrap(),
            SplitMode::Range(1, 3)
        );
        assert!(SplitMode::from_args(None, None, None).is_err());
    }

    #[test]
    fn test_details_json() {
        let registry = build_registry(None).unwrap();
        let err = registry.validate("button", &json!({})).unwrap_err();
        let details = details_json(&err);
        assert_eq!(details[0]["field"], json!("type"));
        assert_eq!(details[1]["field"], json!("text"));
    }
}
