//! JSON I/O handling for CLI
//!
//! - Input: one JSON value from a file or stdin
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON value from `path`, or from stdin when `path` is `None`
pub fn read_input(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&serde_json::json!({
        "status": "ok",
        "data": data
    }))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str, details: Value) -> CliResult<()> {
    write_json(&serde_json::json!({
        "status": "error",
        "code": code,
        "message": message,
        "details": details
    }))
}

fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spec.json");
        fs::write(&path, r#"{"type": "button"}"#).unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), json!({"type": "button"}));
    }

    #[test]
    fn test_read_input_rejects_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spec.json");
        fs::write(&path, "  \n").unwrap();

        let err = read_input(Some(&path)).unwrap_err();
        assert_eq!(err.message(), "Empty input");
    }

    #[test]
    fn test_read_input_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spec.json");
        fs::write(&path, "{ nope").unwrap();

        assert!(read_input(Some(&path)).unwrap_err().message().contains("JSON error"));
    }
}
