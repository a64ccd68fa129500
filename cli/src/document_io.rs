#![deny(missing_docs)]

//! # Document I/O
//!
//! Reads and writes OpenAPI documents as JSON or YAML, chosen by file
//! extension (`.yaml` / `.yml` for YAML, anything else for JSON).

use apigw_core::{AppError, AppResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads a document from disk.
///
/// # Errors
///
/// Returns `AppError::Io` when the file cannot be read and
/// `AppError::General` when it cannot be parsed.
pub fn read_document(path: &Path) -> AppResult<Value> {
    let content = fs::read_to_string(path)?;
    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::General(format!("Failed to parse YAML {:?}: {}", path, e)))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| AppError::General(format!("Failed to parse JSON {:?}: {}", path, e)))
    }
}

/// Renders a document in the format implied by `path` (JSON when `None`).
///
/// # Errors
///
/// Returns `AppError::General` when serialization fails.
pub fn render_document(path: Option<&Path>, document: &Value) -> AppResult<String> {
    match path {
        Some(p) if is_yaml(p) => serde_yaml::to_string(document)
            .map_err(|e| AppError::General(format!("YAML serialization failed: {}", e))),
        _ => serde_json::to_string_pretty(document)
            .map_err(|e| AppError::General(format!("JSON serialization failed: {}", e))),
    }
}

/// Writes a document to `path`, or prints it to stdout when `path` is `None`.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns `AppError::General` when serialization or writing fails.
pub fn write_document(path: Option<&Path>, document: &Value) -> AppResult<()> {
    let output = render_document(path, document)?;

    let Some(out_path) = path else {
        println!("{}", output);
        return Ok(());
    };

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::General(format!("Failed to create output directory: {}", e))
            })?;
        }
    }
    fs::write(out_path, output)
        .map_err(|e| AppError::General(format!("Failed to write output file: {}", e)))?;
    Ok(())
}
