#![deny(missing_docs)]

//! # Filesystem Document Source
//!
//! Loads external documents referenced through `file://` URIs. Other schemes
//! are rejected: no network access is performed.

use crate::document_io::read_document;
use apigw_core::{AppError, AppResult, DocumentSource};
use serde_json::Value;
use std::fs;
use std::path::Path;
use url::Url;

/// Reads referenced documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentSource;

impl DocumentSource for FsDocumentSource {
    fn load(&self, uri: &str) -> AppResult<Value> {
        let url = Url::parse(uri).map_err(|e| {
            AppError::invalid_spec(format!("Invalid external reference '{}': {}", uri, e))
        })?;
        if url.scheme() != "file" {
            return Err(AppError::invalid_spec(format!(
                "Remote reference '{}' is not fetched; only file references can be bundled",
                uri
            )));
        }
        let path = url.to_file_path().map_err(|_| {
            AppError::invalid_spec(format!("External reference '{}' is not a file path", uri))
        })?;

        tracing::debug!(path = %path.display(), "loading external document");
        read_document(&path).map_err(|e| {
            AppError::invalid_spec(format!("Failed to load external document '{}': {}", uri, e))
        })
    }
}

/// The `file://` URI of a document, used as the base for relative refs.
///
/// # Errors
///
/// Returns `AppError::Io` if the path cannot be canonicalized.
pub fn document_uri(path: &Path) -> AppResult<String> {
    let absolute = fs::canonicalize(path)?;
    Url::from_file_path(&absolute)
        .map(|u| u.to_string())
        .map_err(|_| AppError::General(format!("Cannot build a file URI for {:?}", absolute)))
}
