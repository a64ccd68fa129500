#![deny(missing_docs)]

//! # OpenAPI Validation
//!
//! The validator seam of the pipeline and a built-in structural validator
//! enforcing the root-level requirements of Swagger 2.0 and OpenAPI 3.x.
//!
//! Checks performed by `StructuralValidator`:
//! - Exactly one of `swagger` / `openapi`, with a supported version.
//! - `info` with non-empty `title` and `version`.
//! - `paths` present (OpenAPI 3.1+ also accepts `components` or `webhooks`).
//! - Path keys start with `/` unless they are extensions.
//! - Path items and operations are objects; operations define `responses`.
//! - `operationId` values and tag names are unique.

use crate::oas::document::HttpMethod;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Validates a raw document before any rewriting happens.
pub trait SpecValidator {
    /// Returns a description of the first violated constraint on failure.
    ///
    /// # Errors
    ///
    /// Returns the violation message when the document is rejected.
    fn validate(&self, document: &Value) -> Result<(), String>;
}

impl<F> SpecValidator for F
where
    F: Fn(&Value) -> Result<(), String>,
{
    fn validate(&self, document: &Value) -> Result<(), String> {
        self(document)
    }
}

/// Accepts every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SpecValidator for AcceptAll {
    fn validate(&self, _document: &Value) -> Result<(), String> {
        Ok(())
    }
}

/// Built-in structural validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl SpecValidator for StructuralValidator {
    fn validate(&self, document: &Value) -> Result<(), String> {
        let root = document
            .as_object()
            .ok_or_else(|| "OpenAPI document must be an object".to_string())?;

        let version = validate_version(root)?;
        validate_info(root)?;
        validate_paths_presence(root, version)?;
        validate_paths(root)?;
        validate_tags_unique(root)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecVersion {
    Swagger2,
    OpenApi30,
    OpenApi31Plus,
}

fn validate_version(root: &Map<String, Value>) -> Result<SpecVersion, String> {
    match (root.get("swagger"), root.get("openapi")) {
        (Some(_), Some(_)) => {
            Err("OpenAPI document cannot declare both 'swagger' and 'openapi'".into())
        }
        (None, None) => {
            Err("OpenAPI document missing required 'swagger' or 'openapi' version field".into())
        }
        (Some(swagger), None) => match swagger.as_str() {
            Some("2.0") => Ok(SpecVersion::Swagger2),
            _ => Err(format!("Unsupported swagger version {}", swagger)),
        },
        (None, Some(openapi)) => {
            let text = openapi
                .as_str()
                .ok_or_else(|| format!("'openapi' must be a string, found {}", openapi))?;
            parse_openapi_version(text)
                .ok_or_else(|| format!("Unsupported openapi version '{}'", text))
        }
    }
}

fn parse_openapi_version(text: &str) -> Option<SpecVersion> {
    let mut parts = text.split('.');
    let major = parts.next()?;
    let minor: u32 = parts.next()?.parse().ok()?;
    if let Some(patch) = parts.next() {
        // pre-release suffixes like `3.1.0-rc0` are tolerated
        let digits = patch.split('-').next()?;
        digits.parse::<u32>().ok()?;
    }
    if parts.next().is_some() || major != "3" {
        return None;
    }
    Some(if minor == 0 {
        SpecVersion::OpenApi30
    } else {
        SpecVersion::OpenApi31Plus
    })
}

fn validate_info(root: &Map<String, Value>) -> Result<(), String> {
    let info = root
        .get("info")
        .and_then(Value::as_object)
        .ok_or_else(|| "OpenAPI document missing required 'info' object".to_string())?;

    for field in ["title", "version"] {
        let ok = info
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !ok {
            return Err(format!("info.{} must be a non-empty string", field));
        }
    }
    Ok(())
}

fn validate_paths_presence(root: &Map<String, Value>, version: SpecVersion) -> Result<(), String> {
    match root.get("paths") {
        Some(Value::Object(_)) => Ok(()),
        Some(_) => Err("'paths' must be an object".into()),
        None if version == SpecVersion::OpenApi31Plus => {
            if root.contains_key("components") || root.contains_key("webhooks") {
                Ok(())
            } else {
                Err(
                    "OpenAPI document must define at least one of 'components', 'paths', or 'webhooks'"
                        .into(),
                )
            }
        }
        None => Err("OpenAPI document missing required 'paths' object".into()),
    }
}

fn validate_paths(root: &Map<String, Value>) -> Result<(), String> {
    let Some(paths) = root.get("paths").and_then(Value::as_object) else {
        return Ok(());
    };

    let mut operation_ids = HashSet::new();
    for (path, item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        if !path.starts_with('/') {
            return Err(format!("Path '{}' must begin with '/'", path));
        }
        let item = item
            .as_object()
            .ok_or_else(|| format!("paths.{}: path item must be an object", path))?;

        for (key, op) in item {
            if HttpMethod::from_key(key).is_none() {
                continue;
            }
            let context = format!("paths.{}.{}", path, key);
            let op = op
                .as_object()
                .ok_or_else(|| format!("{}: operation must be an object", context))?;

            if !op.get("responses").is_some_and(Value::is_object) {
                return Err(format!(
                    "{}: operation missing required 'responses' object",
                    context
                ));
            }

            if let Some(id) = op.get("operationId").and_then(Value::as_str) {
                if !operation_ids.insert(id.to_string()) {
                    return Err(format!(
                        "{}: duplicate operationId '{}' detected",
                        context, id
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_tags_unique(root: &Map<String, Value>) -> Result<(), String> {
    let Some(tags) = root.get("tags").and_then(Value::as_array) else {
        return Ok(());
    };

    let mut seen = HashSet::new();
    for name in tags.iter().filter_map(|t| t.get("name")).filter_map(Value::as_str) {
        if !seen.insert(name) {
            return Err(format!("Duplicate tag name '{}' detected", name));
        }
    }
    Ok(())
}
