#![deny(missing_docs)]

//! # External Reference Bundling
//!
//! Inlines every `$ref` that points outside the root document so the
//! rewritten output is self-contained. Documents are obtained through a
//! `DocumentSource`; this module performs no I/O of its own.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::{parse_reference, resolve_document_uri, resolve_pointer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Supplies external documents by absolute (or registry) URI.
pub trait DocumentSource {
    /// Loads the document identified by `uri`.
    ///
    /// # Errors
    ///
    /// Implementations fail when the document is unknown or unreadable.
    fn load(&self, uri: &str) -> AppResult<Value>;
}

/// In-memory `DocumentSource` keyed by URI.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    docs: HashMap<String, Value>,
}

impl DocumentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document from a JSON value.
    pub fn register_json(&mut self, uri: &str, document: Value) {
        self.docs.insert(uri.to_string(), document);
    }

    /// Registers a document from YAML.
    ///
    /// # Errors
    ///
    /// Returns `AppError::General` when the YAML is malformed.
    pub fn register_yaml(&mut self, uri: &str, yaml: &str) -> AppResult<()> {
        let raw: Value = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::General(format!("Failed to parse YAML '{}': {}", uri, e)))?;
        self.register_json(uri, raw);
        Ok(())
    }

    /// Returns a registered document.
    pub fn get(&self, uri: &str) -> Option<&Value> {
        self.docs.get(uri)
    }
}

impl DocumentSource for DocumentRegistry {
    fn load(&self, uri: &str) -> AppResult<Value> {
        self.get(uri).cloned().ok_or_else(|| {
            AppError::invalid_spec(format!("External document '{}' is not available", uri))
        })
    }
}

/// Inlines external references.
///
/// Local references of the root document (`#/...`) are kept as they are.
/// Local references found inside an external document are resolved against
/// that document. Keys next to a `$ref` override keys of the resolved object.
///
/// # Arguments
///
/// * `document` - The validated root document.
/// * `base_uri` - URI of the root document, used to resolve relative refs.
/// * `source` - Supplier of external documents.
///
/// # Errors
///
/// Returns `AppError::InvalidSpecification` for unknown documents,
/// dangling fragments and circular external references.
pub fn bundle(
    document: Value,
    base_uri: Option<&str>,
    source: &dyn DocumentSource,
) -> AppResult<Value> {
    let mut bundler = Bundler {
        source,
        cache: HashMap::new(),
        stack: Vec::new(),
    };
    let mut document = document;
    bundler.inline(&mut document, base_uri, None)?;
    Ok(document)
}

struct Bundler<'a> {
    source: &'a dyn DocumentSource,
    cache: HashMap<String, Value>,
    stack: Vec<String>,
}

impl Bundler<'_> {
    /// `current` is the URI of the external document `node` belongs to,
    /// `None` while walking the root document.
    fn inline(&mut self, node: &mut Value, base: Option<&str>, current: Option<&str>) -> AppResult<()> {
        match node {
            Value::Object(map) => {
                let ref_str = map.get("$ref").and_then(Value::as_str).map(str::to_string);
                if let Some(ref_str) = ref_str {
                    let reference = parse_reference(&ref_str);
                    let target_doc = if reference.is_local() {
                        current.map(str::to_string)
                    } else {
                        Some(resolve_document_uri(reference.document, base))
                    };

                    if let Some(doc_uri) = target_doc {
                        map.remove("$ref");
                        let mut siblings = std::mem::take(map);
                        for value in siblings.values_mut() {
                            self.inline(value, base, current)?;
                        }
                        *node = self.resolve(&doc_uri, reference.fragment, siblings)?;
                        return Ok(());
                    }
                }

                for value in map.values_mut() {
                    self.inline(value, base, current)?;
                }
            }
            Value::Array(items) => {
                for value in items.iter_mut() {
                    self.inline(value, base, current)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        doc_uri: &str,
        fragment: Option<&str>,
        siblings: Map<String, Value>,
    ) -> AppResult<Value> {
        let key = format!("{}#{}", doc_uri, fragment.unwrap_or(""));
        if self.stack.contains(&key) {
            return Err(AppError::invalid_spec(format!(
                "Circular external reference '{}'",
                key
            )));
        }

        if !self.cache.contains_key(doc_uri) {
            let loaded = self.source.load(doc_uri)?;
            self.cache.insert(doc_uri.to_string(), loaded);
        }
        let mut resolved = self
            .cache
            .get(doc_uri)
            .and_then(|doc| resolve_pointer(doc, fragment))
            .cloned()
            .ok_or_else(|| AppError::invalid_spec(format!("Unresolvable reference '{}'", key)))?;

        self.stack.push(key);
        let result = self.inline(&mut resolved, Some(doc_uri), Some(doc_uri));
        let key = self.stack.pop();
        result?;

        tracing::debug!(reference = key.as_deref().unwrap_or_default(), "inlined external reference");

        if let Value::Object(target) = &mut resolved {
            target.extend(siblings);
        }
        Ok(resolved)
    }
}
