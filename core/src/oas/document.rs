#![deny(missing_docs)]

//! # Document Model
//!
//! A view over a Swagger 2.0 / OpenAPI 3.x document that gives structure
//! only to the parts the rewriter walks: `paths`, path items and operations.
//! Each level is one ordered map, so fields come back in input order and
//! every value the rewriter does not write (explicit `null`s included) is
//! serialized back untouched.

use crate::error::{AppError, AppResult};
use crate::gateway::integration::Integration;
use crate::gateway::validators::{GatewayResponse, RequestValidator};
use crate::gateway::INTEGRATION_KEY;
use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// HTTP verbs that may key an operation inside a Path Item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `put`
    Put,
    /// `post`
    Post,
    /// `delete`
    Delete,
    /// `options` (reserved for the CORS preflight)
    Options,
    /// `head`
    Head,
    /// `patch`
    Patch,
    /// `trace`
    Trace,
}

impl HttpMethod {
    /// All verbs, in Path Item field order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lowercase key as it appears in the document.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// Upper-cased method token forwarded to the backend.
    pub fn as_upper(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Matches a Path Item key. Keys are case sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == key)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A root-level field.
///
/// Everything read from the input stays `Raw` except `paths`. The typed
/// variants only appear when the rewriter writes a gateway block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RootField {
    /// The Paths Object.
    Paths(Paths),
    /// `x-amazon-apigateway-request-validators` as written by the rewriter.
    RequestValidators(IndexMap<String, RequestValidator>),
    /// `x-amazon-apigateway-gateway-responses` as written by the rewriter.
    GatewayResponses(IndexMap<String, GatewayResponse>),
    /// Any other value, serialized back verbatim.
    Raw(Value),
}

/// Root document: one ordered map of fields, so output keeps input key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApiDocument {
    fields: IndexMap<String, RootField>,
}

impl ApiDocument {
    /// Reads a validated document into the model.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidSpecification` if `paths`, a path item or an
    /// operation is not an object.
    pub fn from_value(value: Value) -> AppResult<Self> {
        serde_json::from_value(value).map_err(AppError::invalid_spec)
    }

    /// Serializes the document back into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::General` if serialization fails.
    pub fn to_value(&self) -> AppResult<Value> {
        serde_json::to_value(self)
            .map_err(|e| AppError::General(format!("JSON serialization failed: {}", e)))
    }

    /// A root field by key.
    pub fn get(&self, key: &str) -> Option<&RootField> {
        self.fields.get(key)
    }

    /// Sets a root field. An existing key keeps its position; a new one is
    /// appended.
    pub fn insert(&mut self, key: &str, field: RootField) {
        self.fields.insert(key.to_string(), field);
    }

    /// The Paths Object, if present.
    pub fn paths(&self) -> Option<&Paths> {
        match self.fields.get("paths") {
            Some(RootField::Paths(paths)) => Some(paths),
            _ => None,
        }
    }

    /// Mutable access to the Paths Object.
    pub fn paths_mut(&mut self) -> Option<&mut Paths> {
        match self.fields.get_mut("paths") {
            Some(RootField::Paths(paths)) => Some(paths),
            _ => None,
        }
    }

    /// Number of operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths()
            .map(|p| p.items().map(|(_, item)| item.operation_count()).sum())
            .unwrap_or(0)
    }
}

impl<'de> Deserialize<'de> for ApiDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut fields = IndexMap::with_capacity(raw.len());

        for (key, value) in raw {
            let field = if key == "paths" {
                let paths = serde_json::from_value::<Paths>(value).map_err(|e| {
                    DeError::custom(format!("Failed to parse paths: {}", e))
                })?;
                RootField::Paths(paths)
            } else {
                RootField::Raw(value)
            };
            fields.insert(key, field);
        }

        Ok(Self { fields })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum PathsEntry {
    Item(PathItem),
    Raw(Value),
}

/// The Paths Object: path items and `x-` extensions in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Paths {
    entries: IndexMap<String, PathsEntry>,
}

impl Paths {
    /// Path items keyed by path template.
    pub fn items(&self) -> impl Iterator<Item = (&str, &PathItem)> + '_ {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            PathsEntry::Item(item) => Some((key.as_str(), item)),
            PathsEntry::Raw(_) => None,
        })
    }

    /// Mutable path items keyed by path template.
    pub fn items_mut(&mut self) -> impl Iterator<Item = (&str, &mut PathItem)> + '_ {
        self.entries.iter_mut().filter_map(|(key, entry)| match entry {
            PathsEntry::Item(item) => Some((key.as_str(), item)),
            PathsEntry::Raw(_) => None,
        })
    }

    /// The path item for a path template.
    pub fn item(&self, path: &str) -> Option<&PathItem> {
        match self.entries.get(path) {
            Some(PathsEntry::Item(item)) => Some(item),
            _ => None,
        }
    }

    /// A specification extension (`x-...`) on the Paths Object.
    pub fn extension(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(PathsEntry::Raw(value)) => Some(value),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut entries = IndexMap::with_capacity(raw.len());

        for (key, value) in raw {
            if key.starts_with("x-") {
                entries.insert(key, PathsEntry::Raw(value));
                continue;
            }
            let path_item = serde_json::from_value::<PathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            entries.insert(key, PathsEntry::Item(path_item));
        }

        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum PathItemEntry {
    Operation(Operation),
    Raw(Value),
}

/// A Path Item: operations under verb keys, every other field kept raw
/// (`parameters`, `summary`, `servers`, `$ref`, `x-...`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PathItem {
    entries: IndexMap<String, PathItemEntry>,
}

impl PathItem {
    /// Operations in document order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> + '_ {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            PathItemEntry::Operation(op) => HttpMethod::from_key(key).map(|m| (m, op)),
            PathItemEntry::Raw(_) => None,
        })
    }

    /// Mutable operations in document order.
    pub fn operations_mut(&mut self) -> impl Iterator<Item = (HttpMethod, &mut Operation)> + '_ {
        self.entries.iter_mut().filter_map(|(key, entry)| match entry {
            PathItemEntry::Operation(op) => HttpMethod::from_key(key).map(|m| (m, op)),
            PathItemEntry::Raw(_) => None,
        })
    }

    /// The operation under a verb.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match self.entries.get(method.as_str()) {
            Some(PathItemEntry::Operation(op)) => Some(op),
            _ => None,
        }
    }

    /// Number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations().count()
    }

    /// Stores an operation under a verb, keeping the position of a replaced
    /// entry.
    ///
    /// Returns true when an operation was replaced.
    pub fn insert_operation(&mut self, method: HttpMethod, operation: Operation) -> bool {
        self.entries
            .insert(method.as_str().to_string(), PathItemEntry::Operation(operation))
            .is_some()
    }

    /// A non-verb field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(PathItemEntry::Raw(value)) => Some(value),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut entries = IndexMap::with_capacity(raw.len());

        for (key, value) in raw {
            let entry = if HttpMethod::from_key(&key).is_some() {
                let op = serde_json::from_value::<Operation>(value).map_err(|e| {
                    DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
                })?;
                PathItemEntry::Operation(op)
            } else {
                PathItemEntry::Raw(value)
            };
            entries.insert(key, entry);
        }

        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum OperationField {
    Integration(Integration),
    Raw(Value),
}

/// An Operation Object.
///
/// Fields are kept raw in document order; only an integration attached by
/// the rewriter is typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Operation {
    fields: IndexMap<String, OperationField>,
}

impl Operation {
    /// A raw field. Integrations attached by the rewriter are not returned
    /// here, see [`Operation::integration`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.fields.get(key) {
            Some(OperationField::Raw(value)) => Some(value),
            _ => None,
        }
    }

    /// True when the field is present, raw or typed.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Sets a raw field. An existing key keeps its position.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), OperationField::Raw(value));
    }

    /// The raw `produces` value, if declared (Swagger 2.0).
    pub fn produces(&self) -> Option<&Value> {
        self.get("produces")
    }

    /// The integration attached by the rewriter.
    pub fn integration(&self) -> Option<&Integration> {
        match self.fields.get(INTEGRATION_KEY) {
            Some(OperationField::Integration(integration)) => Some(integration),
            _ => None,
        }
    }

    /// Stores the integration, replacing any existing one in place.
    pub fn set_integration(&mut self, integration: Integration) {
        self.fields.insert(
            INTEGRATION_KEY.to_string(),
            OperationField::Integration(integration),
        );
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            fields: raw
                .into_iter()
                .map(|(key, value)| (key, OperationField::Raw(value)))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_keys() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("options"), Some(HttpMethod::Options));
        assert_eq!(HttpMethod::from_key("GET"), None);
        assert_eq!(HttpMethod::from_key("parameters"), None);
        assert_eq!(HttpMethod::Patch.as_upper(), "PATCH");
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let raw = json!({
            "swagger": "2.0",
            "info": { "title": "T", "version": "1" },
            "host": "example.com",
            "paths": {
                "/pets/{id}": {
                    "parameters": [{ "name": "id", "in": "path", "required": true, "type": "string" }],
                    "get": {
                        "operationId": "getPet",
                        "produces": "application/json",
                        "responses": { "200": { "description": "OK" } },
                        "x-custom": 1
                    }
                },
                "x-paths-ext": true
            },
            "definitions": { "Pet": { "type": "object" } },
            "x-amazon-apigateway-request-validators": "not-a-map"
        });

        let doc = ApiDocument::from_value(raw.clone()).unwrap();
        assert_eq!(doc.to_value().unwrap(), raw);
    }

    #[test]
    fn test_key_order_is_kept() {
        let raw = json!({
            "paths": {
                "/a": {
                    "get": { "responses": {} },
                    "parameters": [],
                    "post": { "responses": {} }
                }
            },
            "swagger": "2.0",
            "info": { "title": "T", "version": "1" }
        });
        let out = ApiDocument::from_value(raw.clone()).unwrap().to_value().unwrap();

        let root: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(root, vec!["paths", "swagger", "info"]);
        let item: Vec<&String> = out["paths"]["/a"].as_object().unwrap().keys().collect();
        assert_eq!(item, vec!["get", "parameters", "post"]);
    }

    #[test]
    fn test_null_fields_survive() {
        let raw = json!({
            "swagger": null,
            "paths": {
                "/a": {
                    "summary": null,
                    "get": { "summary": null, "produces": null, "tags": null, "responses": {} }
                }
            }
        });
        let doc = ApiDocument::from_value(raw.clone()).unwrap();
        let op = doc.paths().unwrap().item("/a").unwrap().operation(HttpMethod::Get).unwrap();
        assert!(op.contains_key("summary"));
        assert_eq!(op.produces(), Some(&Value::Null));
        assert_eq!(doc.to_value().unwrap(), raw);
    }

    #[test]
    fn test_unmodelled_field_types_are_not_checked() {
        let raw = json!({
            "paths": {
                "/a": { "get": { "summary": 5, "tags": [1], "description": {}, "responses": {} } }
            }
        });
        let doc = ApiDocument::from_value(raw.clone()).unwrap();
        assert_eq!(doc.to_value().unwrap(), raw);
    }

    #[test]
    fn test_existing_gateway_blocks_stay_raw() {
        let raw = json!({
            "x-amazon-apigateway-request-validators": {
                "body": { "validateRequestBody": true, "validateRequestParameters": false, "x-note": "kept" }
            },
            "x-amazon-apigateway-gateway-responses": {
                "UNAUTHORIZED": {
                    "statusCode": 401,
                    "responseParameters": { "gatewayresponse.header.WWW-Authenticate": "'Bearer'" }
                }
            },
            "paths": {}
        });
        let doc = ApiDocument::from_value(raw.clone()).unwrap();
        assert!(matches!(
            doc.get("x-amazon-apigateway-gateway-responses"),
            Some(RootField::Raw(_))
        ));
        assert_eq!(doc.to_value().unwrap(), raw);
    }

    #[test]
    fn test_non_verb_keys_are_not_operations() {
        let item: PathItem = serde_json::from_value(json!({
            "summary": "s",
            "parameters": [],
            "post": { "responses": {} }
        }))
        .unwrap();
        assert_eq!(item.operation_count(), 1);
        assert!(item.operation(HttpMethod::Post).is_some());
        assert_eq!(item.field("summary"), Some(&json!("s")));
        assert_eq!(item.field("parameters"), Some(&json!([])));
    }

    #[test]
    fn test_paths_extensions_are_not_paths() {
        let paths: Paths = serde_json::from_value(json!({
            "/a": { "get": {} },
            "x-note": "hi"
        }))
        .unwrap();
        assert_eq!(paths.items().count(), 1);
        assert_eq!(paths.extension("x-note"), Some(&json!("hi")));
    }

    #[test]
    fn test_non_object_operation_is_invalid_spec() {
        let err = ApiDocument::from_value(json!({
            "paths": { "/a": { "get": "nope" } }
        }))
        .unwrap_err();
        match err {
            AppError::InvalidSpecification(msg) => {
                assert!(msg.contains("/a"));
                assert!(msg.contains("get"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_existing_integration_is_raw_until_replaced() {
        let mut op: Operation = serde_json::from_value(json!({
            "x-amazon-apigateway-integration": { "type": "something-else" },
            "responses": {}
        }))
        .unwrap();
        assert!(op.integration().is_none());
        assert!(op.get(INTEGRATION_KEY).is_some());

        op.set_integration(crate::gateway::http_proxy_integration(HttpMethod::Get, "/a", None));
        assert!(op.integration().is_some());
        let keys: Vec<String> = serde_json::to_value(&op)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec![INTEGRATION_KEY.to_string(), "responses".to_string()]);
    }

    #[test]
    fn test_operation_count() {
        let doc = ApiDocument::from_value(json!({
            "paths": {
                "/a": { "get": {}, "post": {} },
                "/b": { "delete": {} }
            }
        }))
        .unwrap();
        assert_eq!(doc.operation_count(), 3);
    }
}
