#![deny(missing_docs)]

//! # CORS Preflight
//!
//! Synthesizes the `options` operation every path receives. It answers the
//! preflight inside the gateway (`mock` integration) and never touches the
//! backend.

use crate::gateway::integration::{
    json_template, Integration, IntegrationResponse, IntegrationType,
};
use crate::oas::document::Operation;
use indexmap::IndexMap;
use serde_json::{json, Value};

/// Tag placed on every synthesized preflight operation.
pub const CORS_TAG: &str = "CORS";

/// The headers allowed by the preflight response.
pub const CORS_HEADERS: [&str; 3] = [
    "Access-Control-Allow-Headers",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Origin",
];

/// Builds the preflight operation.
///
/// Takes no input: every call yields the same value.
pub fn cors_operation() -> Operation {
    let mut operation = Operation::default();
    operation.insert("summary", json!("CORS support"));
    operation.insert("description", json!("Enable CORS by returning correct headers\n"));
    operation.insert("tags", json!([CORS_TAG]));
    operation.insert("responses", cors_responses());
    operation.set_integration(cors_integration());
    operation
}

fn cors_responses() -> Value {
    let headers: serde_json::Map<String, Value> = CORS_HEADERS
        .iter()
        .map(|h| (h.to_string(), json!({ "schema": { "type": "string" } })))
        .collect();

    json!({
        "200": {
            "description": "Default response for CORS method",
            "headers": headers,
            "content": {}
        }
    })
}

fn cors_integration() -> Integration {
    let response_parameters: IndexMap<String, String> = CORS_HEADERS
        .iter()
        .map(|h| (format!("method.response.header.{}", h), "'*'".to_string()))
        .collect();

    let mut responses = IndexMap::new();
    responses.insert(
        "default".to_string(),
        IntegrationResponse {
            response_parameters: Some(response_parameters),
            response_templates: json_template("{}\n"),
            status_code: "200".to_string(),
        },
    );

    Integration {
        connection_id: None,
        connection_type: None,
        http_method: None,
        passthrough_behavior: None,
        request_templates: json_template("{\n  \"statusCode\" : 200\n}\n"),
        responses,
        integration_type: IntegrationType::Mock,
        uri: None,
        content_handling: None,
        request_parameters: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_is_deterministic() {
        let a = serde_json::to_string(&cors_operation()).unwrap();
        let b = serde_json::to_string(&cors_operation()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cors_wire_shape() {
        let value = serde_json::to_value(cors_operation()).unwrap();
        assert_eq!(value["tags"], json!(["CORS"]));
        assert_eq!(value["summary"], json!("CORS support"));
        assert_eq!(
            value["responses"]["200"]["headers"]["Access-Control-Allow-Origin"]["schema"]["type"],
            json!("string")
        );
        assert_eq!(value["responses"]["200"]["content"], json!({}));

        let integration = &value["x-amazon-apigateway-integration"];
        assert_eq!(integration["type"], json!("mock"));
        assert!(integration.get("uri").is_none());
        assert!(integration.get("connectionId").is_none());
        assert_eq!(
            integration["responses"]["default"]["responseParameters"]
                ["method.response.header.Access-Control-Allow-Methods"],
            json!("'*'")
        );
        assert_eq!(
            integration["requestTemplates"]["application/json"],
            json!("{\n  \"statusCode\" : 200\n}\n")
        );
    }

    #[test]
    fn test_cors_has_no_validator_reference() {
        assert!(!cors_operation().contains_key(crate::gateway::REQUEST_VALIDATOR_KEY));
    }
}
