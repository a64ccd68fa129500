#![deny(missing_docs)]

//! # Request Validation Blocks
//!
//! Document-level `x-amazon-apigateway-request-validators` and
//! `x-amazon-apigateway-gateway-responses`, written only when validation is
//! requested.

use crate::gateway::integration::json_template;
use indexmap::IndexMap;
use serde::Serialize;

/// Validator every operation references when validation is enabled.
pub const DEFAULT_VALIDATOR: &str = "all";

/// Validator that skips the body.
pub const PARAMS_ONLY_VALIDATOR: &str = "params-only";

/// Error body returned for rejected requests.
pub const VALIDATION_ERROR_TEMPLATE: &str =
    r#"{"message": "$context.error.validationErrorString"}"#;

/// One entry of `x-amazon-apigateway-request-validators`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestValidator {
    /// Validate the request body against its model.
    pub validate_request_body: bool,
    /// Validate required parameters.
    pub validate_request_parameters: bool,
}

/// One entry of `x-amazon-apigateway-gateway-responses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    /// HTTP status returned to the client.
    pub status_code: u16,
    /// Header mappings (`gatewayresponse.header.*`).
    pub response_parameters: IndexMap<String, String>,
    /// Body templates keyed by content type.
    pub response_templates: IndexMap<String, String>,
}

/// The two named validators.
pub fn request_validators() -> IndexMap<String, RequestValidator> {
    let mut validators = IndexMap::new();
    validators.insert(
        DEFAULT_VALIDATOR.to_string(),
        RequestValidator {
            validate_request_body: true,
            validate_request_parameters: true,
        },
    );
    validators.insert(
        PARAMS_ONLY_VALIDATOR.to_string(),
        RequestValidator {
            validate_request_body: false,
            validate_request_parameters: true,
        },
    );
    validators
}

/// 400 responses for body and parameter validation failures.
pub fn gateway_responses() -> IndexMap<String, GatewayResponse> {
    ["BAD_REQUEST_BODY", "BAD_REQUEST_PARAMETERS"]
        .into_iter()
        .map(|kind| (kind.to_string(), bad_request_response()))
        .collect()
}

fn bad_request_response() -> GatewayResponse {
    let mut response_parameters = IndexMap::new();
    response_parameters.insert(
        "gatewayresponse.header.Access-Control-Allow-Origin".to_string(),
        "'*'".to_string(),
    );
    GatewayResponse {
        status_code: 400,
        response_parameters,
        response_templates: json_template(VALIDATION_ERROR_TEMPLATE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::integration::JSON_CONTENT_TYPE;
    use serde_json::json;

    #[test]
    fn test_validator_shapes() {
        let value = serde_json::to_value(request_validators()).unwrap();
        assert_eq!(
            value,
            json!({
                "all": { "validateRequestBody": true, "validateRequestParameters": true },
                "params-only": { "validateRequestBody": false, "validateRequestParameters": true }
            })
        );
    }

    #[test]
    fn test_gateway_response_shapes() {
        let responses = gateway_responses();
        assert_eq!(responses.len(), 2);
        for key in ["BAD_REQUEST_BODY", "BAD_REQUEST_PARAMETERS"] {
            let response = &responses[key];
            assert_eq!(response.status_code, 400);
            assert_eq!(
                response.response_parameters["gatewayresponse.header.Access-Control-Allow-Origin"],
                "'*'"
            );
            assert!(response.response_templates[JSON_CONTENT_TYPE]
                .contains("$context.error.validationErrorString"));
        }
    }
}
