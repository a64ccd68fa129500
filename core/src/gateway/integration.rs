#![deny(missing_docs)]

//! # Integration Descriptors
//!
//! The `x-amazon-apigateway-integration` object attached to every operation.
//! Real operations are proxied over a VPC link to a network load balancer,
//! addressed purely through stage variables.

use crate::oas::document::HttpMethod;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

/// Stage variable holding the VPC link id.
pub const CONNECTION_ID: &str = "${stageVariables.vpcLinkId}";

/// Upstream host and port, prefixed to the original path.
pub const UPSTREAM_BASE_URI: &str = "http://${stageVariables.nlbDnsName}:${stageVariables.port}";

/// Media type whose presence in `produces` switches on binary conversion.
pub const BINARY_MEDIA_TYPE: &str = "image/png";

/// JSON passthrough template used for requests and default responses.
pub const JSON_STATUS_TEMPLATE: &str = r#"{"statusCode": 200}"#;

/// Content type key used in every template map.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// How API Gateway reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionType {
    /// Private link into the VPC.
    #[serde(rename = "VPC_LINK")]
    VpcLink,
}

/// The integration `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationType {
    /// Forward the request to the backend untouched.
    HttpProxy,
    /// Answer inside the gateway without a backend call.
    Mock,
}

/// Behavior when no request template matches the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassthroughBehavior {
    /// Pass the body through when no template matches.
    WhenNoMatch,
}

/// Payload conversion applied by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentHandling {
    /// Forward the body as raw bytes.
    #[serde(rename = "CONVERT_TO_BINARY")]
    ConvertToBinary,
}

/// One entry of the integration `responses` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResponse {
    /// Header mappings (`method.response.header.*`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_parameters: Option<IndexMap<String, String>>,
    /// Body templates keyed by content type.
    pub response_templates: IndexMap<String, String>,
    /// Status code, serialized as a string.
    pub status_code: String,
}

/// The `x-amazon-apigateway-integration` object.
///
/// Field order follows the order API Gateway exports use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    /// Connection reference (VPC link id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Connection kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
    /// Upper-cased HTTP method forwarded to the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    /// Pass-through policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough_behavior: Option<PassthroughBehavior>,
    /// Request templates keyed by content type.
    pub request_templates: IndexMap<String, String>,
    /// Integration responses keyed by selection pattern.
    pub responses: IndexMap<String, IntegrationResponse>,
    /// Integration kind.
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    /// Backend URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Binary handling directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_handling: Option<ContentHandling>,
    /// Path parameter mapping (`integration.request.path.*` -> `method.request.path.*`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_parameters: Option<IndexMap<String, String>>,
}

/// Single-entry `application/json` template map.
pub(crate) fn json_template(template: &str) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    map.insert(JSON_CONTENT_TYPE.to_string(), template.to_string());
    map
}

/// Builds the proxy integration for one operation.
///
/// Depends only on the verb, the path template and the operation's
/// `produces` value.
///
/// # Arguments
///
/// * `method` - The operation's verb.
/// * `path` - The path template, e.g. `/items/{id}`.
/// * `produces` - The raw `produces` value, if any.
pub fn http_proxy_integration(
    method: HttpMethod,
    path: &str,
    produces: Option<&Value>,
) -> Integration {
    let mut responses = IndexMap::new();
    responses.insert(
        "default".to_string(),
        IntegrationResponse {
            response_parameters: None,
            response_templates: json_template(JSON_STATUS_TEMPLATE),
            status_code: "200".to_string(),
        },
    );

    Integration {
        connection_id: Some(CONNECTION_ID.to_string()),
        connection_type: Some(ConnectionType::VpcLink),
        http_method: Some(method.as_upper().to_string()),
        passthrough_behavior: Some(PassthroughBehavior::WhenNoMatch),
        request_templates: json_template(JSON_STATUS_TEMPLATE),
        responses,
        integration_type: IntegrationType::HttpProxy,
        uri: Some(format!("{}{}", UPSTREAM_BASE_URI, path)),
        content_handling: requires_binary(produces).then_some(ContentHandling::ConvertToBinary),
        request_parameters: path
            .contains('{')
            .then(|| path_parameters(path)),
    }
}

/// True when `produces` is an array holding the binary media type.
///
/// Exact string match only. Non-array values are ignored.
pub fn requires_binary(produces: Option<&Value>) -> bool {
    produces
        .and_then(Value::as_array)
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some(BINARY_MEDIA_TYPE)))
}

/// Maps every `{token}` in a path template to its upstream parameter.
///
/// Keys keep the left-to-right order of the tokens in the path.
pub fn path_parameters(path: &str) -> IndexMap<String, String> {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    let token_re = TOKEN_RE.get_or_init(|| Regex::new(r"\{(.*?)\}").expect("Invalid regex"));

    token_re
        .find_iter(path)
        .map(|m| {
            let name = m.as_str().replace(['{', '}'], "");
            (
                format!("integration.request.path.{}", name),
                format!("method.request.path.{}", name),
            )
        })
        .collect()
}
