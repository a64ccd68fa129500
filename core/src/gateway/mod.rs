#![deny(missing_docs)]

//! # API Gateway Fragments
//!
//! - **integration**: per-operation proxy integration descriptors.
//! - **cors**: the synthesized preflight operation.
//! - **validators**: document-level request validators and error responses.

pub mod cors;
pub mod integration;
pub mod validators;

pub use cors::cors_operation;
pub use integration::{
    http_proxy_integration, path_parameters, requires_binary, ContentHandling, Integration,
    IntegrationResponse, IntegrationType,
};
pub use validators::{gateway_responses, request_validators, GatewayResponse, RequestValidator};

/// Extension key holding the integration on an operation.
pub const INTEGRATION_KEY: &str = "x-amazon-apigateway-integration";

/// Extension key holding the validator reference on an operation.
pub const REQUEST_VALIDATOR_KEY: &str = "x-amazon-apigateway-request-validator";

/// Document-level binary media types key.
pub const BINARY_MEDIA_TYPES_KEY: &str = "x-amazon-apigateway-binary-media-types";

/// Document-level request validators key.
pub const REQUEST_VALIDATORS_KEY: &str = "x-amazon-apigateway-request-validators";

/// Document-level gateway responses key.
pub const GATEWAY_RESPONSES_KEY: &str = "x-amazon-apigateway-gateway-responses";

/// Binary media types registered on the API: everything.
pub const BINARY_MEDIA_TYPES: [&str; 1] = ["*/*"];
