//! # Assembler
//!
//! Merges synthesized fragments into the document. Only the reserved gateway
//! keys are written; every other field is left as it was. A reserved key
//! that already exists is overwritten in place, a missing one is appended.

use crate::gateway::integration::Integration;
use crate::gateway::validators::{gateway_responses, request_validators, DEFAULT_VALIDATOR};
use crate::gateway::{
    cors_operation, BINARY_MEDIA_TYPES, BINARY_MEDIA_TYPES_KEY, GATEWAY_RESPONSES_KEY,
    REQUEST_VALIDATORS_KEY, REQUEST_VALIDATOR_KEY,
};
use crate::oas::document::{ApiDocument, HttpMethod, Operation, PathItem, RootField};
use serde_json::Value;

/// Stores the integration on an operation, overwriting any previous one.
///
/// With validation enabled the operation also references the `all` validator.
pub fn attach_integration(operation: &mut Operation, integration: Integration, enable_validation: bool) {
    operation.set_integration(integration);
    if enable_validation {
        operation.insert(REQUEST_VALIDATOR_KEY, Value::from(DEFAULT_VALIDATOR));
    }
}

/// Stores the CORS preflight under `options`.
///
/// Returns true when an existing `options` operation was replaced.
pub fn attach_cors(path_item: &mut PathItem) -> bool {
    path_item.insert_operation(HttpMethod::Options, cors_operation())
}

/// Writes the document-level gateway blocks.
///
/// Binary media types are always written; validators and gateway responses
/// only when validation is enabled. Without validation, values already under
/// those keys are left alone.
pub fn attach_document_extensions(document: &mut ApiDocument, enable_validation: bool) {
    document.insert(
        BINARY_MEDIA_TYPES_KEY,
        RootField::Raw(Value::from(BINARY_MEDIA_TYPES.to_vec())),
    );
    if enable_validation {
        document.insert(
            REQUEST_VALIDATORS_KEY,
            RootField::RequestValidators(request_validators()),
        );
        document.insert(
            GATEWAY_RESPONSES_KEY,
            RootField::GatewayResponses(gateway_responses()),
        );
    }
}
