//! # Integration Rewriter
//!
//! Walks every path and verb, synthesizes the gateway fragments and hands
//! them to the assembler.

use crate::assembler::{attach_cors, attach_document_extensions, attach_integration};
use crate::config::IntegratorOptions;
use crate::gateway::http_proxy_integration;
use crate::oas::document::{ApiDocument, HttpMethod, PathItem};

/// Rewrites a validated document for API Gateway.
///
/// Takes the document by value and returns the rewritten one. Each
/// operation's integration depends only on its own path, verb and
/// `produces`, so traversal order does not affect the result.
///
/// # Arguments
///
/// * `document` - The validated (and optionally bundled) document.
/// * `options` - Run options; only `enable_validation` is read here.
pub fn rewrite(mut document: ApiDocument, options: &IntegratorOptions) -> ApiDocument {
    let mut path_count = 0;
    if let Some(paths) = document.paths_mut() {
        for (path, item) in paths.items_mut() {
            rewrite_path_item(path, item, options);
            path_count += 1;
        }
    }

    attach_document_extensions(&mut document, options.enable_validation);

    tracing::info!(
        paths = path_count,
        operations = document.operation_count(),
        validation = options.enable_validation,
        "rewrote document for API Gateway"
    );
    document
}

fn rewrite_path_item(path: &str, item: &mut PathItem, options: &IntegratorOptions) {
    for (method, operation) in item.operations_mut() {
        // replaced by the CORS mock below
        if method == HttpMethod::Options {
            continue;
        }

        let integration = http_proxy_integration(method, path, operation.produces());
        tracing::debug!(
            path,
            method = method.as_str(),
            binary = integration.content_handling.is_some(),
            parameters = integration.request_parameters.as_ref().map_or(0, |p| p.len()),
            "attached integration"
        );
        attach_integration(operation, integration, options.enable_validation);
    }

    if attach_cors(item) {
        tracing::warn!(path, "replaced existing options operation with CORS mock");
    }
}
