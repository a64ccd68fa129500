#![deny(missing_docs)]

//! # API Gateway Core
//!
//! Rewrites a validated OpenAPI document into an API Gateway ready variant:
//! every operation is proxied over a VPC link, every path answers CORS
//! preflights with a mock, and request validation can be switched on.

/// Shared error types.
pub mod error;

/// Run options and config parsing.
pub mod config;

/// OpenAPI document model, validation and bundling.
pub mod oas;

/// API Gateway fragment synthesis.
pub mod gateway;

/// Fragment merging.
pub mod assembler;

/// Per-operation rewriting.
pub mod rewriter;

/// End-to-end pipeline.
pub mod integrator;

pub use config::IntegratorOptions;
pub use error::{AppError, AppResult};
pub use integrator::GatewayIntegrator;
pub use oas::{
    bundle, AcceptAll, ApiDocument, DocumentRegistry, DocumentSource, HttpMethod, Operation,
    PathItem, Paths, RootField, SpecValidator, StructuralValidator,
};
pub use rewriter::rewrite;
