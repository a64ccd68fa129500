#![deny(missing_docs)]

//! # OpenAPI Document Handling
//!
//! - **document**: Document model with ordered, lossless field maps.
//! - **validation**: The validator seam and the built-in structural validator.
//! - **bundle**: Inlining of external `$ref` targets.
//! - **ref_utils**: Reference splitting and JSON Pointer resolution.

pub mod bundle;
pub mod document;
pub(crate) mod ref_utils;
pub mod validation;

pub use bundle::{bundle, DocumentRegistry, DocumentSource};
pub use document::{ApiDocument, HttpMethod, Operation, PathItem, Paths, RootField};
pub use validation::{AcceptAll, SpecValidator, StructuralValidator};
