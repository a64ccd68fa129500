//! # Gateway Integrator
//!
//! The end-to-end pipeline: validate -> (bundle) -> read -> rewrite -> write.
//! Reading and writing files is left to the caller; external documents for
//! bundling come from an injected `DocumentSource`.

use crate::config::IntegratorOptions;
use crate::error::{AppError, AppResult};
use crate::oas::bundle::{bundle, DocumentRegistry, DocumentSource};
use crate::oas::document::ApiDocument;
use crate::oas::validation::SpecValidator;
use crate::rewriter::rewrite;
use serde_json::Value;

/// Runs the full transformation against one input document per call.
pub struct GatewayIntegrator<V> {
    validator: V,
    options: IntegratorOptions,
    source: Box<dyn DocumentSource>,
    base_uri: Option<String>,
}

impl<V: SpecValidator> GatewayIntegrator<V> {
    /// Creates an integrator with an empty document source.
    pub fn new(validator: V, options: IntegratorOptions) -> Self {
        Self {
            validator,
            options,
            source: Box::new(DocumentRegistry::new()),
            base_uri: None,
        }
    }

    /// Sets where external documents come from when bundling.
    ///
    /// `base_uri` is the URI of the input document; relative references are
    /// resolved against it.
    pub fn with_document_source(
        mut self,
        source: impl DocumentSource + 'static,
        base_uri: Option<String>,
    ) -> Self {
        self.source = Box::new(source);
        self.base_uri = base_uri;
        self
    }

    /// Runs only the validator.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidSpecification` with the validator's message.
    pub fn validate(&self, raw: &Value) -> AppResult<()> {
        self.validator
            .validate(raw)
            .map_err(AppError::InvalidSpecification)
    }

    /// Transforms `raw` into the typed, rewritten document.
    ///
    /// `raw` is never modified.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidSpecification` when validation or bundling
    /// fails, or when the document cannot be read into the model.
    pub fn integrate_document(&self, raw: &Value) -> AppResult<ApiDocument> {
        self.validate(raw)?;

        let document = if self.options.enable_bundling {
            bundle(raw.clone(), self.base_uri.as_deref(), self.source.as_ref())?
        } else {
            raw.clone()
        };

        let document = ApiDocument::from_value(document)?;
        Ok(rewrite(document, &self.options))
    }

    /// Transforms `raw` and serializes the result back to JSON.
    ///
    /// # Errors
    ///
    /// See [`GatewayIntegrator::integrate_document`]; serialization failures
    /// surface as `AppError::General`.
    pub fn integrate(&self, raw: &Value) -> AppResult<Value> {
        self.integrate_document(raw)?.to_value()
    }
}
