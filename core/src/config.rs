//! # Integrator Configuration
//!
//! Options recognized by the rewriter. They can be built in code or read from
//! a small JSON / YAML config document:
//!
//! ```yaml
//! enableValidation: true
//! enableBundling: false
//! ```

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Flags controlling a single transformation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct IntegratorOptions {
    /// Attach request validators and gateway error responses.
    pub enable_validation: bool,
    /// Inline external `$ref` targets before rewriting.
    pub enable_bundling: bool,
}

impl IntegratorOptions {
    /// Parses options from a config document.
    ///
    /// JSON is detected by a leading `{`, everything else is read as YAML.
    ///
    /// # Errors
    ///
    /// Returns `AppError::General` when the content is malformed or carries
    /// unknown keys.
    pub fn from_config_str(content: &str) -> AppResult<Self> {
        if content.trim_start().starts_with('{') {
            return serde_json::from_str(content)
                .map_err(|e| AppError::General(format!("Failed to parse JSON config: {}", e)));
        }
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| AppError::General(format!("Failed to parse YAML config: {}", e)))
    }

    /// Builder-style toggle for request validation.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = enabled;
        self
    }

    /// Builder-style toggle for external reference bundling.
    pub fn with_bundling(mut self, enabled: bool) -> Self {
        self.enable_bundling = enabled;
        self
    }
}
