//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// `InvalidSpecification` is the only failure the rewriting engine itself
/// produces. `Io` and `General` belong to the read/write boundary.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input document was rejected by the validator, or could not be
    /// bundled / read into the document model. Carries the underlying cause.
    #[from(ignore)]
    #[display("Invalid api spec: {_0}")]
    InvalidSpecification(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wraps any displayable cause into an `InvalidSpecification` failure.
    pub fn invalid_spec(cause: impl std::fmt::Display) -> Self {
        AppError::InvalidSpecification(cause.to_string())
    }
}
