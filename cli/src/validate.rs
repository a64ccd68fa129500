#![deny(missing_docs)]

//! # Validate Command
//!
//! Runs the structural validator without rewriting anything.

use crate::document_io::read_document;
use apigw_core::{AppError, AppResult, GatewayIntegrator, IntegratorOptions, StructuralValidator};
use std::path::PathBuf;

/// Arguments for the validate command.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the OpenAPI document (.json, .yaml or .yml).
    #[clap(long, short)]
    pub input: PathBuf,
}

/// Executes validation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &ValidateArgs) -> AppResult<()> {
    if !args.input.exists() {
        return Err(AppError::General(format!(
            "Input file not found: {:?}",
            args.input
        )));
    }

    let raw = read_document(&args.input)?;
    GatewayIntegrator::new(StructuralValidator, IntegratorOptions::default()).validate(&raw)?;
    println!("{:?} is a valid OpenAPI document", args.input);
    Ok(())
}
