#![deny(missing_docs)]

//! # API Gateway Integrator CLI
//!
//! Command Line Interface around the rewriting engine.
//!
//! Supported Commands:
//! - `integrate`: OpenAPI document -> API Gateway ready document.
//! - `validate`: Structural validation only.

use apigw_core::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod document_io;
mod fs_source;
mod integrate;
mod validate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI to API Gateway integrator")]
struct Cli {
    /// Log debug details to stderr (ignored when RUST_LOG is set).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite an OpenAPI document for API Gateway.
    Integrate(integrate::IntegrateArgs),
    /// Validate an OpenAPI document without rewriting it.
    Validate(validate::ValidateArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Integrate(args) => integrate::execute(args)?,
        Commands::Validate(args) => validate::execute(args)?,
    }

    Ok(())
}
