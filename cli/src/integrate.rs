#![deny(missing_docs)]

//! # Integrate Command
//!
//! Reads an OpenAPI document, rewrites it for API Gateway and writes the
//! result. Nothing is written when any step fails.

use crate::document_io::{read_document, write_document};
use crate::fs_source::{document_uri, FsDocumentSource};
use apigw_core::{AppError, AppResult, GatewayIntegrator, IntegratorOptions, StructuralValidator};
use std::fs;
use std::path::PathBuf;

/// Arguments for the integrate command.
#[derive(clap::Args, Debug, Clone)]
pub struct IntegrateArgs {
    /// Path to the input OpenAPI document (.json, .yaml or .yml).
    #[clap(long, short)]
    pub input: PathBuf,

    /// Output path. Format follows the extension.
    /// If not provided, prints JSON to stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Config file with `enableValidation` / `enableBundling` (JSON or YAML).
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Attach request validators and gateway error responses.
    #[clap(long, env = "APIGW_ENABLE_VALIDATION")]
    pub enable_validation: bool,

    /// Inline external `$ref` targets before rewriting.
    #[clap(long = "bundle", env = "APIGW_ENABLE_BUNDLING")]
    pub enable_bundling: bool,
}

/// Merges the config file and command-line flags. Flags can only switch
/// options on.
fn resolve_options(args: &IntegrateArgs) -> AppResult<IntegratorOptions> {
    let base = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                AppError::General(format!("Failed to read config {:?}: {}", path, e))
            })?;
            IntegratorOptions::from_config_str(&content)?
        }
        None => IntegratorOptions::default(),
    };

    Ok(base
        .with_validation(base.enable_validation || args.enable_validation)
        .with_bundling(base.enable_bundling || args.enable_bundling))
}

/// Executes the integration.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &IntegrateArgs) -> AppResult<()> {
    if !args.input.exists() {
        return Err(AppError::General(format!(
            "Input file not found: {:?}",
            args.input
        )));
    }

    let options = resolve_options(args)?;
    let raw = read_document(&args.input)?;

    let mut integrator = GatewayIntegrator::new(StructuralValidator, options);
    if options.enable_bundling {
        let base = document_uri(&args.input)?;
        integrator = integrator.with_document_source(FsDocumentSource, Some(base));
    }

    let output = integrator.integrate(&raw)?;
    write_document(args.output.as_deref(), &output)?;

    if let Some(out_path) = &args.output {
        println!("Gateway document written to {:?}", out_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    const PETSTORE: &str = r#"{
        "swagger": "2.0",
        "info": { "title": "Pets", "version": "1.0" },
        "paths": {
            "/pets/{petId}": {
                "get": {
                    "produces": ["image/png"],
                    "responses": { "200": { "description": "OK" } }
                }
            }
        }
    }"#;

    fn args(input: PathBuf, output: Option<PathBuf>) -> IntegrateArgs {
        IntegrateArgs {
            input,
            output,
            config: None,
            enable_validation: false,
            enable_bundling: false,
        }
    }

    #[test]
    fn test_execute_writes_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("openapi.json");
        let output = dir.path().join("out/gateway.json");
        fs::write(&input, PETSTORE).unwrap();

        execute(&args(input, Some(output.clone()))).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        let get = &written["paths"]["/pets/{petId}"]["get"];
        assert_eq!(
            get["x-amazon-apigateway-integration"]["contentHandling"],
            json!("CONVERT_TO_BINARY")
        );
        assert_eq!(written["paths"]["/pets/{petId}"]["options"]["tags"], json!(["CORS"]));
        assert!(written.get("x-amazon-apigateway-request-validators").is_none());
    }

    #[test]
    fn test_execute_yaml_with_config() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("openapi.yaml");
        let output = dir.path().join("gateway.yaml");
        let config = dir.path().join("apigw.yaml");
        fs::write(
            &input,
            r#"
swagger: "2.0"
info: {title: Pets, version: "1.0"}
paths:
  /pets:
    post:
      responses:
        '201': { description: Created }
"#,
        )
        .unwrap();
        fs::write(&config, "enableValidation: true\n").unwrap();

        let mut a = args(input, Some(output.clone()));
        a.config = Some(config);
        execute(&a).unwrap();

        let written: Value =
            serde_yaml::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(
            written["paths"]["/pets"]["post"]["x-amazon-apigateway-request-validator"],
            json!("all")
        );
        assert!(written["x-amazon-apigateway-gateway-responses"]["BAD_REQUEST_BODY"].is_object());
    }

    #[test]
    fn test_execute_bundles_relative_refs() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("openapi.json");
        let output = dir.path().join("gateway.json");
        fs::write(
            dir.path().join("pet.json"),
            r#"{"type": "object", "properties": {"name": {"type": "string"}}}"#,
        )
        .unwrap();
        fs::write(
            &input,
            r#"{
                "swagger": "2.0",
                "info": { "title": "Pets", "version": "1.0" },
                "paths": {},
                "definitions": { "Pet": { "$ref": "pet.json" } }
            }"#,
        )
        .unwrap();

        let mut a = args(input, Some(output.clone()));
        a.enable_bundling = true;
        execute(&a).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(written["definitions"]["Pet"]["type"], json!("object"));
    }

    #[test]
    fn test_invalid_spec_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("openapi.json");
        let output = dir.path().join("gateway.json");
        fs::write(&input, r#"{"paths": {"/a": {"get": {"responses": {}}}}}"#).unwrap();

        let err = execute(&args(input, Some(output.clone()))).unwrap_err();
        assert!(matches!(err, AppError::InvalidSpecification(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_execute_missing_input() {
        let dir = tempdir().unwrap();
        let err = execute(&args(dir.path().join("missing.json"), None)).unwrap_err();
        assert!(format!("{}", err).contains("Input file not found"));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("apigw.json");
        fs::write(&config, r#"{"enableBundling": true}"#).unwrap();

        let mut a = args(dir.path().join("unused.json"), None);
        a.config = Some(config);
        a.enable_validation = true;
        let opts = resolve_options(&a).unwrap();
        assert!(opts.enable_validation);
        assert!(opts.enable_bundling);
    }
}
