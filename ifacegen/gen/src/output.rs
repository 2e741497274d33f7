//! Output assembly and file writing for generated artifacts.
//!
//! This module handles the final phase of generation: assembling the
//! exchange structs of each service into a complete Rust file, rendering
//! the schema document, validating and formatting the output, and writing
//! it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! <output>/
//! ├── openapi.json        # components.schemas for every type
//! └── users/
//!     └── exchange.rs     # exchange structs of the `Users` service
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::{Path, PathBuf};

use ifacegen_define::{Node, Service};
use proc_macro2::TokenStream;
use quote::quote;
use strum::{Display, EnumString};
use tracing::{debug, info, instrument};

use crate::config::SynthConfig;
use crate::errors::GeneratorError;
use crate::exchange::ExchangeSynthesizer;
use crate::naming::module_name;
use crate::schema::{SchemaDocument, build_registry};
use crate::validation::validate_node;

/// Notice prepended to every generated Rust file.
pub const GENERATED_HEADER: &str =
    "// This code was automatically generated by ifacegen. Do not edit manually.";

/// File name of the exchange module inside each service directory.
pub const EXCHANGE_FILE: &str = "exchange.rs";

/// File name of the schema document.
pub const SCHEMA_FILE: &str = "openapi.json";

/// Which artifacts a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputTarget {
    /// Exchange structs only.
    Exchange,
    /// Schema document only.
    Schema,
    #[default]
    All,
}

impl OutputTarget {
    pub fn includes_exchange(self) -> bool {
        matches!(self, Self::Exchange | Self::All)
    }

    pub fn includes_schema(self) -> bool {
        matches!(self, Self::Schema | Self::All)
    }
}

/// Where and how to write output.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    pub target: OutputTarget,
    /// `info.title` of the schema document.
    pub title: String,
    /// `info.version` of the schema document.
    pub api_version: String,
    /// Print instead of writing files.
    pub dry_run: bool,
}

impl OutputOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            target: OutputTarget::default(),
            title: "ifacegen".to_string(),
            api_version: "1.0.0".to_string(),
            dry_run: false,
        }
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Assembles the exchange module of one service.
///
/// The `serde` import is only emitted when the service has methods, so an
/// empty service still yields a warning-free module.
pub fn assemble_service_module(service: &Service, config: &SynthConfig) -> TokenStream {
    let module_doc = format!(" Exchange types of the `{}` service.", service.name);
    let structs = ExchangeSynthesizer::new(config).synthesize_service(service);

    let imports = if service.methods.is_empty() {
        quote! {}
    } else {
        quote! { use serde::{Deserialize, Serialize}; }
    };

    quote! {
        #![doc = #module_doc]

        #imports

        #structs
    }
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's syntactically
/// valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease, prepending the generated-code
/// notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_HEADER}\n\n{formatted}")
}

/// Assembles, validates and formats the exchange module of one service.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the generated code is invalid.
pub fn render_service(service: &Service, config: &SynthConfig) -> Result<String, GeneratorError> {
    let tokens = assemble_service_module(service, config);
    let file = validate_code(&tokens)?;
    Ok(format_code(&file))
}

/// Renders the schema document as pretty-printed JSON.
///
/// ## Errors
///
/// Returns `GeneratorError::SerializeError` if serialization fails.
pub fn render_schema_document(document: &SchemaDocument) -> Result<String, GeneratorError> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    Ok(json)
}

/// Path of the exchange module for `service` under `output_dir`.
pub fn exchange_path(output_dir: &Path, service: &Service) -> PathBuf {
    output_dir
        .join(module_name(&service.name))
        .join(EXCHANGE_FILE)
}

/// Writes content to a file atomically using temp file + rename.
///
/// The file is never left in a partially-written state: readers see either
/// the old or the new content.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Validates `node`, renders every requested artifact and writes it under
/// `options.output_dir` (or prints it in dry-run mode).
///
/// Exchange modules come first, in service order, followed by the schema
/// document.
///
/// ## Returns
///
/// The rendered files, whether or not they were written.
///
/// ## Errors
///
/// Returns an error if:
/// - The model or configuration fails validation
/// - Code generation produces invalid Rust
/// - File writing fails
#[instrument(skip_all, fields(output = %options.output_dir.display(), target = %options.target, dry_run = options.dry_run))]
pub fn generate_and_write(
    node: &Node,
    config: &SynthConfig,
    options: &OutputOptions,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    validate_node(node, config)?;

    let mut files = Vec::new();

    if options.target.includes_exchange() {
        for service in &node.services {
            files.push(GeneratedFile {
                path: exchange_path(&options.output_dir, service),
                content: render_service(service, config)?,
            });
        }
    }

    if options.target.includes_schema() {
        let registry = build_registry(node, config);
        let document = SchemaDocument::new(&options.title, &options.api_version, registry);
        files.push(GeneratedFile {
            path: options.output_dir.join(SCHEMA_FILE),
            content: render_schema_document(&document)?,
        });
    }

    if options.dry_run {
        for file in &files {
            println!("=== {} ===\n{}\n", file.path.display(), file.content);
        }
        debug!(files = files.len(), "dry run, nothing written");
    } else {
        for file in &files {
            write_atomic(&file.path, &file.content)?;
            info!(path = %file.path.display(), "wrote");
        }
    }

    Ok(files)
}
