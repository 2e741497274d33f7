//! Error types for the ifacegen generator.

use ifacegen_define::ModelError;
use thiserror::Error;

/// Errors that can occur around synthesis.
///
/// The synthesizers themselves are infallible; these errors come from
/// loading the model, validating configuration, and writing output.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read or decode the interface model
    #[error("Failed to load interface model '{path}': {source}")]
    ModelLoad {
        path: String,
        #[source]
        source: ModelError,
    },

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generated code did not parse
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to serialize the schema document
    #[error("Failed to serialize schema document: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Invalid exchange type suffix.
    ///
    /// Suffixes must be alphanumeric so that generated names are valid
    /// Rust identifiers.
    #[error("Invalid suffix '{suffix}': {reason}")]
    InvalidSuffix {
        /// The invalid suffix value.
        suffix: String,
        /// Explanation of why the suffix is invalid.
        reason: String,
    },

    /// Two generated exchange types, or an exchange type and a model type,
    /// share a name.
    #[error(
        "Naming collision in service '{service}': '{name}' {reason}. Suggestion: rename to '{suggestion}'"
    )]
    NamingCollision {
        /// The service in which the collision occurs.
        service: String,
        /// The colliding type name.
        name: String,
        /// What the name collides with.
        reason: String,
        /// Suggested alternative name.
        suggestion: String,
    },
}
