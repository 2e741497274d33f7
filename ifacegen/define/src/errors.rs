//! Error types for the interface model.

use thiserror::Error;

/// Errors raised while loading or interpreting the model.
///
/// None of these abort synthesis on their own: tag interpretation failures
/// are logged by the synthesizers and the affected value is treated as unset.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model document could not be decoded.
    #[error("Failed to decode interface model: {0}")]
    Decode(#[from] serde_json::Error),

    /// An `example` tag could not be interpreted for its declared type.
    #[error("Invalid example {value:?} for type '{type_name}': {reason}")]
    InvalidExample {
        /// Declared type of the annotated object.
        type_name: String,
        /// Raw tag value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}
