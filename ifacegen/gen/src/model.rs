//! Loading the interface model from disk.

use std::fs;
use std::path::Path;

use ifacegen_define::Node;
use tracing::{debug, instrument};

use crate::errors::GeneratorError;

/// Reads and decodes a JSON interface model.
///
/// ## Errors
///
/// Returns `GeneratorError::ReadError` if the file cannot be read and
/// `GeneratorError::ModelLoad` if it is not a valid model document.
#[instrument(fields(path = %path.display()))]
pub fn load_model(path: &Path) -> Result<Node, GeneratorError> {
    let text = fs::read_to_string(path).map_err(|source| GeneratorError::ReadError {
        path: path.display().to_string(),
        source,
    })?;

    let node = Node::from_json(&text).map_err(|source| GeneratorError::ModelLoad {
        path: path.display().to_string(),
        source,
    })?;

    debug!(
        types = node.types.len(),
        services = node.services.len(),
        "model loaded"
    );
    Ok(node)
}
