//! Pre-generation checks on the model and configuration.
//!
//! Synthesis itself never fails, but some inputs would produce output that
//! cannot compile or that silently overwrites itself. Running validation
//! first turns those into clear errors.
//!
//! ## Validation Checks
//!
//! - **Suffix format**: request/response suffixes must be non-empty,
//!   alphanumeric, and distinct from each other
//! - **Marker types**: context and error marker types must be non-empty
//! - **Exchange name collisions**: two methods of one service must not
//!   produce the same exchange type name, and no exchange type may share a
//!   name with a top-level model type
//! - **Module collisions**: two services must not map to one output module
//!
//! ## Examples
//!
//! ```
//! use ifacegen_define::{Method, Node, Service};
//! use ifacegen_gen::config::SynthConfig;
//! use ifacegen_gen::validation::validate_node;
//!
//! let node = Node {
//!     types: vec![],
//!     services: vec![Service::new("Health", vec![Method::new("Ping")])],
//! };
//!
//! assert!(validate_node(&node, &SynthConfig::default()).is_ok());
//! ```

use std::collections::{HashMap, HashSet};

use ifacegen_define::{Node, Service};
use tracing::debug;

use crate::config::SynthConfig;
use crate::errors::GeneratorError;
use crate::naming::{module_name, type_base_name};

/// Validates the configuration and every service of `node`.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidSuffix` or `GeneratorError::ConfigError`
/// for bad configuration, and `GeneratorError::NamingCollision` for the
/// first collision found.
pub fn validate_node(node: &Node, config: &SynthConfig) -> Result<(), GeneratorError> {
    validate_config(config)?;

    let type_names: HashSet<&str> = node
        .types
        .iter()
        .map(|object| type_base_name(&object.type_name))
        .collect();

    let mut modules: HashMap<String, &str> = HashMap::new();
    for service in &node.services {
        let module = module_name(&service.name);
        if let Some(previous) = modules.insert(module.clone(), &service.name) {
            return Err(GeneratorError::NamingCollision {
                service: service.name.clone(),
                name: module.clone(),
                reason: format!("is also the output module of service '{previous}'"),
                suggestion: format!("{}V2", service.name),
            });
        }
        validate_service(service, config, &type_names)?;
    }

    debug!(services = node.services.len(), "model validated");
    Ok(())
}

/// Validates suffixes and marker types.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidSuffix` if a suffix is empty, contains
/// non-alphanumeric characters, or both suffixes are equal. Returns
/// `GeneratorError::ConfigError` if a marker type is empty.
pub fn validate_config(config: &SynthConfig) -> Result<(), GeneratorError> {
    for suffix in [&config.request_suffix, &config.response_suffix] {
        if suffix.is_empty() {
            return Err(GeneratorError::InvalidSuffix {
                suffix: suffix.clone(),
                reason: "suffix cannot be empty".to_string(),
            });
        }

        if !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GeneratorError::InvalidSuffix {
                suffix: suffix.clone(),
                reason: "suffix must contain only alphanumeric characters (letters and numbers)"
                    .to_string(),
            });
        }
    }

    if config.request_suffix == config.response_suffix {
        return Err(GeneratorError::InvalidSuffix {
            suffix: config.response_suffix.clone(),
            reason: "request and response suffixes must differ".to_string(),
        });
    }

    if config.context_type.is_empty() {
        return Err(GeneratorError::ConfigError(
            "context marker type cannot be empty".to_string(),
        ));
    }
    if config.error_type.is_empty() {
        return Err(GeneratorError::ConfigError(
            "error marker type cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that the exchange type names of `service` are unique and do not
/// shadow any of `type_names`.
///
/// ## Errors
///
/// Returns `GeneratorError::NamingCollision` for the first collision.
pub fn validate_service(
    service: &Service,
    config: &SynthConfig,
    type_names: &HashSet<&str>,
) -> Result<(), GeneratorError> {
    let mut generated: HashMap<String, &str> = HashMap::new();

    for method in &service.methods {
        let names = [
            config.request_name(&method.name),
            config.response_name(&method.name),
        ];

        for name in names {
            if type_names.contains(name.as_str()) {
                return Err(GeneratorError::NamingCollision {
                    service: service.name.clone(),
                    suggestion: format!("{name}Body"),
                    reason: "collides with a model type of the same name (rename the model type)"
                        .to_string(),
                    name,
                });
            }

            if let Some(previous) = generated.insert(name.clone(), &method.name) {
                return Err(GeneratorError::NamingCollision {
                    service: service.name.clone(),
                    suggestion: format!("{}V2", method.name),
                    reason: format!("is generated for both '{previous}' and '{}'", method.name),
                    name,
                });
            }
        }
    }

    Ok(())
}
