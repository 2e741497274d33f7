//! Standalone API description envelope around the schema registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SchemaNode, SchemaRegistry};

/// OpenAPI version written into generated documents.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Minimal OpenAPI 3.0 document carrying only `components.schemas`.
///
/// `paths` is always present and empty; routing belongs to whatever
/// document this one is merged into.
///
/// ## Examples
///
/// ```
/// use ifacegen_gen::schema::{SchemaDocument, SchemaNode, SchemaRegistry};
///
/// let mut registry = SchemaRegistry::new();
/// registry.register("Id", SchemaNode::typed("string", None));
///
/// let document = SchemaDocument::new("Users", "1.0.0", registry);
/// let json = serde_json::to_value(&document).unwrap();
/// assert_eq!(json["openapi"], "3.0.0");
/// assert_eq!(json["components"]["schemas"]["Id"]["type"], "string");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub openapi: String,
    pub info: Info,
    pub paths: BTreeMap<String, Value>,
    pub components: Components,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub schemas: BTreeMap<String, SchemaNode>,
}

impl SchemaDocument {
    pub fn new(title: impl Into<String>, version: impl Into<String>, registry: SchemaRegistry) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: title.into(),
                version: version.into(),
            },
            paths: BTreeMap::new(),
            components: Components {
                schemas: registry.into_schemas(),
            },
        }
    }
}
