//! Schema generation for the `components.schemas` section of an API
//! description document.
//!
//! The [`SchemaSynthesizer`] walks the interface model recursively and fills
//! a [`SchemaRegistry`] keyed by type name. Named struct types are registered
//! once and referenced through `$ref` elsewhere; built-in types collapse to a
//! `(type, format)` pair via [`cast_type`].
//!
//! ## Examples
//!
//! ```
//! use ifacegen_define::{Node, Object};
//! use ifacegen_gen::schema::{SchemaRegistry, SchemaSynthesizer};
//!
//! let node = Node {
//!     types: vec![Object::new("", "User").with_fields(vec![
//!         Object::builtin("Name", "string"),
//!         Object::builtin("CreatedAt", "time.Time"),
//!     ])],
//!     services: vec![],
//! };
//!
//! let mut registry = SchemaRegistry::new();
//! SchemaSynthesizer::new(&mut registry).synthesize(&node);
//!
//! let user = registry.get("User").unwrap();
//! let created = &user.properties.as_ref().unwrap()["CreatedAt"];
//! assert_eq!(created.schema_type.as_deref(), Some("string"));
//! assert_eq!(created.format.as_deref(), Some("date-time"));
//! ```

mod builtin;
mod document;
mod resolver;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::naming::schema_ref;

pub use builtin::cast_type;
pub use document::{Components, Info, SchemaDocument, OPENAPI_VERSION};
pub use resolver::{SchemaSynthesizer, build_registry};

/// One schema node.
///
/// Only the vocabulary used by the synthesizer is modeled. Unset members
/// are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Reference to a registered schema (`#/components/schemas/<Name>`).
    #[serde(rename = "$ref")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Object members, in field declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Array element schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Map value schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// A node with the given `type` and optional `format`.
    pub fn typed(schema_type: impl Into<String>, format: Option<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            format,
            ..Self::default()
        }
    }

    /// A bare `$ref` to the registered schema `name`.
    pub fn reference(name: &str) -> Self {
        Self {
            ref_path: Some(schema_ref(name)),
            ..Self::default()
        }
    }

    pub fn is_reference(&self) -> bool {
        self.ref_path.is_some()
    }
}

/// Name-keyed schema registry for one synthesis run.
///
/// Keys are kept sorted so serialized output is stable. Registering a name
/// twice replaces the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, SchemaNode>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under `name`, returning the replaced entry.
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaNode) -> Option<SchemaNode> {
        self.schemas.insert(name.into(), schema)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates registered schemas in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.schemas.iter()
    }

    pub fn into_schemas(self) -> BTreeMap<String, SchemaNode> {
        self.schemas
    }
}
