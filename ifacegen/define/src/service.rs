//! Services, methods, and the whole-model root.
//!
//! - [`Method`] - One interface method with ordered arguments and results
//! - [`Service`] - A named interface and its methods
//! - [`Node`] - The complete model: top-level types plus services

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::object::Object;

/// A single interface method.
///
/// ## Examples
///
/// ```
/// use ifacegen_define::{Method, Object};
///
/// let method = Method::new("GetUser")
///     .with_arguments(vec![
///         Object::new("ctx", "context.Context"),
///         Object::builtin("id", "string"),
///     ])
///     .with_results(vec![
///         Object::new("user", "User").nullable(),
///         Object::new("err", "error"),
///     ]);
///
/// assert_eq!(method.arguments.len(), 2);
/// assert_eq!(method.results.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    /// Method name; exchange type names are derived from it.
    pub name: String,
    /// Parameters in declaration order.
    pub arguments: Vec<Object>,
    /// Results in declaration order.
    pub results: Vec<Object>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<Object>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_results(mut self, results: Vec<Object>) -> Self {
        self.results = results;
        self
    }
}

/// A named service interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub name: String,
    /// Methods in declaration order.
    pub methods: Vec<Method>,
}

impl Service {
    pub fn new(name: impl Into<String>, methods: Vec<Method>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }
}

/// The complete interface model produced by the extractor.
///
/// Constructed once per run and never mutated by the synthesizers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    /// Top-level named types.
    pub types: Vec<Object>,
    pub services: Vec<Service>,
}

impl Node {
    /// Decodes a model from the extractor's JSON output.
    ///
    /// ## Examples
    ///
    /// ```
    /// use ifacegen_define::Node;
    ///
    /// let node = Node::from_json(r#"{
    ///     "services": [{ "name": "Users", "methods": [{ "name": "Ping" }] }]
    /// }"#).unwrap();
    ///
    /// assert!(node.types.is_empty());
    /// assert_eq!(node.services[0].methods[0].name, "Ping");
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns [`ModelError::Decode`] when the document is not a valid model.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Looks up a top-level type by its declared name.
    pub fn find_type(&self, type_name: &str) -> Option<&Object> {
        self.types.iter().find(|t| t.type_name == type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_reads_nested_model() {
        let node = Node::from_json(
            r#"{
                "types": [{
                    "name": "User",
                    "type_name": "User",
                    "fields": [
                        {"name": "Name", "type_name": "string", "is_builtin": true},
                        {"name": "Tags", "type_name": "[]string", "is_array": true, "is_builtin": true,
                         "sub_types": {"value": {"type_name": "string", "is_builtin": true}}}
                    ]
                }],
                "services": [{
                    "name": "Users",
                    "methods": [{
                        "name": "GetUser",
                        "arguments": [{"name": "id", "type_name": "string", "is_builtin": true}],
                        "results": [{"name": "err", "type_name": "error"}]
                    }]
                }]
            }"#,
        )
        .unwrap();

        let user = node.find_type("User").unwrap();
        assert_eq!(user.fields.len(), 2);
        assert_eq!(user.fields[1].value_type().unwrap().type_name, "string");
        assert_eq!(node.services[0].methods[0].results[0].type_name, "error");
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        let err = Node::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn find_type_misses_unknown_names() {
        assert!(Node::default().find_type("User").is_none());
    }
}
