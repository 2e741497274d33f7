//! Type occurrences in the interface model.
//!
//! An [`Object`] describes one occurrence of a type: a method parameter, a
//! struct field, an array element, or a top-level named type. Struct-shaped
//! occurrences carry their `fields`; arrays and maps describe their elements
//! through [`SubTypes`].

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::builtin::{ARRAY_MARKER, Builtin};
use crate::errors::ModelError;
use crate::tags::Tags;

/// Sentinel used both as an alias ("do not register as a standalone
/// schema") and as a serialization name ("do not serialize this field").
pub const SUPPRESS: &str = "-";

/// Serialization tag whose first value overrides the field name.
pub const JSON_TAG: &str = "json";

/// Annotation tag holding an example value.
pub const EXAMPLE_TAG: &str = "example";

/// Annotation tag holding a human-readable description.
pub const DESC_TAG: &str = "desc";

/// Annotation tag overriding the schema `format`.
pub const FORMAT_TAG: &str = "format";

/// Annotation tag overriding the schema `type`.
pub const TYPE_TAG: &str = "type";

/// Element types of an array or map occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTypes {
    /// Map key type.
    pub key: Option<Box<Object>>,
    /// Array element or map value type.
    pub value: Option<Box<Object>>,
}

/// A single type occurrence.
///
/// ## Examples
///
/// ```
/// use ifacegen_define::Object;
///
/// let user = Object::new("user", "User").with_fields(vec![
///     Object::builtin("Name", "string"),
///     Object::builtin("CreatedAt", "time.Time"),
/// ]);
///
/// assert!(user.is_struct());
/// assert_eq!(user.fields[1].serialized_name(), "CreatedAt");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Object {
    /// Field or parameter name of this occurrence (may be empty for
    /// unnamed results).
    pub name: String,
    /// Declared type identifier (e.g. `int64`, `[]byte`, `User`).
    pub type_name: String,
    /// Nested fields; non-empty only for struct-shaped types.
    pub fields: Vec<Object>,
    pub is_array: bool,
    pub is_map: bool,
    pub is_builtin: bool,
    pub is_nullable: bool,
    pub is_private: bool,
    /// Element types for arrays and maps.
    pub sub_types: SubTypes,
    /// Name of the schema this occurrence stands for; [`SUPPRESS`] disables
    /// standalone registration.
    pub alias: String,
    /// Annotation tags (`desc`, `example`, `format`, `type`).
    pub tags: Tags,
    /// Serialization tags (`json`).
    pub type_tags: Tags,
}

impl Object {
    /// Creates a non-builtin occurrence of `type_name`.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Creates an occurrence of a built-in type.
    pub fn builtin(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            is_builtin: true,
            ..Self::new(name, type_name)
        }
    }

    /// Creates an array occurrence whose elements are `element`.
    pub fn array_of(name: impl Into<String>, element: Object) -> Self {
        Self {
            type_name: format!("{ARRAY_MARKER}{}", element.type_name),
            is_array: true,
            is_builtin: element.is_builtin,
            sub_types: SubTypes {
                key: None,
                value: Some(Box::new(element)),
            },
            ..Self::new(name, String::new())
        }
    }

    /// Creates a map occurrence from `key` to `value`.
    pub fn map_of(name: impl Into<String>, key: Object, value: Object) -> Self {
        Self {
            type_name: format!("map[{}]{}", key.type_name, value.type_name),
            is_map: true,
            sub_types: SubTypes {
                key: Some(Box::new(key)),
                value: Some(Box::new(value)),
            },
            ..Self::new(name, String::new())
        }
    }

    pub fn with_fields(mut self, fields: Vec<Object>) -> Self {
        self.fields = fields;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Adds an annotation tag.
    pub fn with_tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tags.insert(key, [value.into()]);
        self
    }

    /// Adds a serialization tag.
    pub fn with_type_tag(mut self, key: &str, values: &[&str]) -> Self {
        self.type_tags.insert(key, values.iter().copied());
        self
    }

    /// Struct-shaped occurrences are exactly those with fields.
    pub fn is_struct(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Whether this is the open "any" type.
    pub fn is_any(&self) -> bool {
        !self.is_array && !self.is_map && Builtin::of(&self.type_name) == Some(Builtin::Any)
    }

    pub fn key_type(&self) -> Option<&Object> {
        self.sub_types.key.as_deref()
    }

    pub fn value_type(&self) -> Option<&Object> {
        self.sub_types.value.as_deref()
    }

    /// Name used on the wire: a non-empty `json` tag value wins over the
    /// declared name.
    pub fn serialized_name(&self) -> &str {
        match self.type_tags.value(JSON_TAG) {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }

    /// Private fields and fields serialized as `-` never appear in output.
    pub fn is_excluded(&self) -> bool {
        self.is_private || self.serialized_name() == SUPPRESS
    }

    /// Whether a struct-shaped occurrence may be registered under its own
    /// name.
    pub fn registers_schema(&self) -> bool {
        self.alias != SUPPRESS
    }

    /// The alias to reference instead of inlining, if any.
    pub fn reference_alias(&self) -> Option<&str> {
        match self.alias.as_str() {
            "" | SUPPRESS => None,
            alias => Some(alias),
        }
    }

    /// Registry name for this occurrence. Arrays drop their array marker so
    /// the name matches the element type.
    pub fn schema_name(&self) -> &str {
        if self.is_array {
            self.type_name
                .strip_prefix(ARRAY_MARKER)
                .unwrap_or(&self.type_name)
        } else {
            &self.type_name
        }
    }

    /// Interprets the `example` tag for this occurrence's declared type.
    ///
    /// Textual kinds (strings, timestamps, UUIDs) keep the literal value,
    /// booleans and numerics are parsed, and everything else is decoded as
    /// JSON. An absent tag yields `Ok(None)`.
    ///
    /// ## Errors
    ///
    /// Returns [`ModelError::InvalidExample`] when the value does not parse
    /// for the declared type.
    pub fn example_value(&self) -> Result<Option<Value>, ModelError> {
        let Some(raw) = self.tags.value(EXAMPLE_TAG) else {
            return Ok(None);
        };
        let invalid = |reason: String| ModelError::InvalidExample {
            type_name: self.type_name.clone(),
            value: raw.to_string(),
            reason,
        };

        let scalar = if self.is_array || self.is_map || self.is_struct() {
            None
        } else {
            Builtin::of(&self.type_name)
        };
        let trimmed = raw.trim();

        let value = match scalar {
            Some(kind) if kind.is_textual() => Value::String(raw.to_string()),
            Some(Builtin::Bool) => trimmed
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|e| invalid(e.to_string()))?,
            Some(kind) if kind.is_unsigned() => trimmed
                .parse::<u64>()
                .map(Value::from)
                .map_err(|e| invalid(e.to_string()))?,
            Some(kind) if kind.is_integer() => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| invalid(e.to_string()))?,
            Some(kind) if kind.is_float() => {
                let parsed = trimmed
                    .parse::<f64>()
                    .map_err(|e| invalid(e.to_string()))?;
                Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| invalid("not a finite number".to_string()))?
            }
            _ => serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?,
        };

        Ok(Some(value))
    }
}
