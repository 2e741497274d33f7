//! Built-in type table: maps declared type identifiers to a schema
//! `(type, format)` pair.

use ifacegen_define::Builtin;
use ifacegen_define::Object;
use ifacegen_define::object::{FORMAT_TAG, TYPE_TAG};

/// Schema format of byte sequences.
pub const BINARY_FORMAT: &str = "binary";

/// Resolves the schema `(type, format)` pair of `object`.
///
/// | declared                   | type      | format      |
/// |----------------------------|-----------|-------------|
/// | `bool`                     | `boolean` |             |
/// | any marker                 | `object`  |             |
/// | `time.Time`                | `string`  | `date-time` |
/// | `byte`                     | `string`  | `byte`      |
/// | `[]byte`                   | `string`  | `binary`    |
/// | `uuid.UUID`                | `string`  | `uuid`      |
/// | `float32`, `float64`       | `number`  | `float`     |
/// | integer kinds              | `number`  |             |
/// | anything else              | declared name, array marker stripped |
///
/// `type` and `format` tags override the table.
///
/// ## Examples
///
/// ```
/// use ifacegen_define::Object;
/// use ifacegen_gen::schema::cast_type;
///
/// assert_eq!(cast_type(&Object::builtin("n", "uint16")), ("number".to_string(), None));
///
/// let id = Object::builtin("id", "string").with_tag("format", "uuid");
/// assert_eq!(cast_type(&id), ("string".to_string(), Some("uuid".to_string())));
/// ```
pub fn cast_type(object: &Object) -> (String, Option<String>) {
    let declared = object.schema_name();

    // `Builtin::of` drops the one array marker itself; `[][]byte` stays unknown.
    let (type_name, format) = match Builtin::of(&object.type_name) {
        Some(Builtin::Bool) => ("boolean", None),
        Some(Builtin::Any) => ("object", None),
        Some(Builtin::Timestamp) => ("string", Some("date-time")),
        Some(Builtin::Byte) if object.is_array => ("string", Some(BINARY_FORMAT)),
        Some(Builtin::Byte) => ("string", Some("byte")),
        Some(Builtin::Uuid) => ("string", Some("uuid")),
        Some(kind) if kind.is_float() => ("number", Some("float")),
        Some(kind) if kind.is_integer() => ("number", None),
        _ => (declared, None),
    };

    let format = object
        .tags
        .value(FORMAT_TAG)
        .or(format)
        .filter(|format| !format.is_empty())
        .map(str::to_string);
    let type_name = object.tags.value_or(TYPE_TAG, type_name).to_string();

    (type_name, format)
}
