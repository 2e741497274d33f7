//! Naming helpers shared by both synthesizers.
//!
//! Model names come from another language's conventions (`CreatedAt`,
//! `userID`, `pkg.Type`). These helpers turn them into wire names, Rust
//! identifiers, schema references and output module names.

use ifacegen_define::Object;
use ifacegen_define::object::JSON_TAG;
use ifacegen_define::builtin::ARRAY_MARKER;
use proc_macro2::Ident;
use quote::format_ident;

/// Prefix of every schema cross reference.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Builds a `$ref` path to a registered schema.
///
/// ## Examples
///
/// ```
/// use ifacegen_gen::naming::schema_ref;
///
/// assert_eq!(schema_ref("User"), "#/components/schemas/User");
/// ```
pub fn schema_ref(name: &str) -> String {
    format!("{SCHEMA_REF_PREFIX}{name}")
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn exported_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reduces a declared type identifier to its bare type name.
///
/// Strips array/pointer markers, map key declarations and package
/// qualifiers: `[]*models.User` becomes `User`.
pub fn type_base_name(type_name: &str) -> &str {
    let mut base = type_name;
    loop {
        if let Some(rest) = base.strip_prefix(ARRAY_MARKER) {
            base = rest;
        } else if let Some(rest) = base.strip_prefix('*') {
            base = rest;
        } else if let Some(rest) = base.strip_prefix("map[") {
            base = rest.split_once(']').map(|(_, value)| value).unwrap_or(rest);
        } else {
            break;
        }
    }
    base.rsplit('.').next().unwrap_or(base)
}

/// Declared name of a parameter, falling back to its type's base name for
/// unnamed parameters.
pub fn param_name(object: &Object) -> String {
    if object.name.is_empty() {
        type_base_name(&object.type_name).to_string()
    } else {
        object.name.clone()
    }
}

/// Wire name of an exchange field.
///
/// A `json` serialization tag wins, even when it repeats the declared name;
/// otherwise the parameter name is exported (first letter upper-cased), so
/// `id` travels as `Id`.
///
/// ## Examples
///
/// ```
/// use ifacegen_define::Object;
/// use ifacegen_define::object::JSON_TAG;
/// use ifacegen_gen::naming::exchange_field_name;
///
/// assert_eq!(exchange_field_name(&Object::builtin("id", "string")), "Id");
/// assert_eq!(exchange_field_name(&Object::new("", "*models.User")), "User");
///
/// let renamed = Object::builtin("id", "string").with_type_tag("json", &["user_id"]);
/// assert_eq!(exchange_field_name(&renamed), "user_id");
/// ```
pub fn exchange_field_name(object: &Object) -> String {
    match object.type_tags.value(JSON_TAG) {
        Some(serialized) if !serialized.is_empty() => serialized.to_string(),
        _ => exported_name(&param_name(object)),
    }
}

/// Converts a model name to snake_case.
///
/// Non-alphanumeric characters act as word separators and are dropped.
///
/// ## Examples
///
/// ```
/// use ifacegen_gen::naming::snake_case;
///
/// assert_eq!(snake_case("CreatedAt"), "created_at");
/// assert_eq!(snake_case("userID"), "user_id");
/// assert_eq!(snake_case("HTTPServer"), "http_server");
/// ```
pub fn snake_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .flat_map(split_camel_case)
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Builds a valid Rust field identifier from a model name.
///
/// Keywords become raw identifiers, names that cannot be raw (`self`,
/// `crate`, ...) get a trailing underscore, and names starting with a digit
/// are prefixed.
pub fn field_ident(name: &str) -> Ident {
    let mut ident = snake_case(name);
    if ident.is_empty() {
        ident.push_str("field");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert_str(0, "field_");
    }
    if matches!(ident.as_str(), "self" | "super" | "crate" | "_") {
        ident.push('_');
    }

    if syn::parse_str::<Ident>(&ident).is_ok() {
        format_ident!("{}", ident)
    } else {
        format_ident!("r#{}", ident)
    }
}

/// Output module name for a service (lower-cased, identifier-safe).
pub fn module_name(service_name: &str) -> String {
    service_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

/// Splits a CamelCase string into individual words.
///
/// - "CreatedAt" -> ["Created", "At"]
/// - "userID" -> ["user", "ID"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "id" -> ["id"]
fn split_camel_case(s: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut words = Vec::new();
    let mut word_start = 0;

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, c)| c.is_lowercase());

        // "userName" -> "user", "Name"; "HTTPClient" -> "HTTP", "Client"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower));

        if is_new_word {
            words.push(&s[word_start..offset]);
            word_start = offset;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}
