//! Rust type rendering for exchange fields.
//!
//! Maps a model [`Object`] to the Rust type used in generated exchange
//! structs. Unknown or unusable type identifiers degrade to
//! `serde_json::Value` instead of failing the run.

use ifacegen_define::builtin::ARRAY_MARKER;
use ifacegen_define::{Builtin, Object};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use tracing::debug;

use crate::naming::type_base_name;

/// Renders the Rust type of `object`, wrapping nullable occurrences in
/// `Option`.
///
/// ## Examples
///
/// ```
/// use ifacegen_define::Object;
/// use ifacegen_gen::exchange::rust_type;
///
/// let ty = rust_type(&Object::builtin("ids", "int64").nullable());
/// assert_eq!(ty.to_string().replace(' ', ""), "Option<i64>");
///
/// let bytes = Object::array_of("data", Object::builtin("", "byte"));
/// assert_eq!(rust_type(&bytes).to_string().replace(' ', ""), "Vec<u8>");
/// ```
pub fn rust_type(object: &Object) -> TokenStream {
    let ty = bare_type(object);
    if object.is_nullable {
        quote! { Option<#ty> }
    } else {
        ty
    }
}

fn bare_type(object: &Object) -> TokenStream {
    if object.is_array {
        let element = match object.value_type() {
            Some(element) => rust_type(element),
            None => {
                let element = object
                    .type_name
                    .strip_prefix(ARRAY_MARKER)
                    .unwrap_or(&object.type_name);
                named_type(element, object.is_builtin)
            }
        };
        return quote! { Vec<#element> };
    }

    if object.is_map {
        let key = object
            .key_type()
            .map(rust_type)
            .unwrap_or_else(|| quote! { String });
        let value = object
            .value_type()
            .map(rust_type)
            .unwrap_or_else(|| quote! { serde_json::Value });
        return quote! { std::collections::HashMap<#key, #value> };
    }

    named_type(&object.type_name, object.is_builtin)
}

fn named_type(type_name: &str, is_builtin: bool) -> TokenStream {
    if let Some(builtin) = Builtin::of(type_name) {
        return builtin_type(builtin);
    }

    match user_type_ident(type_name) {
        Some(ident) if !is_builtin => quote! { #ident },
        _ => {
            debug!(type_name, "no Rust mapping for type, using serde_json::Value");
            quote! { serde_json::Value }
        }
    }
}

fn user_type_ident(type_name: &str) -> Option<Ident> {
    syn::parse_str::<Ident>(type_base_name(type_name)).ok()
}

fn builtin_type(builtin: Builtin) -> TokenStream {
    match builtin {
        Builtin::Bool => quote! { bool },
        Builtin::String => quote! { String },
        Builtin::Int | Builtin::Int64 => quote! { i64 },
        Builtin::Int8 => quote! { i8 },
        Builtin::Int16 => quote! { i16 },
        Builtin::Int32 => quote! { i32 },
        Builtin::Uint | Builtin::Uint64 => quote! { u64 },
        Builtin::Uint8 | Builtin::Byte => quote! { u8 },
        Builtin::Uint16 => quote! { u16 },
        Builtin::Uint32 => quote! { u32 },
        Builtin::Float32 => quote! { f32 },
        Builtin::Float64 => quote! { f64 },
        Builtin::Timestamp => quote! { chrono::DateTime<chrono::Utc> },
        Builtin::Uuid => quote! { uuid::Uuid },
        Builtin::Any => quote! { serde_json::Value },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(object: &Object) -> String {
        rust_type(object).to_string().replace(' ', "")
    }

    #[test]
    fn builtins_map_to_primitives() {
        let cases = [
            ("bool", "bool"),
            ("string", "String"),
            ("int", "i64"),
            ("int32", "i32"),
            ("uint", "u64"),
            ("uint16", "u16"),
            ("byte", "u8"),
            ("float32", "f32"),
            ("float64", "f64"),
            ("time.Time", "chrono::DateTime<chrono::Utc>"),
            ("uuid.UUID", "uuid::Uuid"),
            ("interface{}", "serde_json::Value"),
        ];
        for (type_name, expected) in cases {
            assert_eq!(render(&Object::builtin("x", type_name)), expected, "{type_name}");
        }
    }

    #[test]
    fn user_types_use_their_base_name() {
        assert_eq!(render(&Object::new("u", "models.User")), "User");
        assert_eq!(render(&Object::new("u", "User").nullable()), "Option<User>");
    }

    #[test]
    fn arrays_render_as_vec() {
        let users = Object::array_of("users", Object::new("", "User"));
        assert_eq!(render(&users), "Vec<User>");

        // Element type recovered from the declared name when sub-types are absent.
        let mut names = Object::builtin("names", "[]string");
        names.is_array = true;
        assert_eq!(render(&names), "Vec<String>");
    }

    #[test]
    fn maps_render_as_hash_map() {
        let map = Object::map_of(
            "counts",
            Object::builtin("", "string"),
            Object::builtin("", "int64").nullable(),
        );
        assert_eq!(
            render(&map),
            "std::collections::HashMap<String,Option<i64>>"
        );
    }

    #[test]
    fn unknown_builtins_degrade_to_json_value() {
        assert_eq!(render(&Object::builtin("c", "complex128")), "serde_json::Value");
        assert_eq!(render(&Object::new("f", "func()")), "serde_json::Value");
    }
}
