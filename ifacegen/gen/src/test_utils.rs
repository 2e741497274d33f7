//! Shared test utilities for ifacegen-gen tests.
//!
//! This module provides common helper functions for creating test fixtures
//! across the codebase, reducing duplication and ensuring consistency.

use ifacegen_define::{Method, Node, Object, Service};
use proc_macro2::TokenStream;

/// The `User` type: `{Name string, CreatedAt time.Time}`.
pub fn user_type() -> Object {
    Object::new("", "User").with_fields(vec![
        Object::builtin("Name", "string"),
        Object::builtin("CreatedAt", "time.Time"),
    ])
}

/// `GetUser(ctx context.Context, id string) (*User, error)`.
pub fn get_user_method() -> Method {
    Method::new("GetUser")
        .with_arguments(vec![
            Object::new("ctx", "context.Context"),
            Object::builtin("id", "string"),
        ])
        .with_results(vec![user_type().nullable(), Object::new("err", "error")])
}

/// Creates a service with the given methods.
pub fn make_service(name: &str, methods: Vec<Method>) -> Service {
    Service::new(name, methods)
}

/// A model with the `User` type and a `Users` service exposing `GetUser`.
pub fn user_service_node() -> Node {
    Node {
        types: vec![user_type()],
        services: vec![make_service("Users", vec![get_user_method()])],
    }
}

/// Validates that generated code is syntactically correct.
///
/// ## Errors
///
/// Returns an error string if the generated code fails to parse.
pub fn validate_generated_code(tokens: &TokenStream) -> Result<(), String> {
    syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(())
}

/// Formats generated code using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_type_is_struct_shaped() {
        let user = user_type();
        assert!(user.is_struct());
        assert_eq!(user.fields.len(), 2);
    }

    #[test]
    fn get_user_method_has_context_and_error() {
        let method = get_user_method();
        assert_eq!(method.arguments[0].type_name, "context.Context");
        assert_eq!(method.results.last().unwrap().type_name, "error");
        assert!(method.results[0].is_nullable);
    }

    #[test]
    fn user_service_node_has_one_service() {
        let node = user_service_node();
        assert_eq!(node.services.len(), 1);
        assert_eq!(node.services[0].methods[0].name, "GetUser");
    }

    #[test]
    fn generated_code_helpers_reject_invalid_tokens() {
        let tokens: TokenStream = "pub struct".parse().unwrap();
        assert!(validate_generated_code(&tokens).is_err());
        assert!(format_generated_code(&tokens).is_err());
    }
}
