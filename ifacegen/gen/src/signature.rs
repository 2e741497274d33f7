//! Method signature trimming.
//!
//! Exchange types carry user data only: a leading call-context argument and
//! a trailing error result are transport concerns and are dropped.

use ifacegen_define::{Method, Object};

use crate::config::SynthConfig;

/// Whether `object` is declared with the marker type `marker`.
fn has_type(object: &Object, marker: &str) -> bool {
    object.type_name == marker
}

/// Drops the first argument iff it is the context marker type.
pub fn strip_context<'a>(args: &'a [Object], context_type: &str) -> &'a [Object] {
    match args.split_first() {
        Some((first, rest)) if has_type(first, context_type) => rest,
        _ => args,
    }
}

/// Drops the last result iff it is the error marker type.
pub fn strip_error<'a>(results: &'a [Object], error_type: &str) -> &'a [Object] {
    match results.split_last() {
        Some((last, rest)) if has_type(last, error_type) => rest,
        _ => results,
    }
}

/// Fields of a method's request exchange type.
pub fn request_params<'a>(method: &'a Method, config: &SynthConfig) -> &'a [Object] {
    strip_context(&method.arguments, &config.context_type)
}

/// Fields of a method's response exchange type.
pub fn response_params<'a>(method: &'a Method, config: &SynthConfig) -> &'a [Object] {
    strip_error(&method.results, &config.error_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(objects: &[Object]) -> Vec<&str> {
        objects.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn leading_context_is_stripped() {
        let args = vec![
            Object::new("ctx", "context.Context"),
            Object::builtin("id", "string"),
            Object::builtin("limit", "int"),
        ];
        assert_eq!(names(strip_context(&args, "context.Context")), ["id", "limit"]);
    }

    #[test]
    fn context_elsewhere_is_kept() {
        let args = vec![
            Object::builtin("id", "string"),
            Object::new("ctx", "context.Context"),
        ];
        assert_eq!(names(strip_context(&args, "context.Context")), ["id", "ctx"]);
    }

    #[test]
    fn trailing_error_is_stripped() {
        let results = vec![
            Object::new("user", "User"),
            Object::builtin("total", "int"),
            Object::new("err", "error"),
        ];
        assert_eq!(names(strip_error(&results, "error")), ["user", "total"]);
    }

    #[test]
    fn error_elsewhere_is_kept() {
        let results = vec![Object::new("err", "error"), Object::builtin("n", "int")];
        assert_eq!(names(strip_error(&results, "error")), ["err", "n"]);
    }

    #[test]
    fn empty_signatures_stay_empty() {
        assert!(strip_context(&[], "context.Context").is_empty());
        assert!(strip_error(&[], "error").is_empty());
    }

    #[test]
    fn method_params_use_configured_markers() {
        let method = Method::new("Sync")
            .with_arguments(vec![
                Object::new("c", "rpc.Ctx"),
                Object::builtin("full", "bool"),
            ])
            .with_results(vec![Object::new("e", "rpc.Err")]);

        let config = SynthConfig {
            context_type: "rpc.Ctx".to_string(),
            error_type: "rpc.Err".to_string(),
            ..SynthConfig::default()
        };

        assert_eq!(names(request_params(&method, &config)), ["full"]);
        assert!(response_params(&method, &config).is_empty());

        // Default markers do not match the custom ones.
        let defaults = SynthConfig::default();
        assert_eq!(request_params(&method, &defaults).len(), 2);
        assert_eq!(response_params(&method, &defaults).len(), 1);
    }
}
