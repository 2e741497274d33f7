//! Exchange struct generation for service methods.
//!
//! For every method of a service, two data-transfer structs are generated:
//! one grouping the method's inputs (`<Method>Request`) and one grouping its
//! outputs (`<Method>Response`). A leading context argument and a trailing
//! error result are dropped; see [`crate::signature`].
//!
//! ## Examples
//!
//! For `GetUser(ctx context.Context, id string) (*User, error)`:
//!
//! ```ignore
//! /// Request for `GetUser`.
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct GetUserRequest {
//!     #[serde(rename = "Id")]
//!     pub id: String,
//! }
//!
//! /// Response for `GetUser`.
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct GetUserResponse {
//!     #[serde(rename = "User")]
//!     pub user: Option<User>,
//! }
//! ```
//!
//! Methods without arguments or results still get a struct, marked so it is
//! not removed as dead weight:
//!
//! ```ignore
//! /// Request for `Ping`.
//! ///
//! /// Formal exchange type, please do not delete.
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct PingRequest {}
//! ```

mod rust_type;

use std::collections::HashSet;

use ifacegen_define::{Method, Object, Service};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use tracing::{debug, instrument};

use crate::config::SynthConfig;
use crate::naming::{exchange_field_name, field_ident, param_name};
use crate::signature::{request_params, response_params};

pub use rust_type::rust_type;

/// Doc line attached to zero-field exchange structs.
pub const FORMAL_EXCHANGE_NOTE: &str = " Formal exchange type, please do not delete.";

/// Generates exchange structs for services.
///
/// Holds only the run configuration; every call reads the model and
/// returns fresh tokens.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeSynthesizer<'a> {
    config: &'a SynthConfig,
}

impl<'a> ExchangeSynthesizer<'a> {
    pub fn new(config: &'a SynthConfig) -> Self {
        Self { config }
    }

    /// Generates the request and response structs of every method, in
    /// method declaration order.
    #[instrument(skip_all, fields(service = %service.name, methods = service.methods.len()))]
    pub fn synthesize_service(&self, service: &Service) -> TokenStream {
        let declarations = service.methods.iter().map(|m| self.synthesize_method(m));
        quote! {
            #(#declarations)*
        }
    }

    /// Generates the request struct followed by the response struct for
    /// one method.
    pub fn synthesize_method(&self, method: &Method) -> TokenStream {
        let request = exchange_struct(
            &self.config.request_name(&method.name),
            request_params(method, self.config),
            &format!(" Request for `{}`.", method.name),
        );
        let response = exchange_struct(
            &self.config.response_name(&method.name),
            response_params(method, self.config),
            &format!(" Response for `{}`.", method.name),
        );

        quote! {
            #request

            #response
        }
    }
}

/// Generates one exchange struct named `name` with a field per parameter.
///
/// Private parameters and parameters serialized as `-` are skipped. An
/// empty field set still yields a (formal) struct.
pub fn exchange_struct(name: &str, params: &[Object], doc: &str) -> TokenStream {
    let struct_name = type_ident(name);
    let fields = exchange_fields(params);

    if fields.is_empty() {
        return quote! {
            #[doc = #doc]
            ///
            #[doc = #FORMAL_EXCHANGE_NOTE]
            #[derive(Debug, Clone, Default, Serialize, Deserialize)]
            pub struct #struct_name {}
        };
    }

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct #struct_name {
            #(#fields)*
        }
    }
}

/// Generates field declarations, keeping parameter order.
fn exchange_fields(params: &[Object]) -> Vec<TokenStream> {
    let mut taken = HashSet::new();

    params
        .iter()
        .filter(|param| !param.is_excluded())
        .map(|param| {
            let ident = unique_ident(field_ident(&param_name(param)), &mut taken);
            let wire_name = exchange_field_name(param);
            let ty = rust_type(param);

            let rename = if unraw(&ident) == wire_name {
                quote! {}
            } else {
                quote! { #[serde(rename = #wire_name)] }
            };
            let doc = param
                .tags
                .value(ifacegen_define::object::DESC_TAG)
                .map(|desc| {
                    let desc = format!(" {desc}");
                    quote! { #[doc = #desc] }
                })
                .unwrap_or_default();

            quote! {
                #doc
                #rename
                pub #ident: #ty,
            }
        })
        .collect()
}

/// Disambiguates identifiers that collapse to the same snake_case name.
fn unique_ident(ident: Ident, taken: &mut HashSet<String>) -> Ident {
    let base = ident.to_string();
    if taken.insert(base.clone()) {
        return ident;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if taken.insert(candidate.clone()) {
            debug!(field = %base, renamed = %candidate, "duplicate exchange field identifier");
            return format_ident!("{}", candidate);
        }
        n += 1;
    }
}

fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
}

/// Builds a struct identifier, replacing anything that is not a valid
/// identifier character.
fn type_ident(name: &str) -> Ident {
    let mut sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert_str(0, "Exchange");
    }
    match syn::parse_str::<Ident>(&sanitized) {
        Ok(ident) => ident,
        Err(_) => format_ident!("{}_", sanitized),
    }
}
