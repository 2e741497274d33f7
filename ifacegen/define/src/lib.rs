//! Interface Model Library
//!
//! This crate provides the read-only type model consumed by the `ifacegen-gen`
//! synthesizers. The model is produced by an upstream extractor (usually as a
//! JSON document) and describes services, their methods, and every type those
//! methods exchange.
//!
//! ## Core Types
//!
//! - [`Node`] - The complete model: top-level types and services
//! - [`Service`] - A named interface with ordered methods
//! - [`Method`] - A method with ordered arguments and results
//! - [`Object`] - One type occurrence (primitive, struct, array, map, alias)
//! - [`SubTypes`] - Element types of arrays and maps
//! - [`Tags`] - Ordered annotation/serialization metadata with defaulting lookups
//! - [`Builtin`] - The closed set of built-in type identifiers
//!
//! ## Examples
//!
//! ```
//! use ifacegen_define::{Method, Node, Object, Service};
//!
//! let user = Object::new("", "User").with_fields(vec![
//!     Object::builtin("Name", "string"),
//!     Object::builtin("CreatedAt", "time.Time"),
//! ]);
//!
//! let node = Node {
//!     types: vec![user.clone()],
//!     services: vec![Service::new(
//!         "Users",
//!         vec![Method::new("GetUser")
//!             .with_arguments(vec![
//!                 Object::new("ctx", "context.Context"),
//!                 Object::builtin("id", "string"),
//!             ])
//!             .with_results(vec![user.nullable(), Object::new("err", "error")])],
//!     )],
//! };
//!
//! assert_eq!(node.services[0].methods[0].arguments.len(), 2);
//! ```

pub mod builtin;
pub mod errors;
pub mod object;
pub mod prelude;
pub mod service;
pub mod tags;

// Re-export main types at crate root
pub use builtin::Builtin;
pub use errors::ModelError;
pub use object::{Object, SubTypes};
pub use service::{Method, Node, Service};
pub use tags::Tags;
