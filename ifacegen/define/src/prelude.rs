//! Convenient re-exports for working with the interface model.
//!
//! ## Examples
//!
//! ```
//! use ifacegen_define::prelude::*;
//!
//! let service = Service::new("Health", vec![Method::new("Ping")]);
//! assert_eq!(service.methods.len(), 1);
//! ```

pub use crate::builtin::Builtin;
pub use crate::errors::ModelError;
pub use crate::object::{Object, SubTypes, SUPPRESS};
pub use crate::service::{Method, Node, Service};
pub use crate::tags::Tags;
