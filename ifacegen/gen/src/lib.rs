//! Interface synthesizer library.
//!
//! This crate turns an interface model built with `ifacegen-define` into two
//! artifacts:
//!
//! - **Exchange structs**: one request and one response struct per service
//!   method, grouping the method's inputs and outputs for transport
//! - **Schemas**: an OpenAPI `components.schemas` registry describing every
//!   model type and exchange type
//!
//! The two synthesizers only read the model and run independently.
//!
//! ## Modules
//!
//! - [`exchange`] - Exchange struct generation
//! - [`schema`] - Schema registry generation
//! - [`signature`] - Context/error parameter trimming
//! - [`naming`] - Wire names, identifiers and schema references
//! - [`validation`] - Pre-generation checks
//! - [`output`] - Final assembly, validation, and file writing
//! - [`model`] - Model loading
//! - [`config`] - Synthesis conventions
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use ifacegen_gen::config::SynthConfig;
//! use ifacegen_gen::model::load_model;
//! use ifacegen_gen::output::{OutputOptions, generate_and_write};
//!
//! let node = load_model(Path::new("model.json")).unwrap();
//! let options = OutputOptions {
//!     dry_run: true,
//!     ..OutputOptions::new("generated")
//! };
//!
//! let files = generate_and_write(&node, &SynthConfig::default(), &options).unwrap();
//! println!("{} files", files.len());
//! ```
//!
//! ## Generated Code Structure
//!
//! For a service `Users` with `GetUser(ctx, id string) (*User, error)`:
//!
//! ```text
//! // users/exchange.rs
//! pub struct GetUserRequest { pub id: String }
//! pub struct GetUserResponse { pub user: Option<User> }
//!
//! // openapi.json
//! components.schemas: User, GetUserRequest, GetUserResponse
//! ```

pub mod config;
pub mod errors;
pub mod exchange;
pub mod model;
pub mod naming;
pub mod output;
pub mod schema;
pub mod signature;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
