//! # apiforge - OpenAPI example and collection generator
//!
//! apiforge reads an OpenAPI/Swagger description and derives two artifacts
//! from it: synthetic example payloads for any request or response schema,
//! and a Postman collection in which every generated literal has been
//! pulled out into a named, reusable variable.
//!
//! ## Quick Start
//!
//! ```rust
//! use apiforge::adapters::synthesizer::Synthesizer;
//! use apiforge::adapters::variabilizer::variabilize;
//! use apiforge::domain::SchemaNode;
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_value(&json!({
//!     "type": "object",
//!     "required": ["id"],
//!     "properties": { "id": { "type": "string", "format": "uuid" } }
//! }))
//! .unwrap();
//!
//! let example = Synthesizer::seeded(42).synthesize(&schema);
//! let (templated, variables) = variabilize(&example);
//! assert_eq!(templated, json!({ "id": "{{data_id_0}}" }));
//! assert_eq!(variables[0].kind, "string");
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema nodes, endpoints and collection records
//! - **Adapters**: synthesizer, variabilizer, document loader, collection builder
//! - **Config**: settings file, environment and CLI overrides

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

pub use error::ApiForgeError;
