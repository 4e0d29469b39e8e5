pub mod collection;
pub mod endpoint;
pub mod schema;

pub use collection::{PostmanCollection, VariableDefinition};
pub use endpoint::{Endpoint, HttpMethod};
pub use schema::{SchemaNode, SchemaType};
