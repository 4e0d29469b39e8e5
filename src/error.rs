//! Error types for document loading and collection output

use thiserror::Error;

/// Errors surfaced outside the generation engines
#[derive(Debug, Error)]
pub enum ApiForgeError {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or YAML
    #[error("Failed to parse {format} document: {message}")]
    Parse { format: &'static str, message: String },

    /// The document parsed but is not an OpenAPI/Swagger description
    #[error("Invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    /// No operation matched the requested selector
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiForgeError>;
