//! Reads OpenAPI / Swagger documents and lists their operations.
//!
//! The loader does no `$ref` resolution: documents are expected to arrive
//! dereferenced, and any reference left in a schema is carried through to
//! the synthesizer untouched.

use crate::domain::endpoint::{Endpoint, HttpMethod};
use crate::domain::schema::SchemaNode;
use crate::error::{ApiForgeError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Response codes preferred when picking an operation's response schema.
const PREFERRED_RESPONSES: [&str; 3] = ["200", "201", "default"];

/// Source syntax of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// A parsed API description.
#[derive(Debug, Clone)]
pub struct ApiDocument {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub raw: Value,
}

pub fn load_document(path: &Path) -> Result<ApiDocument> {
    let text = std::fs::read_to_string(path)?;
    let document = parse_document(&text, DocumentFormat::from_path(path))?;
    info!(
        "Loaded API document '{}' v{} from {}",
        document.title,
        document.version,
        path.display()
    );
    Ok(document)
}

pub fn parse_document(text: &str, format: DocumentFormat) -> Result<ApiDocument> {
    let raw: Value = match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| ApiForgeError::Parse {
            format: "JSON",
            message: e.to_string(),
        })?,
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| ApiForgeError::Parse {
            format: "YAML",
            message: e.to_string(),
        })?,
    };

    // YAML may read an unquoted `openapi: 3.0` as a number.
    let has_version = |key: &str| {
        raw.get(key)
            .map_or(false, |v| v.is_string() || v.is_number())
    };
    if !has_version("openapi") && !has_version("swagger") {
        return Err(ApiForgeError::InvalidDocument(
            "missing 'openapi' or 'swagger' version field".to_string(),
        ));
    }

    if !raw.get("paths").map_or(false, Value::is_object) {
        return Err(ApiForgeError::InvalidDocument(
            "missing 'paths' object".to_string(),
        ));
    }

    let info = raw.get("info");
    let text_field = |key: &str| {
        info.and_then(|i| i.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Ok(ApiDocument {
        title: text_field("title").unwrap_or_else(|| "OpenAPI Collection".to_string()),
        version: text_field("version").unwrap_or_default(),
        description: text_field("description"),
        raw,
    })
}

/// Every operation in document order, methods ordered as in [`HttpMethod::ALL`].
pub fn extract_endpoints(document: &ApiDocument) -> Vec<Endpoint> {
    let Some(paths) = document.raw.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut endpoints = Vec::new();
    for (path, path_item) in paths {
        for method in HttpMethod::ALL {
            let Some(operation) = path_item.get(method.path_item_key()) else {
                continue;
            };

            let mut endpoint = Endpoint::new(method, path.clone());
            endpoint.summary = string_field(operation, "summary");
            endpoint.operation_id = string_field(operation, "operationId");
            endpoint.tags = operation
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            let label = endpoint.label();
            endpoint.request_schema = operation
                .get("requestBody")
                .and_then(first_media_schema)
                .and_then(|schema| parse_schema(schema, &label));
            endpoint.response_schema = operation
                .get("responses")
                .and_then(preferred_response)
                .and_then(first_media_schema)
                .and_then(|schema| parse_schema(schema, &label));

            endpoints.push(endpoint);
        }
    }
    endpoints
}

/// Find the endpoint matching an operationId or `"METHOD /path"` label.
pub fn find_endpoint<'a>(endpoints: &'a [Endpoint], selector: &str) -> Result<&'a Endpoint> {
    endpoints
        .iter()
        .find(|e| e.matches(selector))
        .ok_or_else(|| ApiForgeError::EndpointNotFound(selector.to_string()))
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn preferred_response(responses: &Value) -> Option<&Value> {
    let responses = responses.as_object()?;
    PREFERRED_RESPONSES
        .iter()
        .find_map(|code| responses.get(*code))
        .or_else(|| responses.values().next())
}

// Schema of the first declared media type under `content`.
fn first_media_schema(holder: &Value) -> Option<&Value> {
    holder
        .get("content")
        .and_then(Value::as_object)
        .and_then(|content| content.values().next())
        .and_then(|media| media.get("schema"))
}

fn parse_schema(schema: &Value, label: &str) -> Option<SchemaNode> {
    match SchemaNode::from_value(schema) {
        Ok(node) => Some(node),
        Err(e) => {
            warn!("Skipping unreadable schema on {}: {}", label, e);
            None
        }
    }
}
