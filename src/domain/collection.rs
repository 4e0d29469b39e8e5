//! Postman collection (v2.1) records produced by the collection builder.

use serde::{Deserialize, Serialize};

pub const POSTMAN_SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// One extracted literal: `{{name}}` in a templated value refers to it.
///
/// Serialises with the field names of a collection-level variable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    #[serde(rename = "key")]
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl VariableDefinition {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: kind.into(),
        }
    }

    pub fn placeholder(&self) -> String {
        placeholder_for(&self.name)
    }
}

/// `{{name}}`
pub fn placeholder_for(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: CollectionInfo,
    pub item: Vec<PostmanItem>,
    pub variable: Vec<VariableDefinition>,
}

impl PostmanCollection {
    /// File name a download of this collection should use.
    pub fn file_name(&self) -> String {
        // Each whitespace run becomes one `_`, including leading and trailing runs.
        let mut stem = String::with_capacity(self.info.name.len());
        let mut in_space = false;
        for c in self.info.name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    stem.push('_');
                }
                in_space = true;
            } else {
                stem.push(c);
                in_space = false;
            }
        }
        format!("{}.postman_collection.json", stem)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub description: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanItem {
    pub name: String,
    pub request: PostmanRequest,
    #[serde(default)]
    pub response: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanRequest {
    pub method: String,
    pub header: Vec<PostmanHeader>,
    pub url: PostmanUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PostmanBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanHeader {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PostmanHeader {
    pub fn text(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            kind: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanUrl {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanBody {
    pub mode: String,
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BodyOptions>,
}

impl PostmanBody {
    pub fn raw_json(raw: String) -> Self {
        Self {
            mode: "raw".to_string(),
            raw,
            options: Some(BodyOptions {
                raw: RawOptions {
                    language: "json".to_string(),
                },
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variable_serialises_as_key_value_type() {
        let var = VariableDefinition::new("data_id_0", "42", "number");
        assert_eq!(
            serde_json::to_value(&var).unwrap(),
            json!({ "key": "data_id_0", "value": "42", "type": "number" })
        );
        assert_eq!(var.placeholder(), "{{data_id_0}}");
    }

    #[test]
    fn test_file_name_collapses_whitespace() {
        let collection = PostmanCollection {
            info: CollectionInfo {
                name: "Pet  Store API".to_string(),
                description: String::new(),
                schema: POSTMAN_SCHEMA_URL.to_string(),
            },
            item: vec![],
            variable: vec![],
        };
        assert_eq!(collection.file_name(), "Pet_Store_API.postman_collection.json");
    }

    #[test]
    fn test_file_name_keeps_edge_whitespace_as_underscores() {
        let collection = PostmanCollection {
            info: CollectionInfo {
                name: " Pet\tStore ".to_string(),
                description: String::new(),
                schema: POSTMAN_SCHEMA_URL.to_string(),
            },
            item: vec![],
            variable: vec![],
        };
        assert_eq!(collection.file_name(), "_Pet_Store_.postman_collection.json");
    }
}
