//! JSON-Schema shaped nodes as they appear inside an OpenAPI document.
//!
//! Nodes are expected to be fully dereferenced by whoever loaded the
//! document. A leftover `$ref` is kept so generation can degrade visibly
//! instead of failing.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Primitive type keyword of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl SchemaType {
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// The `type` keyword, either a single name or an OpenAPI 3.1 style list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TypeKeyword {
    Single(String),
    Multiple(Vec<String>),
}

/// A single schema node. Keywords with the wrong shape (Swagger 2 style
/// `required: true`, tuple `items`, negative lengths) read as absent so one
/// bad constraint only loses that constraint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "$ref", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub type_keyword: Option<TypeKeyword>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient_properties", skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(default, deserialize_with = "lenient_required", skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "enum", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_nodes", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaNode>>,
    #[serde(default, deserialize_with = "lenient_nodes", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaNode>>,
    #[serde(default, deserialize_with = "lenient_nodes", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaNode>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}

// Non-string entries are dropped; a non-list (Swagger 2 boolean) reads as empty.
fn lenient_required<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw
        .as_array()
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

fn lenient_properties<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, SchemaNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(fields) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        fields
            .into_iter()
            .filter_map(|(name, node)| Some((name, serde_json::from_value(node).ok()?)))
            .collect(),
    ))
}

fn lenient_nodes<'de, D>(deserializer: D) -> Result<Option<Vec<SchemaNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(members) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        members
            .into_iter()
            .filter_map(|member| serde_json::from_value(member).ok())
            .collect(),
    ))
}

impl SchemaNode {
    /// Parse a node out of an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Resolved primitive type. For list-valued `type` the first non-null
    /// entry wins; unknown keywords count as absent.
    pub fn primary_type(&self) -> Option<SchemaType> {
        match self.type_keyword.as_ref()? {
            TypeKeyword::Single(name) => SchemaType::parse(name),
            TypeKeyword::Multiple(names) => {
                let parsed: Vec<SchemaType> =
                    names.iter().filter_map(|n| SchemaType::parse(n)).collect();
                parsed
                    .iter()
                    .copied()
                    .find(|t| *t != SchemaType::Null)
                    .or_else(|| parsed.first().copied())
            }
        }
    }

    /// Builder-style helper used heavily in tests.
    pub fn of_type(schema_type: &str) -> Self {
        Self {
            type_keyword: Some(TypeKeyword::Single(schema_type.to_string())),
            ..Default::default()
        }
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}
