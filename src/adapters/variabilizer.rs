//! Rewrites generated values into placeholder templates.
//!
//! Every primitive leaf becomes `{{data_<key>_<n>}}` with `n` taken from a
//! counter that only moves forward within one [`VariableScope`]. Leaves are
//! named by position, so equal values at different positions never share a
//! variable. Path parameters are the exception: they are named
//! `path_<param>` and registered once per scope.

use crate::domain::collection::{placeholder_for, VariableDefinition};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// Literal recorded for every path parameter variable.
pub const PATH_PLACEHOLDER_VALUE: &str = "example_value";

/// Naming state and variable accumulator for one variabilization pass.
///
/// A scope is owned by a single caller; concurrent passes each need their
/// own scope to keep names unique.
#[derive(Debug, Default, Clone)]
pub struct VariableScope {
    placeholders: IndexMap<String, String>,
    counter: u64,
    variables: Vec<VariableDefinition>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope whose first leaf variable uses `counter` as its suffix.
    pub fn starting_at(counter: u64) -> Self {
        Self {
            counter,
            ..Self::default()
        }
    }

    /// Next counter value a leaf would receive.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn variables(&self) -> &[VariableDefinition] {
        &self.variables
    }

    pub fn into_variables(self) -> Vec<VariableDefinition> {
        self.variables
    }

    pub fn contains(&self, name: &str) -> bool {
        self.placeholders.contains_key(name)
    }

    pub fn placeholder(&self, name: &str) -> Option<&str> {
        self.placeholders.get(name).map(String::as_str)
    }

    /// Template `value`, recording one variable per primitive leaf.
    pub fn variabilize(&mut self, value: &Value) -> Value {
        self.template(value, None)
    }

    fn template(&mut self, value: &Value, context: Option<&str>) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.template(item, context))
                    .collect(),
            ),
            Value::Object(fields) => {
                let mut rebuilt = Map::with_capacity(fields.len());
                for (key, child) in fields {
                    let templated = self.template(child, Some(key.as_str()));
                    rebuilt.insert(key.clone(), templated);
                }
                Value::Object(rebuilt)
            }
            leaf => self.register_leaf(leaf, context),
        }
    }

    fn register_leaf(&mut self, leaf: &Value, context: Option<&str>) -> Value {
        let name = loop {
            let candidate = leaf_name(context, self.counter);
            self.counter += 1;
            if !self.placeholders.contains_key(&candidate) {
                break candidate;
            }
        };

        let placeholder = placeholder_for(&name);
        self.variables.push(VariableDefinition::new(
            name.clone(),
            coerce_to_string(leaf),
            type_tag(leaf),
        ));
        self.placeholders.insert(name, placeholder.clone());
        Value::String(placeholder)
    }

    /// Replace `{param}` segments with `{{path_param}}`, registering each
    /// parameter name at most once in this scope.
    pub fn substitute_path_segments<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        placeholder_value: &str,
    ) -> Vec<String> {
        segments
            .iter()
            .map(|segment| {
                let segment = segment.as_ref();
                let Some(param) = path_parameter_name(segment) else {
                    return segment.to_string();
                };

                let name = format!("path_{}", param);
                if let Some(existing) = self.placeholders.get(&name) {
                    return existing.clone();
                }

                let placeholder = placeholder_for(&name);
                self.variables.push(VariableDefinition::new(
                    name.clone(),
                    placeholder_value,
                    "string",
                ));
                self.placeholders.insert(name, placeholder.clone());
                placeholder
            })
            .collect()
    }
}

/// Variabilize `value` in a fresh scope.
pub fn variabilize(value: &Value) -> (Value, Vec<VariableDefinition>) {
    let mut scope = VariableScope::new();
    let templated = scope.variabilize(value);
    (templated, scope.into_variables())
}

/// Run the path-parameter pass over `segments` in a fresh scope.
pub fn substitute_path_params<S: AsRef<str>>(segments: &[S]) -> (Vec<String>, Vec<VariableDefinition>) {
    let mut scope = VariableScope::new();
    let rewritten = scope.substitute_path_segments(segments, PATH_PLACEHOLDER_VALUE);
    (rewritten, scope.into_variables())
}

/// Inverse of variabilization: every leaf that is exactly `{{name}}` for a
/// known variable is replaced by that variable's value coerced back through
/// its recorded kind. Unknown placeholders stay as they are.
pub fn resolve_placeholders(templated: &Value, variables: &[VariableDefinition]) -> Value {
    let by_name: IndexMap<&str, &VariableDefinition> =
        variables.iter().map(|v| (v.name.as_str(), v)).collect();
    resolve_with(templated, &by_name)
}

fn resolve_with(value: &Value, by_name: &IndexMap<&str, &VariableDefinition>) -> Value {
    match value {
        Value::String(text) => placeholder_name(text)
            .and_then(|name| by_name.get(name))
            .map(|var| coerce_from_string(&var.value, &var.kind))
            .unwrap_or_else(|| value.clone()),
        Value::Array(items) => Value::Array(items.iter().map(|i| resolve_with(i, by_name)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), resolve_with(v, by_name)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn leaf_name(context: Option<&str>, counter: u64) -> String {
    match context {
        Some(key) => format!("data_{}_{}", sanitize_key(key), counter),
        None => format!("data_{}", counter),
    }
}

// Placeholder names may not carry braces or whitespace.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn path_parameter_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}

fn placeholder_name(text: &str) -> Option<&str> {
    text.strip_prefix("{{").and_then(|s| s.strip_suffix("}}"))
}

fn coerce_to_string(leaf: &Value) -> String {
    match leaf {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_tag(leaf: &Value) -> &'static str {
    match leaf {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
        Value::Array(_) | Value::Object(_) => "object",
    }
}

fn coerce_from_string(text: &str, kind: &str) -> Value {
    match kind {
        "number" => {
            if let Ok(i) = text.parse::<i64>() {
                Value::Number(i.into())
            } else if let Ok(u) = text.parse::<u64>() {
                Value::Number(u.into())
            } else {
                text.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(text.to_string()))
            }
        }
        "boolean" => match text {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(text.to_string()),
        },
        _ => Value::String(text.to_string()),
    }
}
