use super::synthesizer::{SynthesisOptions, Synthesizer};
use super::variabilizer::{
    resolve_placeholders, substitute_path_params, variabilize, VariableScope,
    PATH_PLACEHOLDER_VALUE,
};
use crate::domain::collection::VariableDefinition;
use crate::domain::schema::SchemaNode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::collections::HashSet;

fn names(variables: &[VariableDefinition]) -> Vec<&str> {
    variables.iter().map(|v| v.name.as_str()).collect()
}

#[test]
fn test_object_leaves_become_placeholders() {
    let (templated, variables) = variabilize(&json!({
        "id": "1b4e28ba-2fa1-41d2-883f-0016d3cca427",
        "count": 3,
        "active": true
    }));

    assert_eq!(
        templated,
        json!({
            "id": "{{data_id_0}}",
            "count": "{{data_count_1}}",
            "active": "{{data_active_2}}"
        })
    );
    assert_eq!(
        variables,
        vec![
            VariableDefinition::new("data_id_0", "1b4e28ba-2fa1-41d2-883f-0016d3cca427", "string"),
            VariableDefinition::new("data_count_1", "3", "number"),
            VariableDefinition::new("data_active_2", "true", "boolean"),
        ]
    );
}

#[test]
fn test_equal_values_get_distinct_variables() {
    let (templated, variables) = variabilize(&json!({ "a": 42, "b": 42, "c": { "a": 42 } }));

    assert_eq!(variables.len(), 3);
    let unique: HashSet<&str> = names(&variables).into_iter().collect();
    assert_eq!(unique.len(), 3);
    assert_ne!(templated["a"], templated["b"]);
    assert_ne!(templated["a"], templated["c"]["a"]);
    assert!(variables.iter().all(|v| v.value == "42"));
}

#[test]
fn test_array_elements_use_enclosing_key() {
    let (templated, variables) = variabilize(&json!({
        "tags": ["red", "red"],
        "items": [{ "sku": "A1" }, { "sku": "B2" }]
    }));

    assert_eq!(
        templated,
        json!({
            "tags": ["{{data_tags_0}}", "{{data_tags_1}}"],
            "items": [{ "sku": "{{data_sku_2}}" }, { "sku": "{{data_sku_3}}" }]
        })
    );
    assert_eq!(
        names(&variables),
        vec!["data_tags_0", "data_tags_1", "data_sku_2", "data_sku_3"]
    );
}

#[test]
fn test_nulls_pass_through_uncounted() {
    let (templated, variables) = variabilize(&json!({ "gone": null, "kept": "x", "list": [null] }));

    assert_eq!(
        templated,
        json!({ "gone": null, "kept": "{{data_kept_0}}", "list": [null] })
    );
    assert_eq!(variables.len(), 1);
}

#[test]
fn test_root_level_leaves_and_arrays() {
    let (templated, variables) = variabilize(&json!(7));
    assert_eq!(templated, json!("{{data_0}}"));
    assert_eq!(variables, vec![VariableDefinition::new("data_0", "7", "number")]);

    let (templated, _) = variabilize(&json!(["a", ["b"]]));
    assert_eq!(templated, json!(["{{data_0}}", ["{{data_1}}"]]));
}

#[test]
fn test_keys_are_sanitised_in_names() {
    let (templated, _) = variabilize(&json!({ "first name": "Ada", "x{y}": 1 }));
    assert_eq!(
        templated,
        json!({ "first name": "{{data_first_name_0}}", "x{y}": "{{data_x_y__1}}" })
    );
}

#[test]
fn test_key_order_is_preserved() {
    let (templated, _) = variabilize(&json!({ "zeta": 1, "alpha": 2, "mid": 3 }));
    let keys: Vec<&String> = templated.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_counter_continues_across_calls_in_one_scope() {
    let mut scope = VariableScope::new();
    let first = scope.variabilize(&json!({ "a": 1 }));
    let second = scope.variabilize(&json!({ "a": 1 }));

    assert_eq!(first, json!({ "a": "{{data_a_0}}" }));
    assert_eq!(second, json!({ "a": "{{data_a_1}}" }));
    assert_eq!(scope.counter(), 2);
    assert_eq!(scope.placeholder("data_a_1"), Some("{{data_a_1}}"));
}

#[test]
fn test_starting_counter_offsets_names() {
    let mut scope = VariableScope::starting_at(10);
    assert_eq!(scope.variabilize(&json!({ "a": 1 })), json!({ "a": "{{data_a_10}}" }));
}

#[test]
fn test_round_trip_reconstructs_value() {
    let original = json!({
        "id": 17,
        "ratio": 0.25,
        "big": 18446744073709551615u64,
        "negative": -3,
        "name": "Ada",
        "numeric_text": "123",
        "flags": [true, false],
        "nested": { "empty": null, "list": [{ "deep": "yes" }] }
    });

    let (templated, variables) = variabilize(&original);
    assert_eq!(resolve_placeholders(&templated, &variables), original);
}

#[test]
fn test_round_trip_on_synthesized_values() {
    let node = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "id": { "type": "string", "format": "uuid" },
            "price": { "type": "number", "minimum": 1, "maximum": 99 },
            "qty": { "type": "integer" },
            "gift": { "type": "boolean" },
            "lines": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "note": { "type": "string" }, "when": { "type": "string", "format": "date-time" } }
                }
            }
        }
    }))
    .unwrap();

    let mut synth = Synthesizer::seeded(1234);
    for _ in 0..50 {
        let value = synth.synthesize(&node);
        let (templated, variables) = variabilize(&value);
        assert_eq!(resolve_placeholders(&templated, &variables), value);
    }
}

#[test]
fn test_unknown_placeholders_are_left_alone() {
    let resolved = resolve_placeholders(&json!({ "a": "{{missing}}", "b": "plain" }), &[]);
    assert_eq!(resolved, json!({ "a": "{{missing}}", "b": "plain" }));
}

#[test]
fn test_path_parameters_are_deduplicated() {
    let (segments, variables) = substitute_path_params(&["users", "{id}", "posts", "{id}"]);

    assert_eq!(segments, vec!["users", "{{path_id}}", "posts", "{{path_id}}"]);
    assert_eq!(
        variables,
        vec![VariableDefinition::new("path_id", PATH_PLACEHOLDER_VALUE, "string")]
    );
}

#[test]
fn test_path_pass_ignores_partial_braces() {
    let (segments, variables) = substitute_path_params(&["files", "{name}.json", "{}", "v{n}"]);
    assert_eq!(segments, vec!["files", "{name}.json", "{}", "v{n}"]);
    assert!(variables.is_empty());
}

#[test]
fn test_path_and_leaf_variables_share_a_scope() {
    let mut scope = VariableScope::new();
    scope.substitute_path_segments(&["orders", "{orderId}"], "example_value");
    scope.variabilize(&json!({ "orderId": "abc" }));
    scope.substitute_path_segments(&["orders", "{orderId}", "lines"], "example_value");

    assert_eq!(names(scope.variables()), vec!["path_orderId", "data_orderId_0"]);
    assert!(scope.contains("path_orderId"));
}

#[test]
fn test_concrete_scenario_both_branches() {
    let node = SchemaNode::from_value(&json!({
        "type": "object",
        "required": ["id"],
        "properties": {
            "id": { "type": "string", "format": "uuid" },
            "note": { "type": "string" }
        }
    }))
    .unwrap();

    for (probability, expect_note) in [(1.0, true), (0.0, false)] {
        let mut synth = Synthesizer::with_options(
            StdRng::seed_from_u64(31),
            SynthesisOptions {
                optional_property_probability: probability,
                ..SynthesisOptions::default()
            },
        );
        let (templated, variables) = variabilize(&synth.synthesize(&node));

        assert!(uuid::Uuid::parse_str(&variables[0].value).is_ok());
        assert_eq!(variables[0].name, "data_id_0");
        if expect_note {
            assert_eq!(
                templated,
                json!({ "id": "{{data_id_0}}", "note": "{{data_note_1}}" })
            );
            assert_eq!(variables.len(), 2);
            assert_eq!(variables[1].kind, "string");
        } else {
            assert_eq!(templated, json!({ "id": "{{data_id_0}}" }));
            assert_eq!(variables.len(), 1);
        }
    }
}

#[test]
fn test_independent_scopes_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let mut scope = VariableScope::new();
                for _ in 0..100 {
                    scope.variabilize(&json!({ "v": 1 }));
                }
                scope.into_variables()
            })
        })
        .collect();

    for handle in handles {
        let variables = handle.join().unwrap();
        assert_eq!(variables.len(), 100);
        assert_eq!(variables[0].name, "data_v_0");
        assert_eq!(variables[99].name, "data_v_99");
    }
}
