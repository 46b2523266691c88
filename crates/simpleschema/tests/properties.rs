//! Property tests for the builder's structural guarantees.

use proptest::prelude::*;
use simpleschema::{FieldDefinitions, PrimitiveType, SchemaBuilder, SchemaNode, TypeRegistry};

/// Unwrap `depth` layers with `step`, returning the innermost node.
fn peel<'a>(
    mut node: &'a SchemaNode,
    depth: usize,
    step: fn(&SchemaNode) -> Option<&SchemaNode>,
) -> &'a SchemaNode {
    for layer in 0..depth {
        node = step(node).unwrap_or_else(|| panic!("missing container layer {layer}"));
    }
    node
}

#[test]
fn array_nesting_depths() {
    let registry = TypeRegistry::new();
    for n in 1..=3 {
        let expr = format!("{}string", "[]".repeat(n));
        let (node, _) = SchemaBuilder::new(&registry)
            .resolve_expression("f", &expr)
            .unwrap();
        let leaf = peel(&node, n, SchemaNode::items);
        assert_eq!(leaf, &SchemaNode::primitive(PrimitiveType::String), "depth {n}");
    }
}

#[test]
fn map_nesting_depths() {
    let registry = TypeRegistry::new();
    for n in 1..=3 {
        let expr = format!("{}integer", "map[string]".repeat(n));
        let (node, _) = SchemaBuilder::new(&registry)
            .resolve_expression("f", &expr)
            .unwrap();
        let leaf = peel(&node, n, SchemaNode::additional_properties);
        assert_eq!(leaf, &SchemaNode::primitive(PrimitiveType::Integer), "depth {n}");
    }
}

fn field_expression() -> impl Strategy<Value = String> {
    let base = prop_oneof![
        Just("string"),
        Just("integer"),
        Just("boolean"),
        Just("float"),
        Just("[]string"),
        Just("map[string]integer"),
        Just("[]map[string]boolean"),
    ];
    (base, any::<bool>()).prop_map(|(base, required)| {
        if required {
            format!("{base} | required=true")
        } else {
            base.to_string()
        }
    })
}

proptest! {
    /// Properties mirror the input keys; required names are sorted,
    /// unique, a subset of properties, and exactly the marked fields.
    #[test]
    fn properties_and_required_match_input(
        fields in prop::collection::btree_map("[a-z][a-zA-Z0-9]{0,8}", field_expression(), 0..16)
    ) {
        let defs: FieldDefinitions = fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let registry = TypeRegistry::new();
        let obj = SchemaBuilder::new(&registry).build(&defs).unwrap();

        let keys: Vec<&str> = obj.properties().keys().map(String::as_str).collect();
        let expected_keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        prop_assert_eq!(keys, expected_keys);

        let required = obj.required();
        prop_assert!(required.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(required.iter().all(|name| obj.property(name).is_some()));

        let expected_required: Vec<&str> = fields
            .iter()
            .filter(|(_, v)| v.ends_with("required=true"))
            .map(|(k, _)| k.as_str())
            .collect();
        prop_assert_eq!(required, expected_required);
    }

    /// Arbitrary container nesting over a registered type always
    /// terminates in a copy of that type.
    #[test]
    fn nested_named_type_resolves(layers in prop::collection::vec(any::<bool>(), 1..8)) {
        let mut registry = TypeRegistry::new();
        registry
            .load(&serde_json::json!({"Person": {"name": "string"}}))
            .unwrap();

        let expr: String = layers
            .iter()
            .map(|&is_map| if is_map { "map[string]" } else { "[]" })
            .collect::<String>()
            + "Person";
        let (node, _) = SchemaBuilder::new(&registry).resolve_expression("f", &expr).unwrap();

        let mut cur = &node;
        for &is_map in &layers {
            cur = if is_map {
                cur.additional_properties().unwrap()
            } else {
                cur.items().unwrap()
            };
        }
        let expected = registry.resolve("Person");
        prop_assert_eq!(Some(cur), expected.as_ref());
    }
}
