//! # Field Definitions
//!
//! The input side: a mapping from field name to either a type expression
//! or a nested mapping describing an inline object.
//!
//! Definitions can be constructed directly, deserialized with serde, or
//! converted from an arbitrary `serde_json::Value` with
//! [`FieldDefinitions::from_value`], which reports shape errors with the
//! offending field path instead of a generic deserialization failure.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Path used in errors for the root mapping itself.
pub const ROOT_PATH: &str = "<root>";

/// One field's definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDefinition {
    /// A type expression such as `"[]string | required=true"`.
    Expression(String),
    /// An inline anonymous object.
    Nested(FieldDefinitions),
}

impl From<&str> for FieldDefinition {
    fn from(expr: &str) -> Self {
        Self::Expression(expr.to_string())
    }
}

impl From<String> for FieldDefinition {
    fn from(expr: String) -> Self {
        Self::Expression(expr)
    }
}

impl From<FieldDefinitions> for FieldDefinition {
    fn from(nested: FieldDefinitions) -> Self {
        Self::Nested(nested)
    }
}

/// A field name → definition mapping. Field names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldDefinitions(BTreeMap<String, FieldDefinition>);

impl FieldDefinitions {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous definition of the same name.
    pub fn insert(&mut self, name: impl Into<String>, def: impl Into<FieldDefinition>) {
        self.0.insert(name.into(), def.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, def: impl Into<FieldDefinition>) -> Self {
        self.insert(name, def);
        self
    }

    /// Look up one field.
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.0.get(name)
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldDefinition> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert a dynamically-shaped value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidFieldShape` if the value is not an
    /// object, or any field is neither a string nor an object.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        Self::from_value_at("", value)
    }

    /// Like [`from_value`](Self::from_value), with `path` prefixed to the
    /// field names reported in errors.
    pub fn from_value_at(path: &str, value: &Value) -> Result<Self, SchemaError> {
        let Value::Object(map) = value else {
            return Err(SchemaError::InvalidFieldShape {
                field: if path.is_empty() { ROOT_PATH.to_string() } else { path.to_string() },
            });
        };

        let mut fields = FieldDefinitions::new();
        for (name, v) in map {
            let field_path = join_path(path, name);
            let def = match v {
                Value::String(expr) => FieldDefinition::Expression(expr.clone()),
                Value::Object(_) => FieldDefinition::Nested(Self::from_value_at(&field_path, v)?),
                _ => return Err(SchemaError::InvalidFieldShape { field: field_path }),
            };
            fields.insert(name.clone(), def);
        }
        Ok(fields)
    }
}

impl<'a> IntoIterator for &'a FieldDefinitions {
    type Item = (&'a String, &'a FieldDefinition);
    type IntoIter = btree_map::Iter<'a, String, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, D: Into<FieldDefinition>> FromIterator<(K, D)> for FieldDefinitions {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut fields = FieldDefinitions::new();
        for (name, def) in iter {
            fields.insert(name, def);
        }
        fields
    }
}

/// Convert a type name → field mapping value into typed definitions.
///
/// # Errors
///
/// Returns `SchemaError::InvalidDefinitionShape` naming the first type
/// whose value is not a mapping (or [`ROOT_PATH`] if `value` itself is not
/// a mapping), and `SchemaError::InvalidFieldShape` for bad fields inside
/// a type, reported as `<Type>.<field>`.
pub fn type_definitions_from_value(
    value: &Value,
) -> Result<BTreeMap<String, FieldDefinitions>, SchemaError> {
    let Value::Object(map) = value else {
        return Err(SchemaError::InvalidDefinitionShape {
            type_name: ROOT_PATH.to_string(),
        });
    };

    let mut types = BTreeMap::new();
    for (name, v) in map {
        if !v.is_object() {
            return Err(SchemaError::InvalidDefinitionShape {
                type_name: name.clone(),
            });
        }
        types.insert(name.clone(), FieldDefinitions::from_value_at(name, v)?);
    }
    Ok(types)
}

/// Join a dotted field path.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_nested() {
        let fields = FieldDefinitions::from_value(&json!({
            "name": "string",
            "contacts": {"email": "string"}
        }))
        .unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("name"), Some(&FieldDefinition::from("string")));
        match fields.get("contacts") {
            Some(FieldDefinition::Nested(inner)) => {
                assert_eq!(inner.get("email"), Some(&FieldDefinition::from("string")));
            }
            other => panic!("expected nested mapping, got {other:?}"),
        }
    }

    #[test]
    fn from_value_rejects_numbers_with_path() {
        let err = FieldDefinitions::from_value(&json!({"outer": {"count": 3}})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidFieldShape {
                field: "outer.count".to_string()
            }
        );
    }

    #[test]
    fn from_value_rejects_non_object_root() {
        let err = FieldDefinitions::from_value(&json!(["string"])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidFieldShape {
                field: ROOT_PATH.to_string()
            }
        );
    }

    #[test]
    fn deserialize_untagged() {
        let fields: FieldDefinitions =
            serde_json::from_value(json!({"a": "integer", "b": {"c": "[]string"}})).unwrap();
        let expected = FieldDefinitions::new()
            .with("a", "integer")
            .with("b", FieldDefinitions::new().with("c", "[]string"));
        assert_eq!(fields, expected);
    }

    #[test]
    fn type_definitions_reject_bare_number() {
        let err = type_definitions_from_value(&json!({"invalid": 123})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidDefinitionShape {
                type_name: "invalid".to_string()
            }
        );
    }

    #[test]
    fn type_definitions_report_field_paths() {
        let err =
            type_definitions_from_value(&json!({"Person": {"name": "string", "age": null}}))
                .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidFieldShape {
                field: "Person.age".to_string()
            }
        );
    }

    #[test]
    fn collect_from_pairs() {
        let fields: FieldDefinitions = [("x", "float"), ("y", "float")].into_iter().collect();
        assert_eq!(fields.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(), ["x", "y"]);
    }
}
