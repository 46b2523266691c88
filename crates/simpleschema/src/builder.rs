//! # Schema Builder
//!
//! Recursive assembly of an object schema from a field definition mapping.
//!
//! For each field: a nested mapping recurses into another object; a string
//! is parsed as a type expression, its base type classified (primitive,
//! `[]`, `map[string]`, registered name), and its modifiers applied.
//!
//! ## Failure Semantics
//!
//! The first error aborts the whole build. No partial schema is returned.
//!
//! ## Named Types
//!
//! A registered name resolves to a clone of the registry entry. Each use
//! site owns its copy, so decorating one occurrence never leaks into
//! another.

use serde_json::Value;
use simpleschema_core::definition::join_path;
use simpleschema_core::{
    FieldDefinition, FieldDefinitions, Modifiers, ObjectSchema, SchemaError, SchemaNode,
    TypeExpression, TypeRef,
};

use crate::options::BuildOptions;
use crate::registry::TypeRegistry;

/// Builds schemas against a borrowed, read-only registry.
///
/// Holding only `&TypeRegistry`, any number of builders may run in
/// parallel over the same registry.
#[derive(Debug, Clone, Copy)]
pub struct SchemaBuilder<'r> {
    registry: &'r TypeRegistry,
    options: BuildOptions,
}

impl<'r> SchemaBuilder<'r> {
    /// A builder with default (lenient) options.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            options: BuildOptions::default(),
        }
    }

    /// Replace the build options.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the object schema described by `fields`.
    ///
    /// The returned object's property names equal the input's field names,
    /// and its required list holds every field marked `required=true`, in
    /// ascending order.
    ///
    /// # Errors
    ///
    /// - `SchemaError::UnknownType` if any base token cannot be classified.
    /// - `SchemaError::MalformedModifier` if a modifier clause is invalid,
    ///   or a `default` is attached to a non-primitive type.
    pub fn build(&self, fields: &FieldDefinitions) -> Result<ObjectSchema, SchemaError> {
        self.build_object("", fields)
    }

    /// Build from a dynamically-shaped value (e.g. parsed YAML).
    ///
    /// # Errors
    ///
    /// As [`build`](Self::build), plus `SchemaError::InvalidFieldShape`
    /// for values that are neither strings nor mappings.
    pub fn build_value(&self, value: &Value) -> Result<ObjectSchema, SchemaError> {
        let fields = FieldDefinitions::from_value(value)?;
        self.build(&fields)
    }

    /// Resolve a single type expression for `field`.
    ///
    /// Returns the node together with the parsed modifiers; `required` is
    /// a property of the enclosing object, so callers building an object
    /// consult it themselves.
    pub fn resolve_expression(
        &self,
        field: &str,
        raw: &str,
    ) -> Result<(SchemaNode, Modifiers), SchemaError> {
        let expr = TypeExpression::parse(field, raw, self.options.modifier_mode())?;
        for pair in &expr.ignored {
            tracing::warn!(field, modifier = %pair, "ignoring unrecognized modifier");
        }

        let mut node = self.resolve_type(field, &expr.base)?;

        if let Some(default) = &expr.modifiers.default {
            match &mut node {
                SchemaNode::Primitive(p) => p.default = Some(default.clone()),
                other => {
                    return Err(SchemaError::MalformedModifier {
                        field: field.to_string(),
                        modifier: format!("default={default}"),
                        reason: format!(
                            "default is only supported on primitive types, not {} '{}'",
                            other.type_name(),
                            expr.base
                        ),
                    });
                }
            }
        }

        Ok((node, expr.modifiers))
    }

    /// Assemble one object, reporting field errors under `path`.
    pub(crate) fn build_object(
        &self,
        path: &str,
        fields: &FieldDefinitions,
    ) -> Result<ObjectSchema, SchemaError> {
        let mut obj = ObjectSchema::new();
        let mut required = Vec::new();

        for (name, def) in fields {
            let field_path = join_path(path, name);
            let node = match def {
                FieldDefinition::Nested(inner) => {
                    SchemaNode::Object(self.build_object(&field_path, inner)?)
                }
                FieldDefinition::Expression(raw) => {
                    let (node, modifiers) = self.resolve_expression(&field_path, raw)?;
                    if modifiers.required {
                        required.push(name.as_str());
                    }
                    node
                }
            };
            obj.insert_property(name.clone(), node);
        }

        for name in required {
            let marked = obj.mark_required(name);
            debug_assert!(marked, "required field {name} has no property");
        }

        tracing::trace!(
            path,
            properties = obj.len(),
            required = obj.required().len(),
            "assembled object schema"
        );
        Ok(obj)
    }

    /// Classify a parsed base type into a node.
    ///
    /// Containers are unwrapped iteratively: the leaf is resolved first,
    /// then wrapped outward layer by layer.
    fn resolve_type(&self, field: &str, ty: &TypeRef) -> Result<SchemaNode, SchemaError> {
        let mut layers = Vec::new();
        let mut cur = ty;
        let leaf = loop {
            match cur {
                TypeRef::Array(inner) | TypeRef::Map(inner) => {
                    layers.push(cur);
                    cur = &**inner;
                }
                TypeRef::Primitive(p) => break SchemaNode::primitive(*p),
                TypeRef::Named(name) => {
                    break self.registry.resolve(name).ok_or_else(|| {
                        SchemaError::UnknownType {
                            field: field.to_string(),
                            token: name.clone(),
                        }
                    })?;
                }
            }
        };

        Ok(layers.into_iter().rev().fold(leaf, |inner, layer| match layer {
            TypeRef::Map(_) => SchemaNode::map_of(inner),
            _ => SchemaNode::array_of(inner),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use simpleschema_core::{PrimitiveType, RawLiteral};

    fn registry_with_person() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .load(&json!({"Person": {"name": "string", "age": "integer"}}))
            .unwrap();
        registry
    }

    #[test]
    fn primitives() {
        let registry = TypeRegistry::new();
        let fields = FieldDefinitions::new()
            .with("s", "string")
            .with("i", "integer")
            .with("b", "boolean")
            .with("f", "float");
        let obj = SchemaBuilder::new(&registry).build(&fields).unwrap();
        assert_eq!(obj.property("s"), Some(&SchemaNode::primitive(PrimitiveType::String)));
        assert_eq!(obj.property("i"), Some(&SchemaNode::primitive(PrimitiveType::Integer)));
        assert_eq!(obj.property("b"), Some(&SchemaNode::primitive(PrimitiveType::Boolean)));
        assert_eq!(obj.property("f"), Some(&SchemaNode::primitive(PrimitiveType::Float)));
        assert!(obj.required().is_empty());
    }

    #[test]
    fn required_fields_are_sorted() {
        let registry = TypeRegistry::new();
        let fields = FieldDefinitions::new()
            .with("zeta", "string | required=true")
            .with("alpha", "integer | required=true")
            .with("mid", "boolean | required=false");
        let obj = SchemaBuilder::new(&registry).build(&fields).unwrap();
        assert_eq!(obj.required(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn nested_mapping_becomes_object() {
        let registry = TypeRegistry::new();
        let fields = FieldDefinitions::new().with(
            "contacts",
            FieldDefinitions::new().with("email", "string | required=true"),
        );
        let obj = SchemaBuilder::new(&registry).build(&fields).unwrap();
        let contacts = obj.property("contacts").and_then(SchemaNode::as_object).unwrap();
        assert_eq!(contacts.required(), vec!["email"]);
        assert!(obj.required().is_empty());
    }

    #[test]
    fn named_type_is_cloned_from_registry() {
        let registry = registry_with_person();
        let (node, _) = SchemaBuilder::new(&registry)
            .resolve_expression("owner", "Person")
            .unwrap();
        assert_eq!(node, registry.resolve("Person").unwrap());
    }

    #[test]
    fn unknown_type_names_field_and_token() {
        let registry = TypeRegistry::new();
        let fields = FieldDefinitions::new()
            .with("outer", FieldDefinitions::new().with("inner", "[]unknownType"));
        let err = SchemaBuilder::new(&registry).build(&fields).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                field: "outer.inner".to_string(),
                token: "unknownType".to_string(),
            }
        );
    }

    #[test]
    fn unknown_type_never_falls_back() {
        let registry = TypeRegistry::new();
        for raw in ["", "String", "map[int]string", "[]", "map[string]", "list<string>"] {
            let result = SchemaBuilder::new(&registry).resolve_expression("f", raw);
            assert!(
                matches!(result, Err(SchemaError::UnknownType { .. })),
                "expected UnknownType for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn default_attaches_to_primitive() {
        let registry = TypeRegistry::new();
        let (node, modifiers) = SchemaBuilder::new(&registry)
            .resolve_expression("age", "integer | default=18")
            .unwrap();
        assert_eq!(node.default_literal(), Some(&RawLiteral::new("18")));
        assert!(!modifiers.required);
    }

    #[test]
    fn default_on_container_is_rejected() {
        let registry = registry_with_person();
        for raw in ["[]string | default=[]", "map[string]integer | default={}", "Person | default={}"] {
            let err = SchemaBuilder::new(&registry)
                .resolve_expression("f", raw)
                .unwrap_err();
            assert!(
                matches!(err, SchemaError::MalformedModifier { .. }),
                "expected MalformedModifier for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn strict_options_reject_unknown_modifier() {
        let registry = TypeRegistry::new();
        let fields = FieldDefinitions::new().with("name", "string | pattern=abc");

        let lenient = SchemaBuilder::new(&registry).build(&fields).unwrap();
        assert_eq!(lenient.property("name"), Some(&SchemaNode::primitive(PrimitiveType::String)));

        let err = SchemaBuilder::new(&registry)
            .with_options(BuildOptions::strict())
            .build(&fields)
            .unwrap_err();
        assert!(matches!(err, SchemaError::MalformedModifier { ref field, .. } if field == "name"));
    }

    #[test]
    fn build_value_reports_shape_errors() {
        let registry = TypeRegistry::new();
        let err = SchemaBuilder::new(&registry)
            .build_value(&json!({"count": 3}))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidFieldShape {
                field: "count".to_string()
            }
        );
    }

    #[test]
    fn options_reflect_with_options() {
        let registry = TypeRegistry::new();
        assert_eq!(SchemaBuilder::new(&registry).options(), &BuildOptions::default());
        let builder = SchemaBuilder::new(&registry).with_options(BuildOptions::strict());
        assert!(builder.options().strict_modifiers);
    }

    #[test]
    fn empty_mapping_builds_empty_object() {
        let registry = TypeRegistry::new();
        let obj = SchemaBuilder::new(&registry)
            .build(&FieldDefinitions::new())
            .unwrap();
        assert!(obj.is_empty());
    }
}
