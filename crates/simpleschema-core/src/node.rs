//! # Schema Nodes
//!
//! The recursive output tree produced by the builder, and its rendering
//! into the JSON-Schema shape consumed by Kubernetes-style API validators.
//!
//! ## Determinism
//!
//! Properties live in a `BTreeMap` and required names in a `BTreeSet`, so
//! the rendered output is byte-for-byte reproducible regardless of the
//! iteration order of the source definitions. Downstream systems diff the
//! generated schema across runs; a reordered `required` list would show
//! up as a spurious change.
//!
//! ## Ownership
//!
//! Every node is owned by exactly one parent. Reusing a named type means
//! cloning its `ObjectSchema`, never sharing it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::error::SchemaError;

/// A primitive type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `float`
    Float,
}

impl PrimitiveType {
    /// All primitive types, in declaration order.
    pub const ALL: [PrimitiveType; 4] = [
        PrimitiveType::String,
        PrimitiveType::Integer,
        PrimitiveType::Boolean,
        PrimitiveType::Float,
    ];

    /// The type name as written in a type expression and in the rendered schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Float => "float",
        }
    }

    /// Exact-match lookup of a primitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uninterpreted default literal, carried byte-for-byte from the type
/// expression into the rendered schema.
///
/// The author is responsible for quoting: `default=18` is the number 18,
/// `default="18"` is the string "18".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawLiteral(String);

impl RawLiteral {
    /// Wrap literal text without inspecting it.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The literal text as authored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The literal as an embeddable JSON fragment. Serializing it writes
    /// the authored text unchanged: `1e2` stays `1e2`, `1.50` stays `1.50`,
    /// and integers wider than 64 bits keep every digit.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidDefaultLiteral` if the text is not a
    /// valid JSON document.
    pub fn to_raw_json(&self) -> Result<Box<RawValue>, SchemaError> {
        RawValue::from_string(self.0.clone()).map_err(|e| SchemaError::InvalidDefaultLiteral {
            literal: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for RawLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A primitive leaf, optionally carrying a default literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveSchema {
    /// The primitive type tag.
    pub kind: PrimitiveType,
    /// Raw default literal, present only when the expression had `default=`.
    pub default: Option<RawLiteral>,
}

/// An object node: named properties plus the set of required names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectSchema {
    properties: BTreeMap<String, SchemaNode>,
    required: BTreeSet<String>,
}

impl ObjectSchema {
    /// An object with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property, returning the previous node if any.
    pub fn insert_property(&mut self, name: impl Into<String>, node: SchemaNode) -> Option<SchemaNode> {
        self.properties.insert(name.into(), node)
    }

    /// Mark an existing property as required.
    ///
    /// Returns `false` (and records nothing) if no property of that name
    /// exists, so `required` is always a subset of `properties`.
    pub fn mark_required(&mut self, name: &str) -> bool {
        if !self.properties.contains_key(name) {
            return false;
        }
        self.required.insert(name.to_string());
        true
    }

    /// All properties, ordered by name.
    pub fn properties(&self) -> &BTreeMap<String, SchemaNode> {
        &self.properties
    }

    /// Look up one property.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Mutable access to one property.
    pub fn property_mut(&mut self, name: &str) -> Option<&mut SchemaNode> {
        self.properties.get_mut(name)
    }

    /// Required property names in ascending order.
    pub fn required(&self) -> Vec<&str> {
        self.required.iter().map(String::as_str).collect()
    }

    /// Whether `name` is in the required set.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the object has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Render as a JSON-Schema object value.
    ///
    /// See [`SchemaNode::to_json_value`].
    pub fn to_json_value(&self) -> Result<Value, SchemaError> {
        check_defaults(self.properties.values())?;
        serde_json::to_value(self).map_err(render_error)
    }
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// An object with named properties.
    Object(ObjectSchema),
    /// An array; every element matches the boxed node.
    Array(Box<SchemaNode>),
    /// A string-keyed map; every value matches the boxed node.
    Map(Box<SchemaNode>),
    /// A primitive leaf.
    Primitive(PrimitiveSchema),
}

impl SchemaNode {
    /// A primitive leaf with no default.
    pub fn primitive(kind: PrimitiveType) -> Self {
        Self::Primitive(PrimitiveSchema { kind, default: None })
    }

    /// An array whose elements match `items`.
    pub fn array_of(items: SchemaNode) -> Self {
        Self::Array(Box::new(items))
    }

    /// A string-keyed map whose values match `values`.
    pub fn map_of(values: SchemaNode) -> Self {
        Self::Map(Box::new(values))
    }

    /// The `type` tag this node renders with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) | Self::Map(_) => "object",
            Self::Array(_) => "array",
            Self::Primitive(p) => p.kind.as_str(),
        }
    }

    /// The object payload, if this is an object node.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The element node, if this is an array node.
    pub fn items(&self) -> Option<&SchemaNode> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The value node, if this is a map node.
    pub fn additional_properties(&self) -> Option<&SchemaNode> {
        match self {
            Self::Map(values) => Some(values),
            _ => None,
        }
    }

    /// The primitive payload, if this is a primitive node.
    pub fn as_primitive(&self) -> Option<&PrimitiveSchema> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// The raw default literal, if any.
    pub fn default_literal(&self) -> Option<&RawLiteral> {
        self.as_primitive().and_then(|p| p.default.as_ref())
    }

    /// Render as a JSON-Schema value for structural inspection.
    ///
    /// Defaults pass through `serde_json::Value`, so numeric literals take
    /// its representation (`1e2` becomes `100.0`). Serialize the node
    /// directly for byte-exact output.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidDefaultLiteral` if any default literal
    /// in the tree is not valid JSON.
    pub fn to_json_value(&self) -> Result<Value, SchemaError> {
        check_defaults(std::iter::once(self))?;
        serde_json::to_value(self).map_err(render_error)
    }
}

/// Validate every default literal reachable from `roots`.
fn check_defaults<'a>(
    roots: impl IntoIterator<Item = &'a SchemaNode>,
) -> Result<(), SchemaError> {
    let mut stack: Vec<&SchemaNode> = roots.into_iter().collect();
    while let Some(node) = stack.pop() {
        match node {
            SchemaNode::Object(obj) => stack.extend(obj.properties.values()),
            SchemaNode::Array(inner) | SchemaNode::Map(inner) => stack.push(inner),
            SchemaNode::Primitive(p) => {
                if let Some(default) = &p.default {
                    default.to_raw_json()?;
                }
            }
        }
    }
    Ok(())
}

fn render_error(e: serde_json::Error) -> SchemaError {
    SchemaError::InvalidDefaultLiteral {
        literal: String::new(),
        reason: e.to_string(),
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(obj: ObjectSchema) -> Self {
        Self::Object(obj)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object(obj) => obj.serialize(serializer),
            Self::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", &**items)?;
                map.end()
            }
            Self::Map(values) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("additionalProperties", &**values)?;
                map.end()
            }
            Self::Primitive(p) => {
                let default = p
                    .default
                    .as_ref()
                    .map(RawLiteral::to_raw_json)
                    .transpose()
                    .map_err(S::Error::custom)?;
                let mut map = serializer.serialize_map(Some(1 + usize::from(default.is_some())))?;
                map.serialize_entry("type", p.kind.as_str())?;
                if let Some(raw) = &default {
                    map.serialize_entry("default", raw)?;
                }
                map.end()
            }
        }
    }
}

/// `properties` and `required` are omitted when empty.
impl Serialize for ObjectSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1
            + usize::from(!self.properties.is_empty())
            + usize::from(!self.required.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", "object")?;
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &self.properties)?;
        }
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        map.end()
    }
}
