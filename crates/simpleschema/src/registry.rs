//! # Type Registry
//!
//! Named, pre-resolved object types that type expressions can reference by
//! name (`Person`, `[]Person`, `map[string]Person`).
//!
//! ## Load Semantics
//!
//! Each load call resolves every entry against the registry as it stood
//! *before* the call. Entries of the same call do not see each other, so a
//! type may only reference types committed by an earlier load. Resolved
//! entries are staged and committed as a unit: on any error nothing from
//! the call is kept. Committed entries replace existing ones of the same
//! name.
//!
//! ## Thread Safety
//!
//! `TypeRegistry` is `Send + Sync`. Lookups clone, so any number of
//! builders may read it concurrently; loading needs `&mut self`. See
//! [`SharedRegistry`](crate::SharedRegistry) for a lock-guarded handle.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use simpleschema_core::{
    type_definitions_from_value, FieldDefinitions, ObjectSchema, SchemaError, SchemaNode,
};

use crate::builder::SchemaBuilder;
use crate::options::BuildOptions;

/// Resolved named types, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    types: HashMap<String, ObjectSchema>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a type name → field mapping value with default options.
    ///
    /// # Errors
    ///
    /// - `SchemaError::InvalidDefinitionShape` if any entry is not a mapping.
    /// - Any error from building an entry (`UnknownType`,
    ///   `MalformedModifier`, `InvalidFieldShape`), reported with the field
    ///   path prefixed by the type name.
    pub fn load(&mut self, definitions: &Value) -> Result<(), SchemaError> {
        self.load_with_options(definitions, BuildOptions::default())
    }

    /// [`load`](Self::load) with explicit build options.
    pub fn load_with_options(
        &mut self,
        definitions: &Value,
        options: BuildOptions,
    ) -> Result<(), SchemaError> {
        let definitions = type_definitions_from_value(definitions)?;
        self.load_definitions_with_options(&definitions, options)
    }

    /// Load already-typed definitions with default options.
    pub fn load_definitions(
        &mut self,
        definitions: &BTreeMap<String, FieldDefinitions>,
    ) -> Result<(), SchemaError> {
        self.load_definitions_with_options(definitions, BuildOptions::default())
    }

    /// [`load_definitions`](Self::load_definitions) with explicit build options.
    pub fn load_definitions_with_options(
        &mut self,
        definitions: &BTreeMap<String, FieldDefinitions>,
        options: BuildOptions,
    ) -> Result<(), SchemaError> {
        let staged = {
            let builder = SchemaBuilder::new(self).with_options(options);
            let mut staged = Vec::with_capacity(definitions.len());
            for (name, fields) in definitions {
                let schema = builder.build_object(name, fields)?;
                tracing::trace!(type_name = %name, properties = schema.len(), "resolved type");
                staged.push((name.clone(), schema));
            }
            staged
        };

        let count = staged.len();
        for (name, schema) in staged {
            if self.types.insert(name.clone(), schema).is_some() {
                tracing::debug!(type_name = %name, "replaced existing type");
            }
        }
        tracing::debug!(loaded = count, total = self.types.len(), "committed type definitions");
        Ok(())
    }

    /// Look up a registered type.
    pub fn get(&self, name: &str) -> Option<&ObjectSchema> {
        self.types.get(name)
    }

    /// A fresh copy of a registered type as a schema node.
    pub fn resolve(&self, name: &str) -> Option<SchemaNode> {
        self.types.get(name).cloned().map(SchemaNode::Object)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
