//! # Shared Registry
//!
//! A cloneable, lock-guarded [`TypeRegistry`] handle for callers that load
//! and build from several threads.
//!
//! Builds take the read lock and run in parallel. Loads take the write
//! lock, so a load is never observed half-applied.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use simpleschema_core::{FieldDefinitions, ObjectSchema, SchemaError};

use crate::builder::SchemaBuilder;
use crate::options::BuildOptions;
use crate::registry::TypeRegistry;

/// Thread-safe registry handle. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<TypeRegistry>>,
    options: BuildOptions,
}

impl SharedRegistry {
    /// Wrap an existing registry.
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
            options: BuildOptions::default(),
        }
    }

    /// Use `options` for every load and build through this handle.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Load definitions under the write lock.
    pub fn load(&self, definitions: &Value) -> Result<(), SchemaError> {
        self.inner.write().load_with_options(definitions, self.options)
    }

    /// Load typed definitions under the write lock.
    pub fn load_definitions(
        &self,
        definitions: &BTreeMap<String, FieldDefinitions>,
    ) -> Result<(), SchemaError> {
        self.inner
            .write()
            .load_definitions_with_options(definitions, self.options)
    }

    /// Build under the read lock.
    pub fn build(&self, fields: &FieldDefinitions) -> Result<ObjectSchema, SchemaError> {
        let registry = self.inner.read();
        SchemaBuilder::new(&registry)
            .with_options(self.options)
            .build(fields)
    }

    /// Build a dynamically-shaped value under the read lock.
    pub fn build_value(&self, value: &Value) -> Result<ObjectSchema, SchemaError> {
        let registry = self.inner.read();
        SchemaBuilder::new(&registry)
            .with_options(self.options)
            .build_value(value)
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<String> {
        self.inner
            .read()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// A point-in-time copy of the registry.
    pub fn snapshot(&self) -> TypeRegistry {
        self.inner.read().clone()
    }
}
