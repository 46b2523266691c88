//! # simpleschema-core — Foundational Types for SimpleSchema
//!
//! Defines the data model shared by the registry, the builder, and the
//! CLI. This crate depends on nothing internal and performs no I/O.
//!
//! ## Contents
//!
//! 1. **Schema nodes** ([`node`]). `SchemaNode` is an enum, so a node's
//!    `type` tag and its shape fields (properties, items,
//!    additionalProperties) cannot disagree. Objects keep properties and
//!    required names in ordered collections for reproducible output.
//!
//! 2. **Type expressions** ([`expr`]). The `<base> | <modifiers>` grammar,
//!    parsed without reference to any registry.
//!
//! 3. **Field definitions** ([`definition`]). The input tree of field
//!    names to expressions or nested mappings.
//!
//! 4. **Errors** ([`error`]). One `SchemaError` enum for the whole stack.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `simpleschema-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod definition;
pub mod error;
pub mod expr;
pub mod node;

// Re-export primary types for ergonomic imports.
pub use definition::{type_definitions_from_value, FieldDefinition, FieldDefinitions};
pub use error::SchemaError;
pub use expr::{ModifierMode, Modifiers, TypeExpression, TypeRef};
pub use node::{ObjectSchema, PrimitiveSchema, PrimitiveType, RawLiteral, SchemaNode};
