//! # simpleschema — Type Registry & Schema Builder
//!
//! Turns compact type expressions into JSON-Schema trees for
//! Kubernetes-style API validators:
//!
//! ```text
//! name:     "string | required=true"
//! age:      "integer | default=18"
//! tags:     "[]string"
//! labels:   "map[string]string"
//! friends:  "[]Person"
//! ```
//!
//! ## Registry (`registry`)
//!
//! [`TypeRegistry`] holds named object types. Each load resolves its
//! entries immediately, against the types committed by earlier loads, and
//! commits them as a unit.
//!
//! ## Builder (`builder`)
//!
//! [`SchemaBuilder`] recursively assembles an [`ObjectSchema`] from a
//! [`FieldDefinitions`] mapping, cloning registry entries for every named
//! reference. Builds are pure and take the registry by shared reference.
//!
//! ## Crate Policy
//!
//! - Depends only on `simpleschema-core` internally.
//! - No I/O. Reading definition files and writing schemas belongs to the
//!   caller (see the `simpleschema` CLI).
//! - Output is deterministic: properties and required names are ordered.

pub mod builder;
pub mod options;
pub mod registry;
pub mod shared;

pub use builder::SchemaBuilder;
pub use options::BuildOptions;
pub use registry::TypeRegistry;
pub use shared::SharedRegistry;

pub use simpleschema_core::{
    FieldDefinition, FieldDefinitions, ObjectSchema, PrimitiveType, RawLiteral, SchemaError,
    SchemaNode,
};
