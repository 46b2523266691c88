//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error type shared by the registry and the builder. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Every error is fail-fast: a failed `build` returns no schema and a
//!   failed registry load leaves the registry as it was.
//! - Errors name the offending field path and/or type name so the author
//!   can correct the definition and retry the whole call.
//! - Nothing is downgraded. An unknown type never resolves to a
//!   best-guess primitive.

use thiserror::Error;

/// Top-level error type for schema construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A base-type token matched no primitive, container prefix, or
    /// registered type name.
    #[error("unknown type '{token}' referenced by field '{field}'")]
    UnknownType {
        /// Dotted path of the field that referenced the token.
        field: String,
        /// The unrecognized token (after container prefixes were stripped).
        token: String,
    },

    /// A registry entry's value is not a field definition mapping.
    #[error("definition of type '{type_name}' must be a mapping of field names to type expressions")]
    InvalidDefinitionShape {
        /// Name of the offending type.
        type_name: String,
    },

    /// A field value is neither a type expression string nor a nested mapping.
    #[error("field '{field}' must be a type expression string or a nested mapping")]
    InvalidFieldShape {
        /// Dotted path of the offending field.
        field: String,
    },

    /// The modifier clause of a type expression could not be interpreted.
    #[error("malformed modifier '{modifier}' on field '{field}': {reason}")]
    MalformedModifier {
        /// Dotted path of the field carrying the modifier.
        field: String,
        /// The raw modifier text.
        modifier: String,
        /// Why the modifier was rejected.
        reason: String,
    },

    /// A default literal could not be embedded as JSON when rendering.
    #[error("default literal {literal} is not valid JSON: {reason}")]
    InvalidDefaultLiteral {
        /// The raw literal text as authored.
        literal: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl SchemaError {
    /// The dotted field path the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownType { field, .. }
            | Self::InvalidFieldShape { field }
            | Self::MalformedModifier { field, .. } => Some(field),
            Self::InvalidDefinitionShape { .. } | Self::InvalidDefaultLiteral { .. } => None,
        }
    }
}
