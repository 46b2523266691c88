//! # Type Expressions
//!
//! Parses the shorthand grammar authors write for a single field:
//!
//! ```text
//! <expr>      ::= <base> [ "|" <modifiers> ]
//! <base>      ::= primitive | "[]" <base> | "map[string]" <base> | <name>
//! <modifiers> ::= <key> "=" <value> ( "," <key> "=" <value> )*
//! ```
//!
//! Parsing is independent of the type registry. A token that is neither a
//! primitive nor a container becomes [`TypeRef::Named`]; whether that name
//! exists is decided by the builder.

use std::fmt;

use crate::error::SchemaError;
use crate::node::{PrimitiveType, RawLiteral};

/// Prefix marking an array container.
pub const ARRAY_PREFIX: &str = "[]";

/// Prefix marking a string-keyed map container.
pub const MAP_PREFIX: &str = "map[string]";

/// Separator between the base type and the modifier clause.
pub const MODIFIER_SEPARATOR: char = '|';

/// Modifier key marking a field as required.
pub const REQUIRED_KEY: &str = "required";

/// Modifier key carrying a raw default literal.
pub const DEFAULT_KEY: &str = "default";

/// How unrecognized modifier content is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierMode {
    /// Unknown keys and non-boolean `required` values are skipped and
    /// reported through [`TypeExpression::ignored`].
    #[default]
    Lenient,
    /// Unknown keys and non-boolean `required` values are errors.
    Strict,
}

/// The parsed base type of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// One of the primitive names.
    Primitive(PrimitiveType),
    /// `[]<elem>`
    Array(Box<TypeRef>),
    /// `map[string]<value>`
    Map(Box<TypeRef>),
    /// Anything else; resolved against the registry by the builder.
    Named(String),
}

enum Container {
    Array,
    Map,
}

impl TypeRef {
    /// Classify a base-type token.
    ///
    /// Precedence: exact primitive name, then `[]`, then `map[string]`,
    /// then a named reference. Container nesting is unbounded; the prefixes
    /// are peeled iteratively so deeply nested input cannot exhaust the stack.
    pub fn parse(token: &str) -> Self {
        let mut wrappers = Vec::new();
        let mut rest = token;
        let leaf = loop {
            if let Some(p) = PrimitiveType::from_name(rest) {
                break TypeRef::Primitive(p);
            }
            if let Some(inner) = rest.strip_prefix(ARRAY_PREFIX) {
                wrappers.push(Container::Array);
                rest = inner;
            } else if let Some(inner) = rest.strip_prefix(MAP_PREFIX) {
                wrappers.push(Container::Map);
                rest = inner;
            } else {
                break TypeRef::Named(rest.to_string());
            }
        };
        wrappers.into_iter().rev().fold(leaf, |inner, c| match c {
            Container::Array => TypeRef::Array(Box::new(inner)),
            Container::Map => TypeRef::Map(Box::new(inner)),
        })
    }

    /// The innermost non-container type.
    pub fn leaf(&self) -> &TypeRef {
        let mut cur = self;
        while let TypeRef::Array(inner) | TypeRef::Map(inner) = cur {
            cur = inner;
        }
        cur
    }

    /// Number of container layers wrapping the leaf.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self;
        while let TypeRef::Array(inner) | TypeRef::Map(inner) = cur {
            depth += 1;
            cur = inner;
        }
        depth
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cur = self;
        loop {
            match cur {
                TypeRef::Array(inner) => {
                    f.write_str(ARRAY_PREFIX)?;
                    cur = inner;
                }
                TypeRef::Map(inner) => {
                    f.write_str(MAP_PREFIX)?;
                    cur = inner;
                }
                TypeRef::Primitive(p) => return f.write_str(p.as_str()),
                TypeRef::Named(name) => return f.write_str(name),
            }
        }
    }
}

/// Modifiers attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// `required=true` was present.
    pub required: bool,
    /// The `default=` literal, untouched.
    pub default: Option<RawLiteral>,
}

/// A fully parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpression {
    /// The base type.
    pub base: TypeRef,
    /// Recognized modifiers.
    pub modifiers: Modifiers,
    /// Modifier pairs skipped in lenient mode, as written.
    pub ignored: Vec<String>,
}

impl TypeExpression {
    /// Parse `raw` as the expression for `field`.
    ///
    /// The string is split on the first `|`; both halves are trimmed. The
    /// modifier clause is split on `,` and each pair on its first `=`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MalformedModifier` if the clause is empty, a
    /// pair has no `=` or no key, a key repeats, `default` has no literal,
    /// or (in strict mode) a key is unknown or `required` is not a boolean.
    pub fn parse(field: &str, raw: &str, mode: ModifierMode) -> Result<Self, SchemaError> {
        let (base, clause) = match raw.split_once(MODIFIER_SEPARATOR) {
            Some((base, clause)) => (base.trim(), Some(clause.trim())),
            None => (raw.trim(), None),
        };

        let mut expr = TypeExpression {
            base: TypeRef::parse(base),
            modifiers: Modifiers::default(),
            ignored: Vec::new(),
        };

        if let Some(clause) = clause {
            expr.apply_modifiers(field, clause, mode)?;
        }

        Ok(expr)
    }

    fn apply_modifiers(
        &mut self,
        field: &str,
        clause: &str,
        mode: ModifierMode,
    ) -> Result<(), SchemaError> {
        let malformed = |modifier: &str, reason: &str| SchemaError::MalformedModifier {
            field: field.to_string(),
            modifier: modifier.to_string(),
            reason: reason.to_string(),
        };

        if clause.is_empty() {
            return Err(malformed(clause, "empty modifier clause after '|'"));
        }

        let mut seen: Vec<&str> = Vec::new();
        for pair in clause.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                return Err(malformed(clause, "empty modifier between commas"));
            }
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| malformed(pair, "expected key=value"))?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() {
                return Err(malformed(pair, "missing modifier key"));
            }
            if seen.contains(&key) {
                return Err(malformed(pair, "modifier key given more than once"));
            }
            seen.push(key);

            match key {
                REQUIRED_KEY => match value {
                    "true" => self.modifiers.required = true,
                    "false" => self.modifiers.required = false,
                    _ if mode == ModifierMode::Strict => {
                        return Err(malformed(pair, "required must be 'true' or 'false'"));
                    }
                    _ => self.ignored.push(pair.to_string()),
                },
                DEFAULT_KEY => {
                    if value.is_empty() {
                        return Err(malformed(pair, "default requires a literal value"));
                    }
                    self.modifiers.default = Some(RawLiteral::new(value));
                }
                _ if mode == ModifierMode::Strict => {
                    return Err(malformed(pair, "unknown modifier key"));
                }
                _ => self.ignored.push(pair.to_string()),
            }
        }
        Ok(())
    }
}
