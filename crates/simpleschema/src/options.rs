//! # Build Options
//!
//! Knobs shared by [`SchemaBuilder`](crate::SchemaBuilder) and
//! [`TypeRegistry`](crate::TypeRegistry) loads. Deserializable so callers
//! can embed them in their own configuration files.

use serde::{Deserialize, Serialize};
use simpleschema_core::ModifierMode;

/// Options controlling how type expressions are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Reject unknown modifier keys and non-boolean `required` values
    /// instead of skipping them with a warning.
    pub strict_modifiers: bool,
}

impl BuildOptions {
    /// Options with strict modifier checking enabled.
    pub fn strict() -> Self {
        Self {
            strict_modifiers: true,
        }
    }

    /// The modifier parsing mode these options select.
    pub fn modifier_mode(&self) -> ModifierMode {
        if self.strict_modifiers {
            ModifierMode::Strict
        } else {
            ModifierMode::Lenient
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        assert_eq!(BuildOptions::default().modifier_mode(), ModifierMode::Lenient);
        assert_eq!(BuildOptions::strict().modifier_mode(), ModifierMode::Strict);
    }

    #[test]
    fn deserialize_with_defaults() {
        let opts: BuildOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, BuildOptions::default());

        let opts: BuildOptions = serde_json::from_str(r#"{"strict_modifiers": true}"#).unwrap();
        assert!(opts.strict_modifiers);
    }

    #[test]
    fn deserialize_rejects_unknown_keys() {
        assert!(serde_json::from_str::<BuildOptions>(r#"{"strict": true}"#).is_err());
    }
}
