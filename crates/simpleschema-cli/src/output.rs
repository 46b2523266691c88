//! # Schema Output
//!
//! Renders a built schema as pretty JSON or YAML.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use simpleschema::SchemaNode;

/// Output encoding for rendered schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Render `node` in `format`, with a trailing newline.
///
/// JSON output carries default literals exactly as authored. YAML output
/// re-encodes them, so numbers take their `serde_json::Value` form.
pub fn render(node: &SchemaNode, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(node).context("cannot render schema")?
        }
        OutputFormat::Yaml => {
            let value = node.to_json_value().context("cannot render schema")?;
            serde_yaml::to_string(&value)?
        }
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpleschema::{PrimitiveType, RawLiteral};
    use simpleschema_core::PrimitiveSchema;

    fn tags() -> SchemaNode {
        SchemaNode::array_of(SchemaNode::primitive(PrimitiveType::String))
    }

    #[test]
    fn render_json() {
        let out = render(&tags(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, serde_json::json!({"type": "array", "items": {"type": "string"}}));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn render_yaml() {
        let out = render(&tags(), OutputFormat::Yaml).unwrap();
        let parsed: serde_json::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(parsed, serde_json::json!({"type": "array", "items": {"type": "string"}}));
    }

    #[test]
    fn render_json_keeps_default_literals() {
        let node = SchemaNode::Primitive(PrimitiveSchema {
            kind: PrimitiveType::Integer,
            default: Some(RawLiteral::new("123456789012345678901234567890")),
        });
        let out = render(&node, OutputFormat::Json).unwrap();
        assert!(out.contains(r#""default": 123456789012345678901234567890"#), "{out}");
    }

    #[test]
    fn render_rejects_non_json_default() {
        let node = SchemaNode::Primitive(PrimitiveSchema {
            kind: PrimitiveType::String,
            default: Some(RawLiteral::new("unquoted text")),
        });
        for format in [OutputFormat::Json, OutputFormat::Yaml] {
            let err = render(&node, format).unwrap_err();
            assert!(format!("{err:#}").contains("unquoted text"));
        }
    }

    #[test]
    fn format_deserializes_lowercase() {
        let f: OutputFormat = serde_yaml::from_str("yaml").unwrap();
        assert_eq!(f, OutputFormat::Yaml);
    }
}
