//! # simpleschema-cli — SimpleSchema Command-Line Interface
//!
//! Loads type and field definitions from YAML/JSON files and renders the
//! resulting JSON-Schema tree.
//!
//! ## Subcommands
//!
//! - `simpleschema build` — Build the schema for a field definition file.
//! - `simpleschema inspect` — Resolve a single type expression.
//! - `simpleschema types` — List the types a set of files registers.
//!
//! ```bash
//! simpleschema build spec.yaml --types types/common.yaml --types types/app.yaml
//! simpleschema inspect "map[string][]Person | required=true" --types types/app.yaml
//! ```
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from schema logic.
//! - Handlers delegate to `simpleschema`; no schema semantics live here.

pub mod build;
pub mod config;
pub mod input;
pub mod inspect;
pub mod output;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use simpleschema::{BuildOptions, TypeRegistry};

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Build a registry from type definition files.
///
/// Each file is one registration call, in iteration order, so a file may
/// reference types from any file before it.
pub fn load_registry<'a>(
    files: impl IntoIterator<Item = &'a Path>,
    options: BuildOptions,
) -> Result<TypeRegistry> {
    let mut registry = TypeRegistry::new();
    for file in files {
        let definitions = input::load_document(file)?;
        registry
            .load_with_options(&definitions, options)
            .with_context(|| format!("failed to load types from {}", file.display()))?;
        tracing::info!(file = %file.display(), total = registry.len(), "loaded type definitions");
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_absolute_path_returned_as_is() {
        let result = resolve_path(Path::new("/absolute/types.yaml"), Path::new("/some/dir"));
        assert_eq!(result, PathBuf::from("/absolute/types.yaml"));
    }

    #[test]
    fn resolve_path_relative_joins_base() {
        let result = resolve_path(Path::new("types/app.yaml"), Path::new("/some/dir"));
        assert_eq!(result, PathBuf::from("/some/dir/types/app.yaml"));
    }

    #[test]
    fn load_registry_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let address = dir.path().join("address.yaml");
        let person = dir.path().join("person.yaml");
        std::fs::write(&address, "Address:\n  city: string\n").unwrap();
        std::fs::write(&person, "Person:\n  home: Address\n").unwrap();

        let registry =
            load_registry([address.as_path(), person.as_path()], BuildOptions::default()).unwrap();
        assert_eq!(registry.names(), vec!["Address", "Person"]);

        let err = load_registry([person.as_path(), address.as_path()], BuildOptions::default())
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("person.yaml"), "{msg}");
        assert!(msg.contains("Address"), "{msg}");
    }

    #[test]
    fn load_registry_reports_bad_shape() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"invalid": 123}"#).unwrap();
        let err = load_registry([bad.as_path()], BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<simpleschema::SchemaError>(),
            Some(simpleschema::SchemaError::InvalidDefinitionShape { .. })
        ));
    }
}
