//! # CLI Configuration
//!
//! Optional YAML configuration file. Located by `--config`, or
//! `simpleschema.yaml` in the current directory when present.
//!
//! ```yaml
//! build:
//!   strict_modifiers: true
//! types:
//!   - types/common.yaml
//!   - types/app.yaml
//! format: yaml
//! ```
//!
//! `types` paths are relative to the configuration file and are loaded,
//! in order, before any `--types` given on the command line. Command-line
//! flags override `build` and `format`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use simpleschema::BuildOptions;

use crate::output::OutputFormat;

/// File name looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "simpleschema.yaml";

/// Settings read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Builder options.
    pub build: BuildOptions,
    /// Type definition files, one registration call each.
    pub types: Vec<PathBuf>,
    /// Default output format.
    pub format: OutputFormat,
}

impl CliConfig {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let mut config: CliConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.types = config
            .types
            .into_iter()
            .map(|p| crate::resolve_path(&p, base))
            .collect();
        Ok(config)
    }

    /// The explicit config if given, otherwise [`DEFAULT_CONFIG_FILE`] in
    /// `cwd` if it exists, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using discovered config");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Build options after applying the `--strict` flag.
    pub fn build_options(&self, strict_flag: bool) -> BuildOptions {
        BuildOptions {
            strict_modifiers: strict_flag || self.build.strict_modifiers,
        }
    }

    /// Config type files followed by the command-line ones.
    pub fn type_files<'a>(&'a self, extra: &'a [PathBuf]) -> impl Iterator<Item = &'a Path> + 'a {
        self.types.iter().chain(extra.iter()).map(PathBuf::as_path)
    }
}
