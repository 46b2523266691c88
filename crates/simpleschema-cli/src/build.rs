//! # Build Subcommand
//!
//! Builds the schema for a field definition file and writes it to stdout
//! or `--out`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use simpleschema::{SchemaBuilder, SchemaNode};

use crate::config::CliConfig;
use crate::output::{render, OutputFormat};

/// Arguments for the build subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Field definition file (YAML or JSON).
    pub fields: PathBuf,

    /// Type definition file. Repeat to load several, in order.
    #[arg(long = "types", value_name = "FILE")]
    pub types: Vec<PathBuf>,

    /// Output format. Defaults to the config value, then JSON.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the schema here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Reject unknown modifiers instead of ignoring them.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs, config: &CliConfig) -> Result<u8> {
    let options = config.build_options(args.strict);
    let registry = crate::load_registry(config.type_files(&args.types), options)?;

    let fields = crate::input::load_document(&args.fields)?;
    let schema = SchemaBuilder::new(&registry)
        .with_options(options)
        .build_value(&fields)
        .with_context(|| format!("failed to build schema from {}", args.fields.display()))?;

    tracing::info!(
        fields = %args.fields.display(),
        properties = schema.len(),
        required = schema.required().len(),
        "built schema"
    );

    let format = args.format.unwrap_or(config.format);
    let rendered = render(&SchemaNode::Object(schema), format)?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(out = %path.display(), "wrote schema");
        }
        None => print!("{rendered}"),
    }
    Ok(0)
}
