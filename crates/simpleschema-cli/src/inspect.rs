//! # Inspect Subcommand
//!
//! Resolves one type expression and prints the node it produces along
//! with its modifiers. Useful when authoring definitions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use simpleschema::{SchemaBuilder, SchemaNode};

use crate::config::CliConfig;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// The type expression, e.g. "[]Person | required=true".
    pub expression: String,

    /// Type definition file. Repeat to load several, in order.
    #[arg(long = "types", value_name = "FILE")]
    pub types: Vec<PathBuf>,

    /// Field name reported in errors.
    #[arg(long, default_value = "field")]
    pub field: String,

    /// Reject unknown modifiers instead of ignoring them.
    #[arg(long)]
    pub strict: bool,
}

/// What `inspect` prints for one expression.
#[derive(Debug, Serialize)]
struct Report<'a> {
    field: &'a str,
    required: bool,
    schema: SchemaNode,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs, config: &CliConfig) -> Result<u8> {
    println!("{}", inspect(args, config)?);
    Ok(0)
}

fn inspect(args: &InspectArgs, config: &CliConfig) -> Result<String> {
    let options = config.build_options(args.strict);
    let registry = crate::load_registry(config.type_files(&args.types), options)?;
    let (schema, modifiers) = SchemaBuilder::new(&registry)
        .with_options(options)
        .resolve_expression(&args.field, &args.expression)?;

    let report = Report {
        field: &args.field,
        required: modifiers.required,
        schema,
    };
    serde_json::to_string_pretty(&report).context("cannot render schema")
}
