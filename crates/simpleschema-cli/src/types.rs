//! # Types Subcommand
//!
//! Loads type definition files and lists what they register.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::CliConfig;

/// Arguments for the types subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Type definition file. Repeat to load several, in order.
    #[arg(long = "types", value_name = "FILE")]
    pub types: Vec<PathBuf>,

    /// Reject unknown modifiers instead of ignoring them.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the types subcommand.
pub fn run_types(args: &TypesArgs, config: &CliConfig) -> Result<u8> {
    for line in list_types(args, config)? {
        println!("{line}");
    }
    Ok(0)
}

fn list_types(args: &TypesArgs, config: &CliConfig) -> Result<Vec<String>> {
    let options = config.build_options(args.strict);
    let registry = crate::load_registry(config.type_files(&args.types), options)?;

    let mut lines = Vec::with_capacity(registry.len() + 1);
    for name in registry.names() {
        let Some(schema) = registry.get(name) else {
            continue;
        };
        lines.push(format!(
            "  {:<24} {} properties, {} required",
            name,
            schema.len(),
            schema.required().len()
        ));
    }
    lines.push(format!("Total: {} types", registry.len()));
    Ok(lines)
}
