//! Export subcommand for yamlenv CLI
//!
//! Prints the variables a document contributes, with the values that win
//! against the current environment. The environment itself is not changed.

use crate::format::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export subcommand
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Configuration document (discovered when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format: env (default), shell, or json
    #[arg(short, long, default_value = "env", value_name = "FORMAT")]
    pub format: OutputFormat,
}
