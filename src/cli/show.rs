//! Show subcommand for yamlenv CLI

use clap::Args;
use std::path::PathBuf;

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration document (discovered when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print compact JSON on a single line
    #[arg(long)]
    pub compact: bool,
}
