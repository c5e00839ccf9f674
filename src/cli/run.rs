//! Run subcommand for yamlenv CLI
//!
//! Loads the document into this process's environment, then spawns the
//! command so it inherits the result.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the run subcommand
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration document (discovered when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Command and arguments, given after `--`
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Split into program and arguments.
    pub fn program(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(program, args)| (program.as_str(), args))
    }
}
