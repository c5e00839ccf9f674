//! CLI command definitions for yamlenv
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod export;
pub mod run;
pub mod show;

use crate::loader::ConfigLoader;
use crate::validate::RequiredPaths;
use clap::{Parser, Subcommand};
use export::ExportArgs;
use run::RunArgs;
use show::ShowArgs;

/// Load YAML configuration into environment variables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Prefix for variable names (MYAPP gives MYAPP_DATABASE_HOST)
    #[arg(short, long, default_value = "", global = true)]
    pub prefix: String,

    /// Replace variables that are already set with document values
    #[arg(long = "override", global = true)]
    pub override_existing: bool,

    /// Dotted path the document must define, may be repeated
    #[arg(short, long = "require", value_name = "PATH", global = true)]
    pub require: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the variables a document provides
    Export(ExportArgs),

    /// Print the document as typed JSON without touching the environment
    Show(ShowArgs),

    /// Load the document into the environment and run a command
    Run(RunArgs),
}

impl Cli {
    /// Build a loader from the global options.
    pub fn loader(&self) -> ConfigLoader {
        let loader = ConfigLoader::new()
            .with_prefix(&self.prefix)
            .with_override(self.override_existing);
        if self.require.is_empty() {
            loader
        } else {
            loader.with_validator(RequiredPaths::new(self.require.iter().cloned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use crate::merge::Precedence;
    use std::path::PathBuf;

    #[test]
    fn test_parse_export_with_globals() {
        let cli = Cli::try_parse_from([
            "yamlenv", "export", "app.yaml", "--prefix", "MYAPP", "--override", "-f", "shell",
        ])
        .unwrap();
        assert_eq!(cli.prefix, "MYAPP");
        assert!(cli.override_existing);
        let Command::Export(args) = &cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.file, Some(PathBuf::from("app.yaml")));
        assert_eq!(args.format, OutputFormat::Shell);

        let loader = cli.loader();
        assert_eq!(loader.options().prefix, "MYAPP");
        assert_eq!(loader.options().precedence, Precedence::PreferDocument);
    }

    #[test]
    fn test_parse_run_trailing_command() {
        let cli = Cli::try_parse_from([
            "yamlenv", "-r", "database.host", "run", "app.yaml", "--", "printenv", "-0",
        ])
        .unwrap();
        assert_eq!(cli.require, vec!["database.host"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.file, Some(PathBuf::from("app.yaml")));
        assert_eq!(args.command, vec!["printenv", "-0"]);
    }

    #[test]
    fn test_run_without_command_has_no_program() {
        let cli = Cli::try_parse_from(["yamlenv", "run", "app.yaml"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.program().is_none());
    }
}
