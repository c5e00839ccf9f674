//! yamlenv command line
//!
//! Loads a YAML document into environment variables and exports, shows or
//! runs a command with the result.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};
use yamlenv::cli::{Cli, Command};
use yamlenv::env::{Environment, MemoryEnv, ProcessEnv};
use yamlenv::format::format_vars;
use yamlenv::paths::DocumentPaths;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log, cli.verbose)?;

    let loader = cli.loader();
    let paths = DocumentPaths::discover();

    match &cli.command {
        Command::Export(args) => {
            let document = paths.resolve(args.file.as_deref());
            // Work on a copy so exporting never changes this process
            let mut env = MemoryEnv::with_vars(ProcessEnv.get_all());
            let report = loader.load_report(document.as_deref(), &mut env)?;
            print!("{}", format_vars(&report.document_values(), args.format));
        }
        Command::Show(args) => {
            let Some(document) = paths.resolve(args.file.as_deref()) else {
                bail!("no configuration document found");
            };
            let root = loader.load_structured(&document)?;
            let json = if args.compact {
                serde_json::to_string(&root)?
            } else {
                serde_json::to_string_pretty(&root)?
            };
            println!("{}", json);
        }
        Command::Run(args) => {
            let document = paths.resolve(args.file.as_deref());
            loader.load(document.as_deref(), &mut ProcessEnv)?;

            let Some((program, rest)) = args.program() else {
                bail!("no command given");
            };
            debug!(program = %program, "Spawning command");
            let status = std::process::Command::new(program)
                .args(rest)
                .status()
                .with_context(|| format!("failed to run {}", program))?;
            std::process::exit(status.code().unwrap_or(1));
        }
    }

    Ok(())
}

/// Install the tracing subscriber selected by `--log`.
///
/// `RUST_LOG` refines the filter; the default level is INFO, DEBUG with
/// `--verbose`.
fn init_logging(log: &str, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy()
    };

    match log {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(PathBuf::from(filename))
                .with_context(|| format!("failed to open log file {}", filename))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
