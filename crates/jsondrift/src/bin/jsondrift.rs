//! `jsondrift`: ignore-aware JSON comparison and patch synthesis.
//!
//! Usage:
//!   jsondrift delta <recorded> <actual> [--ignore P]...
//!   jsondrift filter <file> [--ignore P]...
//!   jsondrift patch <desired> <actual> [--ignore P]... [--id-attribute F] [--format F]
//!   jsondrift suppress <old> <new> [--ignore P]...
//!
//! A file argument of `-` reads stdin. `RUST_LOG` overrides the log level. `delta` exits with status 2 when the
//! documents drifted.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use jsondrift::cli::{log_filter, run_delta, run_filter, run_patch, run_suppress, CliError};
use jsondrift::PatchFormat;
use tracing_subscriber::EnvFilter;

/// Ignore-aware JSON comparison and patch synthesis.
#[derive(Parser)]
#[command(name = "jsondrift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a recorded document with the server's document
    Delta {
        recorded: PathBuf,
        actual: PathBuf,
        /// Ignore pattern (`name`, `*.metadata`, `outer.field`)
        #[arg(short, long = "ignore")]
        ignore: Vec<String>,
    },

    /// Strip ignored fields from a document
    Filter {
        file: PathBuf,
        #[arg(short, long = "ignore")]
        ignore: Vec<String>,
    },

    /// Print the operations that move the actual document to the desired one
    Patch {
        desired: PathBuf,
        actual: PathBuf,
        #[arg(short, long = "ignore")]
        ignore: Vec<String>,
        /// Field that is never deleted
        #[arg(long, default_value = "id")]
        id_attribute: String,
        #[arg(short, long, value_enum, default_value_t = Format::ObjectModification)]
        format: Format,
    },

    /// Print whether the diff between two documents is only noise
    Suppress {
        old: PathBuf,
        new: PathBuf,
        #[arg(short, long = "ignore")]
        ignore: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    ObjectModification,
    JsonPatch,
}

impl From<Format> for PatchFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::ObjectModification => PatchFormat::ObjectModification,
            Format::JsonPatch => PatchFormat::JsonPatch,
        }
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn run(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Delta {
            recorded,
            actual,
            ignore,
        } => {
            let (merged, changed) = run_delta(&read_input(&recorded)?, &read_input(&actual)?, &ignore)?;
            println!("{merged}");
            if changed {
                tracing::info!("documents drifted");
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Filter { file, ignore } => {
            println!("{}", run_filter(&read_input(&file)?, &ignore)?);
        }
        Commands::Patch {
            desired,
            actual,
            ignore,
            id_attribute,
            format,
        } => {
            let out = run_patch(
                &read_input(&desired)?,
                &read_input(&actual)?,
                &ignore,
                &id_attribute,
                format.into(),
            )?;
            println!("{out}");
        }
        Commands::Suppress { old, new, ignore } => {
            let old = read_input(&old)?;
            let new = read_input(&new)?;
            println!("{}", run_suppress(old.trim(), new.trim(), &ignore)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(cli.verbose, env.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
