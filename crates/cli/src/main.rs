// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! registers - build and evolve registers from RSF command logs

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod completions;
mod config;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{blob, build, context, init, patch, records, value};
use completions::CompletionsArgs;
use config::Config;
use error::RegistersError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "registers",
    version,
    about = "Registers - build and evolve registers from RSF command logs"
)]
struct Cli {
    /// Configuration file (defaults to ./registers.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new register
    Init(init::InitArgs),
    /// Patch operations
    Patch(patch::PatchArgs),
    /// Show current records
    Records(records::RecordsArgs),
    /// Show register context
    Context(context::ContextArgs),
    /// Blob (item) operations
    Blob(blob::BlobArgs),
    /// Value operations
    Value(value::ValueArgs),
    /// Build static JSON and CSV files for the register
    Build(build::BuildArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<RegistersError>() {
                Some(err) => eprint!("{}", err),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions(args) = cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    setup_logging(&config);

    match cli.command {
        Commands::Init(args) => init::handle(args, &config),
        Commands::Patch(args) => patch::handle(args.command, &config),
        Commands::Records(args) => records::handle(args, &config),
        Commands::Context(args) => context::handle(args, &config),
        Commands::Blob(args) => blob::handle(args.command, &config),
        Commands::Value(args) => value::handle(args.command),
        Commands::Build(args) => build::handle(args, &config),
        Commands::Completions(_) => Ok(()), // handled above
    }
}

/// Log to stderr, filtered by config, then `RUST_LOG`, then `warn`
fn setup_logging(config: &Config) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = config
        .log
        .as_deref()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
