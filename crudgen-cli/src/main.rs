//! crudgen CLI tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crudgen::config::{CrudgenConfig, DEFAULT_CONFIG_FILE};
use crudgen_cli_lib::observability::{self, LogFormat, ObservabilityConfig};
use crudgen_cli_lib::{BindingsCommand, CatalogCommand, CheckCommand, GenerateCommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "Generate repository, service and GraphQL resolver classes for an entity", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log debug details (filtering decisions, skipped excludes)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the CRUD layers for one or more entities
    Generate(GenerateCommand),
    /// Fail if any generated file is missing or differs from a fresh render
    Check(CheckCommand),
    /// Print resolver binding directives as JSON
    Bindings(BindingsCommand),
    /// Print the operation catalog
    Catalog(CatalogCommand),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    observability::init(ObservabilityConfig {
        format: cli.log_format,
        verbose: cli.verbose,
    })?;

    let config = CrudgenConfig::load_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Generate(command) => command.execute(&config)?,
        Commands::Check(command) => {
            if !command.execute(&config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Bindings(command) => command.execute(&config)?,
        Commands::Catalog(command) => command.execute()?,
    }

    Ok(ExitCode::SUCCESS)
}
