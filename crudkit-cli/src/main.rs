//! crudkit CLI tool

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ExampleCommand, FieldTypesCommand, GenerateCommand, ValidateCommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crudkit")]
#[command(version)]
#[command(about = "Generate complete CRUD modules for Next.js from a JSON configuration", long_about = None)]
struct Cli {
    /// Emit debug-level progress logs
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a CRUD module from a configuration file
    Generate {
        /// Path to the JSON configuration file
        #[arg(long, short)]
        config: PathBuf,
        /// Template directory (defaults to the bundled crud templates)
        #[arg(long, short)]
        templates: Option<PathBuf>,
        /// Overwrite existing files after creating timestamped backups
        #[arg(long)]
        overwrite: bool,
        /// Report what would be generated without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Skip configuration validation
        #[arg(long)]
        skip_validation: bool,
    },
    /// Validate a configuration file without generating anything
    Validate {
        /// Path to the JSON configuration file
        #[arg(long, short)]
        config: PathBuf,
    },
    /// Print a ready-made example configuration for an entity
    Example {
        /// Entity name (e.g. `Product`, `Invoice`)
        name: String,
        /// How much surface to demonstrate: simple, medium, or complex
        #[arg(long, default_value = "medium")]
        complexity: String,
        /// Write the configuration to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the supported field types and their validation keys
    FieldTypes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            templates,
            overwrite,
            dry_run,
            skip_validation,
        } => {
            let cmd = GenerateCommand {
                config_path: config,
                templates,
                overwrite,
                dry_run,
                skip_validation,
                verbose: cli.verbose,
            };
            cmd.execute()?;
        }
        Commands::Validate { config } => {
            ValidateCommand { config_path: config }.execute()?;
        }
        Commands::Example {
            name,
            complexity,
            output,
        } => {
            ExampleCommand {
                name,
                complexity,
                output,
            }
            .execute()?;
        }
        Commands::FieldTypes => {
            FieldTypesCommand.execute();
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "crudkit=debug,crudkit_cli=debug"
    } else {
        "crudkit=info,crudkit_cli=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
