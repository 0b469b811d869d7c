use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod run;

#[derive(Debug, Parser)]
#[command(name = "grogdb-cli")]
#[command(about = "Beverage catalogue enrichment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Transform the raw catalogue and write the enriched dataset
    Run {
        /// Raw catalogue JSON (overrides `GROGDB_INPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Corrections JSON (overrides `GROGDB_CORRECTIONS_PATH`)
        #[arg(long)]
        corrections: Option<PathBuf>,
        /// Output dataset (overrides `GROGDB_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Transform and report without writing the output file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the enriched record for one stockcode
    Inspect {
        stockcode: String,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        corrections: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = grogdb_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Run {
            input,
            corrections,
            output,
            dry_run,
        }) => {
            let paths = run::resolve_paths(&config, input, corrections, output);
            run::run_catalogue(&paths, dry_run)?;
        }
        Some(Commands::Inspect {
            stockcode,
            input,
            corrections,
        }) => {
            let paths = run::resolve_paths(&config, input, corrections, None);
            run::inspect_stockcode(&paths, &stockcode)?;
        }
        None => {
            let paths = run::resolve_paths(&config, None, None, None);
            run::run_catalogue(&paths, false)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
