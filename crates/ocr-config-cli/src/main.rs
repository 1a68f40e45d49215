//! OCR configuration CLI
//!
//! Builds the configuration record for an OCR aggregator contract from a TOML
//! build file, and provides helpers for inspecting profiles and records.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{build, decrypt, profiles, sample};

#[derive(Parser)]
#[command(name = "ocr-config")]
#[command(about = "OCR configuration builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a configuration record from a TOML build file
    Build {
        /// Build file path
        #[arg(default_value = "ocr-config.toml")]
        config: PathBuf,

        /// Emit setConfigEncodedComponents call data instead of JSON
        #[arg(long)]
        abi: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the network profiles, with a build file's override if given
    Profiles {
        /// Build file whose [[profiles]] table should be listed
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print placeholder oracle identities as JSON
    Sample,

    /// Recover the shared secret from a record as one oracle
    Decrypt {
        /// Record JSON produced by `build`
        record: PathBuf,

        /// Oracle position in the record
        #[arg(short, long)]
        index: usize,

        /// Oracle's X25519 private key as hex
        #[arg(short = 'k', long)]
        private_key: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            config,
            abi,
            output,
        } => {
            build::run(&config, abi, output.as_deref())?;
        }

        Commands::Profiles { config } => {
            profiles::run(config.as_deref())?;
        }

        Commands::Sample => {
            sample::run()?;
        }

        Commands::Decrypt {
            record,
            index,
            private_key,
        } => {
            decrypt::run(&record, index, &private_key)?;
        }
    }

    Ok(())
}
