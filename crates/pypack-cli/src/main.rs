//! Main CLI entry point for pypack

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use pypack_core::OutputFormat;
use tracing_subscriber::EnvFilter;

mod commands;

/// pypack - package Python scripts into standalone executables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Package a Python script into an executable
    Package {
        /// Script to package
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output format (exe, apk, other)
        #[arg(short, long, value_name = "FORMAT", default_value = "exe")]
        format: OutputFormat,

        /// Directory receiving the packaged executable
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Accept source files without a .py extension
        #[arg(long)]
        allow_any_extension: bool,

        /// Packaging tool binary to invoke
        #[arg(long, value_name = "TOOL", default_value = pypack_build::DEFAULT_TOOL)]
        tool: String,
    },

    /// Check that the packaging tool is installed
    Check {
        /// Packaging tool binary to probe
        #[arg(long, value_name = "TOOL", default_value = pypack_build::DEFAULT_TOOL)]
        tool: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for better error reports
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet)?;

    let result = match cli.command {
        Commands::Package { source, format, output, allow_any_extension, tool } => {
            let command =
                commands::PackageCommand::new(source, format, output, allow_any_extension, tool);
            command.execute().await
        }

        Commands::Check { tool } => {
            let command = commands::CheckCommand::new(tool);
            command.execute().await
        }
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn setup_logging(verbose: u8, quiet: u8) -> Result<()> {
    let log_level = match (verbose, quiet) {
        (0, 0) => "info",
        (1, 0) => "debug",
        (2, 0) => "trace",
        (v, 0) if v > 2 => "trace",
        (0, 1) => "warn",
        (0, 2) => "error",
        (0, q) if q > 2 => "off",
        _ => "info", // If both are set, default to info
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}
