//! ffwrap CLI: plan, run, and inspect ffmpeg invocations.
//!
//! Usage:
//!   ffwrap plan <REQUEST>      Print the command a request assembles to
//!   ffwrap run <REQUEST>       Assemble a request and run ffmpeg
//!   ffwrap check               Check that the ffmpeg binary can be started
//!   ffwrap list <TABLE>        List known codecs, formats, or log levels

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ffwrap_common::config::AppConfig;

mod commands;
mod request;

use commands::list::Table;

#[derive(Parser)]
#[command(
    name = "ffwrap",
    about = "Typed ffmpeg command assembly",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// ffmpeg binary to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    ffmpeg: Option<PathBuf>,

    /// Config file to use instead of the standard location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the command line a request assembles to
    Plan {
        /// Path to the JSON request
        request: PathBuf,

        /// Print the argument vector as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Assemble a request and run ffmpeg with it
    Run {
        /// Path to the JSON request
        request: PathBuf,
    },

    /// Check that the ffmpeg binary can be started
    Check,

    /// List the values a request may use
    List {
        #[arg(value_enum)]
        table: Table,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match &cli.config {
        Some(path) => {
            let config = AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?;
            (config, None)
        }
        None => match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::from_env(), Some(e)),
        },
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(binary) = cli.ffmpeg {
        config.runner.binary = binary;
    }

    ffwrap_common::logging::init_logging(&config.logging);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Ignoring config file, using defaults");
    }

    match cli.command {
        Commands::Plan { request, json } => commands::plan::run(&config, request, json),
        Commands::Run { request } => commands::run::run(&config, request),
        Commands::Check => commands::check::run(&config),
        Commands::List { table } => commands::list::run(table),
    }
}
