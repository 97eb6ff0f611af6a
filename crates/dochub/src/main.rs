// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DocHub plugin loader command line.
//!
//! Runs the plugin loading phase against a live DocHub deployment and
//! reports how every plugin settled.

mod load;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dochub_config::DocHubConfig;

/// DocHub plugin loader.
#[derive(Parser, Debug)]
#[command(name = "dochub", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the manifest and load every listed plugin.
    Load {
        /// Application root to load from (overrides `app.base_url`).
        #[arg(long)]
        base_url: Option<String>,
        /// Print the load report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Parse a local manifest file and list its plugins.
    Manifest {
        /// Path to the manifest JSON.
        file: PathBuf,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => dochub_config::load_and_validate_path(path),
        None => dochub_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            dochub_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Load { base_url, json }) => {
            if let Some(base_url) = base_url {
                config.app.base_url = base_url;
            }
            load::run_load(&config, json).await
        }
        Some(Commands::Manifest { file }) => load::run_manifest(&file),
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("dochub: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &DocHubConfig) -> Result<(), dochub_core::DocHubError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| dochub_core::DocHubError::Internal(format!("cannot render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("dochub={log_level},dochub_plugin={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
