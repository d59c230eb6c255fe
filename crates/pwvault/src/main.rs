// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! pwvault - a single-secret password vault.
//!
//! This is the binary entry point: the HTTP service, master-object
//! provisioning, and an environment check.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod seal;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pwvault_config::PwvaultConfig;

/// pwvault - a single-secret password vault.
#[derive(Parser, Debug)]
#[command(name = "pwvault", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the vault HTTP service.
    Serve,
    /// Encrypt the master passphrase under itself and store it.
    SealMaster {
        /// Write the sealed blob to this file instead of the configured store.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Replace an existing master object or output file.
        #[arg(long)]
        force: bool,
    },
    /// Check store health and the presence of the master object.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> PwvaultConfig {
    let loaded = match path {
        Some(path) => pwvault_config::load_and_validate_path(path),
        None => pwvault_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            pwvault_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.service.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::SealMaster { output, force } => {
            seal::run_seal_master(&config, output.as_deref(), force).await
        }
        Commands::Check { plain } => check::run_check(&config, plain).await,
    };

    if let Err(e) = result {
        eprintln!("pwvault: {e}");
        std::process::exit(1);
    }
}

/// Install the fmt subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pwvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
