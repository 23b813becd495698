//! paddock - Operator CLI for the model dashboard store.
//!
//! This is a thin wrapper over the paddock library crates, intended for
//! bootstrapping accounts and managing the local model catalog alongside a
//! running model runtime.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let data_dir = context::data_dir(cli.data_dir)?;

    match cli.command {
        Commands::User(cmd) => commands::user::handle(cmd, &data_dir),
        Commands::Model(cmd) => commands::model::handle(cmd, &data_dir).await,
        Commands::Runtime(cmd) => commands::runtime::handle(cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
