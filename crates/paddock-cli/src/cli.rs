//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::model::ModelCommand;
use crate::commands::runtime::RuntimeCommand;
use crate::commands::user::UserCommand;

/// Management CLI for the paddock model dashboard store.
#[derive(Parser, Debug)]
#[command(name = "paddock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding the collection files (defaults to PADDOCK_DATA or
    /// the platform data directory)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// User account operations
    User(UserCommand),
    /// Model catalog operations
    Model(ModelCommand),
    /// Raw model runtime operations
    Runtime(RuntimeCommand),
}
