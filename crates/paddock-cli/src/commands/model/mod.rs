//! Model subcommand implementations.

mod add;
mod list;
mod pull;
mod rm;
mod search;
mod show;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct ModelCommand {
    #[command(subcommand)]
    pub command: ModelSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ModelSubcommand {
    /// Add a catalog record without touching the runtime
    Add(add::AddArgs),

    /// List cataloged models
    List(list::ListArgs),

    /// Fetch a single cataloged model
    Show(show::ShowArgs),

    /// Search the catalog by name, description, or family
    Search(search::SearchArgs),

    /// Download a model onto the runtime and track it in the catalog
    Pull(pull::PullArgs),

    /// Delete a model from the runtime and the catalog
    Rm(rm::RmArgs),
}

pub async fn handle(cmd: ModelCommand, data_dir: &Path) -> Result<()> {
    match cmd.command {
        ModelSubcommand::Add(args) => add::run(args, data_dir),
        ModelSubcommand::List(args) => list::run(args, data_dir).await,
        ModelSubcommand::Show(args) => show::run(args, data_dir),
        ModelSubcommand::Search(args) => search::run(args, data_dir),
        ModelSubcommand::Pull(args) => pull::run(args, data_dir).await,
        ModelSubcommand::Rm(args) => rm::run(args, data_dir).await,
    }
}
