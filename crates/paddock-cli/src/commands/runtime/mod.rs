//! Runtime subcommand implementations.

mod chat;
mod generate;
mod status;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct RuntimeCommand {
    #[command(subcommand)]
    pub command: RuntimeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RuntimeSubcommand {
    /// Probe the runtime's health endpoint
    Status(status::StatusArgs),

    /// Send a single chat message and print the reply
    Chat(chat::ChatArgs),

    /// Generate text from a prompt
    Generate(generate::GenerateArgs),
}

pub async fn handle(cmd: RuntimeCommand) -> Result<()> {
    match cmd.command {
        RuntimeSubcommand::Status(args) => status::run(args).await,
        RuntimeSubcommand::Chat(args) => chat::run(args).await,
        RuntimeSubcommand::Generate(args) => generate::run(args).await,
    }
}
