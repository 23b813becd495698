//! Chat command implementation.

use anyhow::{Context, Result};
use clap::Args;

use paddock_ollama::ChatMessage;

use crate::context;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message to send
    pub message: String,

    /// Model to chat with
    #[arg(long)]
    pub model: String,

    /// Runtime base URL
    #[arg(long = "runtime-url")]
    pub runtime_url: Option<String>,
}

pub async fn run(args: ChatArgs) -> Result<()> {
    let client = context::runtime(args.runtime_url);

    let reply = client
        .chat(&args.model, &[ChatMessage::user(&args.message)])
        .await
        .context("Chat request failed")?;

    println!("{}", reply.content);
    Ok(())
}
