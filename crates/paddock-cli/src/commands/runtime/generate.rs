//! Generate command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Prompt to generate from
    pub prompt: String,

    /// Model to use
    #[arg(long)]
    pub model: String,

    /// Runtime base URL
    #[arg(long = "runtime-url")]
    pub runtime_url: Option<String>,
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let client = context::runtime(args.runtime_url);

    let text = client
        .generate(&args.model, &args.prompt)
        .await
        .context("Text generation failed")?;

    println!("{}", text);
    Ok(())
}
