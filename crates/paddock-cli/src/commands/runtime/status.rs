//! Status command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Runtime base URL
    #[arg(long = "runtime-url")]
    pub runtime_url: Option<String>,
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let client = context::runtime(args.runtime_url);

    let status = client
        .status()
        .await
        .context("Failed to reach the runtime")?;

    output::json_pretty(&status)
}
