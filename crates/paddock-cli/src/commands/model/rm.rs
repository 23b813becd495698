//! Rm command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Model name to delete, including tag
    pub name: String,

    /// Remove only the catalog record, leaving the runtime untouched
    #[arg(long)]
    pub local_only: bool,

    /// Runtime base URL
    #[arg(long = "runtime-url")]
    pub runtime_url: Option<String>,
}

pub async fn run(args: RmArgs, data_dir: &Path) -> Result<()> {
    let models = context::open_models(data_dir)?;

    if !args.local_only {
        let client = context::runtime(args.runtime_url);
        client
            .delete(&args.name)
            .await
            .context("Failed to delete the model from the runtime")?;
    }

    models
        .delete_by_name(&args.name)
        .context("Failed to delete the catalog record")?;

    output::success("Model deleted");
    Ok(())
}
