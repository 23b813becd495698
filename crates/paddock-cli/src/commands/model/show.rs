//! Show command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Model name, including tag
    pub name: String,
}

pub fn run(args: ShowArgs, data_dir: &Path) -> Result<()> {
    let models = context::open_models(data_dir)?;

    let model = models
        .find_by_name(&args.name)
        .context("Failed to look up the model name")?;

    match model {
        Some(model) => output::json_pretty(&model),
        None => bail!("No model named {} in the catalog", args.name),
    }
}
