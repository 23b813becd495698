//! Add command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use paddock_core::NewModel;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Model name, including tag (e.g. tinyllama:latest)
    pub name: String,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Version label
    #[arg(long)]
    pub version: Option<String>,

    /// Size on disk in bytes
    #[arg(long)]
    pub size: Option<u64>,

    /// Network architecture
    #[arg(long)]
    pub architecture: Option<String>,

    /// Weight file format
    #[arg(long)]
    pub format: Option<String>,

    /// Model family
    #[arg(long)]
    pub family: Option<String>,

    /// Parameter count
    #[arg(long)]
    pub parameters: Option<u64>,

    /// Quantization scheme
    #[arg(long)]
    pub quantization: Option<String>,
}

pub fn run(args: AddArgs, data_dir: &Path) -> Result<()> {
    let models = context::open_models(data_dir)?;

    if models
        .find_by_name(&args.name)
        .context("Failed to look up the model name")?
        .is_some()
    {
        bail!("Model {} is already in the catalog", args.name);
    }

    let model = models
        .create(NewModel {
            name: args.name,
            description: args.description,
            version: args.version,
            size: args.size,
            architecture: args.architecture,
            format: args.format,
            family: args.family,
            parameters: args.parameters,
            quantization: args.quantization,
        })
        .context("Failed to add the model")?;

    output::json_pretty(&model)?;
    output::success("Model added to the catalog");

    Ok(())
}
