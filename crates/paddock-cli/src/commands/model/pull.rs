//! Pull command implementation.
//!
//! Tracks the download lifecycle in the catalog around the runtime call:
//! the record is marked `downloading` before the pull and moved to
//! `available` on success or `error` on failure.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use paddock_core::{ModelStatus, NewModel};

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct PullArgs {
    /// Model name to download, including tag
    pub name: String,

    /// Description for a newly cataloged model
    #[arg(long)]
    pub description: Option<String>,

    /// Runtime base URL
    #[arg(long = "runtime-url")]
    pub runtime_url: Option<String>,
}

pub async fn run(args: PullArgs, data_dir: &Path) -> Result<()> {
    let models = context::open_models(data_dir)?;
    let client = context::runtime(args.runtime_url);

    let record = match models
        .find_by_name(&args.name)
        .context("Failed to look up the model name")?
    {
        Some(record) => record,
        None => models
            .create(NewModel {
                name: args.name.clone(),
                description: Some(
                    args.description
                        .clone()
                        .unwrap_or_else(|| format!("{} model", args.name)),
                ),
                version: Some("1.0.0".to_string()),
                ..NewModel::default()
            })
            .context("Failed to catalog the model")?,
    };

    models
        .set_status(&record.id, ModelStatus::Downloading)
        .context("Failed to mark the model as downloading")?;

    match client.pull(&args.name).await {
        Ok(status) => {
            models
                .set_status(&record.id, ModelStatus::Available)
                .context("Failed to mark the model as available")?;

            if !status.status.is_empty() {
                output::field("Status", &status.status);
            }
            output::success("Model pulled");
            Ok(())
        }
        Err(e) => {
            models
                .set_status(&record.id, ModelStatus::Error)
                .context("Failed to mark the model as failed")?;

            output::error("Pull failed; catalog entry marked with status 'error'");
            Err(e).context(format!("Failed to pull {}", args.name))
        }
    }
}
