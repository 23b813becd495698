//! List command implementation.
//!
//! By default lists the local catalog. With `--runtime`, fetches the
//! runtime's tag list and merges catalog records over it by name: runtime
//! fields first, catalog fields override, and models unknown to the catalog
//! default to status `available`.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Merge the runtime's tag list over the local catalog
    #[arg(long)]
    pub runtime: bool,

    /// Runtime base URL
    #[arg(long = "runtime-url")]
    pub runtime_url: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, data_dir: &Path) -> Result<()> {
    let models = context::open_models(data_dir)?;
    let records = models
        .find_all()
        .context("Failed to read the model catalog")?;

    if !args.runtime {
        if records.is_empty() {
            eprintln!("{}", "No models found.".dimmed());
            return Ok(());
        }
        for record in &records {
            print(record, args.pretty)?;
        }
        return Ok(());
    }

    let client = context::runtime(args.runtime_url);
    let tags = client
        .list_models()
        .await
        .context("Failed to list runtime models")?;

    if tags.is_empty() {
        eprintln!("{}", "No models found.".dimmed());
        return Ok(());
    }

    for tag in &tags {
        let mut merged = serde_json::to_value(tag)?;
        let base = merged
            .as_object_mut()
            .context("Runtime model did not serialize to an object")?;

        match records.iter().find(|m| m.name == tag.name) {
            Some(record) => {
                let overlay = serde_json::to_value(record)?;
                if let Some(overlay) = overlay.as_object() {
                    for (key, value) in overlay {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
            None => {
                base.insert("status".to_string(), Value::String("available".to_string()));
            }
        }

        print(&merged, args.pretty)?;
    }

    Ok(())
}

fn print<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        output::json_pretty(value)
    } else {
        output::json(value)
    }
}
