//! Search command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Substring to match against name, description, and family
    pub query: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: SearchArgs, data_dir: &Path) -> Result<()> {
    let models = context::open_models(data_dir)?;

    let hits = models
        .search(&args.query)
        .context("Failed to search the catalog")?;

    if hits.is_empty() {
        eprintln!("{}", "No matches.".dimmed());
        return Ok(());
    }

    for hit in &hits {
        if args.pretty {
            output::json_pretty(hit)?;
        } else {
            output::json(hit)?;
        }
    }

    Ok(())
}
