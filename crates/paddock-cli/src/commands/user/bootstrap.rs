//! Admin bootstrap command implementation.
//!
//! Safe to run on every deployment; the bootstrap gates on an email lookup
//! and never creates a second admin.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use paddock_file::ADMIN_EMAIL;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct BootstrapArgs {}

pub fn run(_args: BootstrapArgs, data_dir: &Path) -> Result<()> {
    let users = context::open_users(data_dir)?;

    let created = users
        .bootstrap_admin()
        .context("Failed to bootstrap the admin account")?;

    output::field("Email", ADMIN_EMAIL);
    if created {
        output::success("Admin account created");
    } else {
        output::success("Admin account already present");
    }

    Ok(())
}
