//! Register command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use paddock_core::NewUser;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name for the new account
    #[arg(long)]
    pub username: String,

    /// Email address (stored lowercased, must be unused)
    #[arg(long)]
    pub email: String,

    /// Plaintext password (stored only as a bcrypt hash)
    #[arg(long)]
    pub password: String,
}

pub fn run(args: RegisterArgs, data_dir: &Path) -> Result<()> {
    let users = context::open_users(data_dir)?;

    let existing = users
        .find_by_email(&args.email)
        .context("Failed to look up the email address")?;
    if existing.is_some() {
        bail!("Email {} is already registered", args.email);
    }

    let user = users
        .create(NewUser {
            username: args.username,
            email: args.email,
            password: args.password,
        })
        .context("Failed to create the account")?;

    output::json_pretty(&user)?;
    output::success("Account created");

    Ok(())
}
