//! Login command implementation.
//!
//! Verifies credentials the way the dashboard's login endpoint would and
//! prints the sanitized account on success.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address of the account
    #[arg(long)]
    pub email: String,

    /// Password to verify
    #[arg(long)]
    pub password: String,
}

pub fn run(args: LoginArgs, data_dir: &Path) -> Result<()> {
    let users = context::open_users(data_dir)?;

    let user = users
        .authenticate(&args.email, &args.password)
        .context("Failed to verify credentials")?;

    match user {
        Some(user) => {
            output::json_pretty(&user)?;
            output::success("Logged in successfully");
            Ok(())
        }
        None => bail!("Invalid email or password"),
    }
}
