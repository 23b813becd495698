//! Set-preferences command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use paddock_core::PreferencesPatch;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct SetPreferencesArgs {
    /// Email of the account to update
    #[arg(long)]
    pub email: String,

    /// Dashboard theme
    #[arg(long)]
    pub theme: Option<String>,

    /// Model preselected for new chats
    #[arg(long)]
    pub default_model: Option<String>,
}

pub fn run(args: SetPreferencesArgs, data_dir: &Path) -> Result<()> {
    let users = context::open_users(data_dir)?;

    let user = users
        .find_by_email(&args.email)
        .context("Failed to look up the email address")?
        .with_context(|| format!("No account with email {}", args.email))?;

    let updated = users
        .update_preferences(
            &user.id,
            PreferencesPatch {
                theme: args.theme,
                default_model: args.default_model,
            },
        )
        .context("Failed to update preferences")?
        .context("Account disappeared during the update")?;

    output::json_pretty(&updated)?;
    output::success("Preferences updated");

    Ok(())
}
