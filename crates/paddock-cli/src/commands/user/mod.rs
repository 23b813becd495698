//! User subcommand implementations.

mod bootstrap;
mod login;
mod register;
mod set_preferences;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// Ensure the default admin account exists
    Bootstrap(bootstrap::BootstrapArgs),

    /// Register a new user account
    Register(register::RegisterArgs),

    /// Verify credentials and print the account
    Login(login::LoginArgs),

    /// Update dashboard preferences
    SetPreferences(set_preferences::SetPreferencesArgs),
}

pub fn handle(cmd: UserCommand, data_dir: &Path) -> Result<()> {
    match cmd.command {
        UserSubcommand::Bootstrap(args) => bootstrap::run(args, data_dir),
        UserSubcommand::Register(args) => register::run(args, data_dir),
        UserSubcommand::Login(args) => login::run(args, data_dir),
        UserSubcommand::SetPreferences(args) => set_preferences::run(args, data_dir),
    }
}
