//! Command-line interface definitions.

pub mod login;
pub mod logout;
pub mod output;
pub mod paths;
pub mod status;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// qronos-panel - terminal control panel for a server-resident trading process.
#[derive(Parser, Debug)]
#[command(name = "qronos-panel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in: declaration gate, TOTP enrollment or verification
    Login(ConfigPathArg),

    /// Show session and account status
    Status(ConfigPathArg),

    /// Invalidate the session and clear local credentials
    Logout(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file (default: ~/.qronos-panel/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigPathArg {
    pub fn path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(paths::default_config)
    }
}
