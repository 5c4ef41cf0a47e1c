//! Path utilities for qronos-panel.
//!
//! All data lives under `~/.qronos-panel/`:
//! - `~/.qronos-panel/config.toml` - main configuration
//! - `~/.qronos-panel/session.json` - session credential and cached profile
//! - `~/.qronos-panel/ga-secret-key` - pending enrollment secret

use std::path::PathBuf;

/// Returns the panel home directory (`~/.qronos-panel/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".qronos-panel")
}

/// Returns the default config file path (`~/.qronos-panel/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the session file path (`~/.qronos-panel/session.json`).
pub fn session_file() -> PathBuf {
    home_dir().join("session.json")
}

/// Returns the pending-enrollment-secret path (`~/.qronos-panel/ga-secret-key`).
pub fn pending_secret_file() -> PathBuf {
    home_dir().join("ga-secret-key")
}
