//! Process-wide session store.
//!
//! Holds the access token and the serialized profile, file-backed so they
//! survive across panel invocations (the terminal analog of browser session
//! storage). Session Bootstrap is the single writer; everything else reads.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    access_token: Option<String>,
    profile: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

pub struct SessionStore {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Open the store at `path`, loading any existing session. A missing
    /// file is an empty session; an unreadable one is discarded rather than
    /// wedging login.
    pub fn open(path: PathBuf) -> Self {
        let state = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "discarding unreadable session file");
                SessionState::default()
            }),
            Err(_) => SessionState::default(),
        };
        Self {
            path,
            state: RwLock::new(state),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token.clone()
    }

    pub fn profile(&self) -> Option<String> {
        self.state.read().profile.clone()
    }

    pub fn set_access_token(&self, token: String) -> Result<()> {
        let mut state = self.state.write();
        state.access_token = Some(token);
        self.persist(&mut state)
    }

    pub fn set_profile(&self, profile: String) -> Result<()> {
        let mut state = self.state.write();
        state.profile = Some(profile);
        self.persist(&mut state)
    }

    pub fn clear_profile(&self) -> Result<()> {
        let mut state = self.state.write();
        state.profile = None;
        self.persist(&mut state)
    }

    /// Drop the credential and profile together. Called on logout and
    /// whenever a fresh first-use flow begins, so a stale credential never
    /// contaminates a new enrollment.
    pub fn reset(&self) -> Result<()> {
        let mut state = self.state.write();
        *state = SessionState::default();
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|source| StoreError::Write {
                what: "session file",
                source,
            })?;
        }
        Ok(())
    }

    /// Write-to-temp-then-rename so readers never observe a torn file.
    fn persist(&self, state: &mut SessionState) -> Result<()> {
        state.updated_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(&*state)?;

        let write = |source| StoreError::Write {
            what: "session file",
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(write)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            write(e)
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        Ok(())
    }
}
