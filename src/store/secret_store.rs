//! Durable storage for the pending enrollment secret.
//!
//! One fixed key holds the secret from generation until the bind succeeds,
//! so a page-reload-equivalent (panel restart) mid-enrollment keeps showing
//! the same secret the authenticator app may already have scanned.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use rand::rngs::OsRng;
use tracing::warn;

use crate::domain::EnrollmentSecret;
use crate::error::{Result, StoreError};

pub struct PendingSecretStore {
    path: PathBuf,
}

impl PendingSecretStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the stored secret, if a valid one is pending.
    pub fn load(&self) -> Option<EnrollmentSecret> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match raw.trim().parse() {
            Ok(secret) => Some(secret),
            Err(err) => {
                // Not a usable secret; treat as absent so a fresh one is drawn.
                warn!(error = %err, "ignoring invalid pending secret");
                None
            }
        }
    }

    /// Reuse the pending secret or draw and persist a fresh one.
    ///
    /// Stable across calls: without an intervening [`clear`](Self::clear)
    /// this always returns the same secret.
    pub fn load_or_generate(&self) -> Result<EnrollmentSecret> {
        if let Some(secret) = self.load() {
            return Ok(secret);
        }
        let secret = EnrollmentSecret::generate(&mut OsRng);
        self.persist(&secret)?;
        Ok(secret)
    }

    /// Delete the pending secret. Called exactly once, after a successful
    /// bind consumes it.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|source| StoreError::Write {
                what: "pending secret",
                source,
            })?;
        }
        Ok(())
    }

    fn persist(&self, secret: &EnrollmentSecret) -> Result<()> {
        let write = |source| StoreError::Write {
            what: "pending secret",
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

        file.write_all(secret.as_str().as_bytes())
            .map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        Ok(())
    }
}
