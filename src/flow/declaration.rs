//! Declaration gate: disclaimer acknowledgment plus declaration-code
//! verification, required once per account before any 2FA setup is shown.

use std::sync::Arc;

use tracing::warn;

use crate::api::AuthBackend;
use crate::domain::DeclarationCode;
use crate::error::{AuthError, Result};

use super::guard::SingleFlight;

pub struct DeclarationGate {
    backend: Arc<dyn AuthBackend>,
    acknowledged: bool,
    accepted: bool,
    rejected: bool,
    submitting: SingleFlight,
}

impl DeclarationGate {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            acknowledged: false,
            accepted: false,
            rejected: false,
            submitting: SingleFlight::default(),
        }
    }

    /// Record the disclaimer checkbox. Code entry stays unavailable until
    /// this is `true`.
    pub fn acknowledge(&mut self, agreed: bool) {
        self.acknowledged = agreed;
    }

    pub fn can_enter_code(&self) -> bool {
        self.acknowledged
    }

    /// The entered code changed; clear any prior outcome so the gate is
    /// re-armed.
    pub fn edit_code(&mut self) {
        self.accepted = false;
        self.rejected = false;
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn rejected(&self) -> bool {
        self.rejected
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_in_flight()
    }

    /// Send the code for verification and fold the result into the
    /// `accepted`/`rejected` flags.
    ///
    /// Transport failure fails closed: it reads as a rejection, never as an
    /// error to the caller. Once the gate reports `accepted`, the caller
    /// re-fetches account status — the server is the source of truth for
    /// whether the declaration is now permanently on record.
    pub async fn submit_code(&mut self, code: &DeclarationCode) -> Result<()> {
        if !self.acknowledged {
            return Err(AuthError::UnexpectedState {
                expected: "disclaimer acknowledged",
            }
            .into());
        }
        let _guard = self
            .submitting
            .try_acquire()
            .ok_or(AuthError::SubmissionInFlight)?;

        match self.backend.verify_declaration_code(code).await {
            Ok(true) => {
                self.accepted = true;
                self.rejected = false;
            }
            Ok(false) => {
                self.rejected = true;
            }
            Err(err) => {
                warn!(error = %err, "declaration verification failed, treating as rejected");
                self.rejected = true;
            }
        }
        Ok(())
    }
}
