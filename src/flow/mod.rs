//! Login bootstrap state machine.
//!
//! Drives the whole sequence: account-status fetch, the declaration gate
//! for first-time accounts, TOTP enrollment or verification, and session
//! bootstrap on success.

pub mod bootstrap;
pub mod declaration;
mod guard;

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{AuthBackend, SessionGrant};
use crate::domain::{provisioning_uri, EnrollmentSecret, VerificationCode};
use crate::error::{AuthError, Error, Result};
use crate::store::{PendingSecretStore, SessionStore};

pub use bootstrap::Route;
pub use declaration::DeclarationGate;

use guard::SingleFlight;

/// Observable flow state. `Submitting` is not a variant: it is the
/// single-flight flag, transient by construction, queried via
/// [`LoginFlow::is_submitting`].
#[derive(Debug, Clone)]
pub enum LoginState {
    /// Account status not fetched yet.
    Loading,
    /// Declaration gate must run before any secret is shown.
    DeclarationPending,
    /// First use: secret and provisioning URI on display, awaiting a code.
    EnrollmentReady {
        secret: EnrollmentSecret,
        uri: String,
    },
    /// A secret is already bound; only the code prompt is shown.
    VerificationReady,
    /// Login finished; session credential persisted.
    Success { route: Route },
}

/// Result of one submit attempt. Rejection is an outcome, not an error —
/// the flow folds back into the ready state and the caller may retry
/// without limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Credential persisted and the post-login route resolved.
    Routed(Route),
    /// Backend rejected the code (or the request failed). Code input should
    /// be cleared; the flow is ready for another attempt.
    Rejected,
    /// Credential persisted but the profile fetch failed; call
    /// [`LoginFlow::retry_profile`] to finish.
    ProfilePending,
}

pub struct LoginFlow {
    backend: Arc<dyn AuthBackend>,
    session: Arc<SessionStore>,
    secrets: PendingSecretStore,
    issuer: String,
    state: LoginState,
    submitting: SingleFlight,
    pending_grant: Option<SessionGrant>,
}

impl LoginFlow {
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        session: Arc<SessionStore>,
        secrets: PendingSecretStore,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            session,
            secrets,
            issuer: issuer.into(),
            state: LoginState::Loading,
            submitting: SingleFlight::default(),
            pending_grant: None,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_in_flight()
    }

    /// A declaration gate wired to the same backend. Run it when the state
    /// is [`LoginState::DeclarationPending`], then call [`start`](Self::start)
    /// again — the server decides whether the declaration is now on record.
    pub fn declaration_gate(&self) -> DeclarationGate {
        DeclarationGate::new(Arc::clone(&self.backend))
    }

    /// Fetch account status and branch.
    ///
    /// A first-use account resets the session store first, so a stale
    /// credential from an earlier install cannot contaminate the new
    /// enrollment. The enrollment secret is only materialized on the
    /// enrollment branch — never while the declaration gate is pending.
    pub async fn start(&mut self) -> Result<()> {
        self.state = LoginState::Loading;
        let status = self.backend.account_status().await?;
        info!(
            first_use = status.is_first_use,
            declaration = status.is_declaration_accepted,
            "account status fetched"
        );

        if status.is_first_use {
            self.session.reset()?;
        }

        self.state = if !status.is_declaration_accepted {
            LoginState::DeclarationPending
        } else if status.is_first_use {
            let secret = self.secrets.load_or_generate()?;
            let uri = provisioning_uri(&secret, &self.issuer);
            LoginState::EnrollmentReady { secret, uri }
        } else {
            LoginState::VerificationReady
        };
        Ok(())
    }

    /// Enrollment path: send the code together with the displayed secret.
    /// On acceptance the stored secret is consumed and the session
    /// bootstraps; on rejection the flow stays in `EnrollmentReady`.
    pub async fn confirm_bind(&mut self, code: VerificationCode) -> Result<SubmitOutcome> {
        let secret = match &self.state {
            LoginState::EnrollmentReady { secret, .. } => secret.clone(),
            _ => {
                return Err(AuthError::UnexpectedState {
                    expected: "enrollment",
                }
                .into())
            }
        };
        let _guard = self
            .submitting
            .try_acquire()
            .ok_or(AuthError::SubmissionInFlight)?;

        match self.backend.bind_totp(&code, &secret).await {
            Ok(Some(grant)) => {
                self.secrets.clear()?;
                self.finalize(grant).await
            }
            Ok(None) => Ok(SubmitOutcome::Rejected),
            Err(err) => {
                warn!(error = %err, "bind attempt failed");
                Ok(SubmitOutcome::Rejected)
            }
        }
    }

    /// Returning-user path: code only. A leftover secret from an abandoned
    /// enrollment is deliberately left untouched here.
    pub async fn confirm_verify(&mut self, code: VerificationCode) -> Result<SubmitOutcome> {
        if !matches!(self.state, LoginState::VerificationReady) {
            return Err(AuthError::UnexpectedState {
                expected: "verification",
            }
            .into());
        }
        let _guard = self
            .submitting
            .try_acquire()
            .ok_or(AuthError::SubmissionInFlight)?;

        match self.backend.verify_totp(&code).await {
            Ok(Some(grant)) => self.finalize(grant).await,
            Ok(None) => Ok(SubmitOutcome::Rejected),
            Err(err) => {
                warn!(error = %err, "verification attempt failed");
                Ok(SubmitOutcome::Rejected)
            }
        }
    }

    /// Retry the profile fetch after [`SubmitOutcome::ProfilePending`]. The
    /// credential from the original grant is still in place.
    pub async fn retry_profile(&mut self) -> Result<SubmitOutcome> {
        let grant = self.pending_grant.clone().ok_or(AuthError::UnexpectedState {
            expected: "profile retry",
        })?;
        let _guard = self
            .submitting
            .try_acquire()
            .ok_or(AuthError::SubmissionInFlight)?;
        self.finalize(grant).await
    }

    /// Callers hold the single-flight guard across this.
    async fn finalize(&mut self, grant: SessionGrant) -> Result<SubmitOutcome> {
        match bootstrap::finalize(self.backend.as_ref(), &self.session, &grant).await {
            Ok(route) => {
                self.pending_grant = None;
                self.state = LoginState::Success { route };
                Ok(SubmitOutcome::Routed(route))
            }
            Err(Error::Auth(AuthError::ProfileUnavailable(reason))) => {
                warn!(reason, "profile fetch failed; credential retained");
                self.pending_grant = Some(grant);
                Ok(SubmitOutcome::ProfilePending)
            }
            Err(err) => Err(err),
        }
    }
}
