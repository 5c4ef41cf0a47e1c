//! Scripted mock backend.
//!
//! Responses are queued per endpoint and consumed in order; an exhausted
//! queue panics, which in a test means the flow made a call the script did
//! not anticipate.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::backend::AuthBackend;
use crate::api::types::{AccountStatus, SessionGrant};
use crate::domain::{DeclarationCode, EnrollmentSecret, VerificationCode};
use crate::error::{Error, Result};

/// Scripted reply for the declaration endpoint.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedVerdict {
    Accepted,
    /// Explicit rejection, including the `result=true, data=false` shape.
    Rejected,
    Transport,
}

/// Scripted reply for the login endpoint (bind and verify alike).
#[derive(Debug, Clone)]
pub enum ScriptedLogin {
    Grant(SessionGrant),
    Rejected,
    Transport,
}

/// Scripted reply for the profile endpoint.
#[derive(Debug, Clone)]
pub enum ScriptedProfile {
    Found(serde_json::Value),
    Missing,
    Transport,
}

/// One recorded call to the login endpoint.
#[derive(Debug, Clone)]
pub struct LoginCall {
    pub code: String,
    /// `Some` on the bind path, `None` on the verify path.
    pub secret: Option<String>,
}

/// Convenience grant for scripts.
pub fn grant(is_bind: bool) -> SessionGrant {
    SessionGrant {
        access_token: "test-access-token".to_string(),
        token_type: Some("Bearer".to_string()),
        is_bind,
    }
}

#[derive(Default)]
pub struct MockBackend {
    statuses: Mutex<VecDeque<AccountStatus>>,
    declarations: Mutex<VecDeque<ScriptedVerdict>>,
    logins: Mutex<VecDeque<ScriptedLogin>>,
    profiles: Mutex<VecDeque<ScriptedProfile>>,
    login_calls: Mutex<Vec<LoginCall>>,
    declaration_calls: Mutex<Vec<String>>,
    logout_calls: Mutex<usize>,
}

impl MockBackend {
    pub fn push_status(&self, status: AccountStatus) {
        self.statuses.lock().push_back(status);
    }

    pub fn push_declaration(&self, verdict: ScriptedVerdict) {
        self.declarations.lock().push_back(verdict);
    }

    pub fn push_login(&self, login: ScriptedLogin) {
        self.logins.lock().push_back(login);
    }

    pub fn push_profile(&self, profile: ScriptedProfile) {
        self.profiles.lock().push_back(profile);
    }

    /// Every call made to the login endpoint, in order.
    pub fn login_calls(&self) -> Vec<LoginCall> {
        self.login_calls.lock().clone()
    }

    pub fn declaration_calls(&self) -> Vec<String> {
        self.declaration_calls.lock().clone()
    }

    pub fn logout_calls(&self) -> usize {
        *self.logout_calls.lock()
    }

    fn transport_error() -> Error {
        Error::Io(std::io::Error::other("scripted transport failure"))
    }

    fn next_login(&self, call: LoginCall) -> Result<Option<SessionGrant>> {
        self.login_calls.lock().push(call);
        match self
            .logins
            .lock()
            .pop_front()
            .expect("no scripted login reply left")
        {
            ScriptedLogin::Grant(grant) => Ok(Some(grant)),
            ScriptedLogin::Rejected => Ok(None),
            ScriptedLogin::Transport => Err(Self::transport_error()),
        }
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn account_status(&self) -> Result<AccountStatus> {
        Ok(self
            .statuses
            .lock()
            .pop_front()
            .expect("no scripted account status left"))
    }

    async fn verify_declaration_code(&self, code: &DeclarationCode) -> Result<bool> {
        self.declaration_calls.lock().push(code.as_str().to_string());
        match self
            .declarations
            .lock()
            .pop_front()
            .expect("no scripted declaration verdict left")
        {
            ScriptedVerdict::Accepted => Ok(true),
            ScriptedVerdict::Rejected => Ok(false),
            ScriptedVerdict::Transport => Err(Self::transport_error()),
        }
    }

    async fn bind_totp(
        &self,
        code: &VerificationCode,
        secret: &EnrollmentSecret,
    ) -> Result<Option<SessionGrant>> {
        self.next_login(LoginCall {
            code: code.as_str().to_string(),
            secret: Some(secret.as_str().to_string()),
        })
    }

    async fn verify_totp(&self, code: &VerificationCode) -> Result<Option<SessionGrant>> {
        self.next_login(LoginCall {
            code: code.as_str().to_string(),
            secret: None,
        })
    }

    async fn user_profile(&self) -> Result<Option<serde_json::Value>> {
        match self
            .profiles
            .lock()
            .pop_front()
            .expect("no scripted profile reply left")
        {
            ScriptedProfile::Found(profile) => Ok(Some(profile)),
            ScriptedProfile::Missing => Ok(None),
            ScriptedProfile::Transport => Err(Self::transport_error()),
        }
    }

    async fn logout(&self) -> Result<()> {
        *self.logout_calls.lock() += 1;
        Ok(())
    }
}
