//! Backend port for the login bootstrap flow.
//!
//! The panel backend is an external service; this trait is the seam between
//! the flow logic and its transport, and the integration point mocks attach
//! to in tests.

use async_trait::async_trait;

use crate::domain::{DeclarationCode, EnrollmentSecret, VerificationCode};
use crate::error::Result;

use super::types::{AccountStatus, SessionGrant};

/// Operations the login flow consumes.
///
/// Explicit backend rejection is `Ok(false)` / `Ok(None)`; `Err` means the
/// request itself failed (network, malformed response). Callers on the
/// submit paths treat both the same way: reset, clear the entered code,
/// allow retry.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Source of truth for flow branching. Fetched once per flow start.
    async fn account_status(&self) -> Result<AccountStatus>;

    /// Check a declaration code. `Ok(true)` only when the server both
    /// answered and accepted (`result && data`).
    async fn verify_declaration_code(&self, code: &DeclarationCode) -> Result<bool>;

    /// First-time enrollment: bind `secret` to the account, proving
    /// possession with `code`.
    async fn bind_totp(
        &self,
        code: &VerificationCode,
        secret: &EnrollmentSecret,
    ) -> Result<Option<SessionGrant>>;

    /// Returning-user path: check `code` against the already-bound secret.
    async fn verify_totp(&self, code: &VerificationCode) -> Result<Option<SessionGrant>>;

    /// Fetch the profile for the current session. Requires a held credential;
    /// called only when the grant reported `is_bind == true`.
    async fn user_profile(&self) -> Result<Option<serde_json::Value>>;

    /// Invalidate the current session server-side.
    async fn logout(&self) -> Result<()>;
}
