//! Session bootstrap: turn a fresh credential into a finished login.

use tracing::info;

use crate::api::{AuthBackend, SessionGrant};
use crate::error::{AuthError, Result};
use crate::store::SessionStore;

/// Where the panel lands after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Fully bound session; the main panel view.
    Home,
    /// Credential valid but no messaging identity bound yet.
    BindIdentity,
}

/// Persist the credential and resolve the post-login route.
///
/// The session store is written only here — every other component treats it
/// as read-only between bootstraps.
///
/// A failed profile fetch keeps the credential and surfaces
/// [`AuthError::ProfileUnavailable`], so the caller can offer an explicit
/// retry instead of silently stranding the user.
pub async fn finalize(
    backend: &dyn AuthBackend,
    session: &SessionStore,
    grant: &SessionGrant,
) -> Result<Route> {
    session.set_access_token(grant.access_token.clone())?;

    if !grant.is_bind {
        session.clear_profile()?;
        info!("session established without a bound identity");
        return Ok(Route::BindIdentity);
    }

    match backend.user_profile().await {
        Ok(Some(profile)) => {
            session.set_profile(serde_json::to_string(&profile)?)?;
            info!("session established, profile cached");
            Ok(Route::Home)
        }
        Ok(None) => Err(AuthError::ProfileUnavailable(
            "backend declined the profile request".to_string(),
        )
        .into()),
        Err(err) => Err(AuthError::ProfileUnavailable(err.to_string()).into()),
    }
}
