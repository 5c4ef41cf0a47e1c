//! Logout command: server-side invalidation plus local session reset.

use std::sync::Arc;

use crate::api::{AuthBackend, HttpBackend};
use crate::config::Config;
use crate::error::Result;
use crate::store::SessionStore;

use super::{output, paths, ConfigPathArg};

pub async fn execute(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load(args.path())?;
    config.init_logging();

    let session = Arc::new(SessionStore::open(paths::session_file()));
    let backend = HttpBackend::new(config.network.api_url.clone(), Arc::clone(&session));

    run(&backend, &session).await?;
    output::ok("Logged out");
    Ok(())
}

/// Invalidate the session server-side when a credential is held, then reset
/// the local store. The server call is best effort; the local reset happens
/// regardless.
pub async fn run(backend: &dyn AuthBackend, session: &SessionStore) -> Result<()> {
    if session.access_token().is_some() {
        if let Err(err) = backend.logout().await {
            output::warn(&format!("Server-side logout failed: {err}"));
        }
    }

    session.reset()?;
    Ok(())
}
