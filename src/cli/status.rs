//! Session and account status command.

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

    output::section("Panel");
    output::key_value("API", &config.network.api_url);
    output::key_value(
        "Session",
        if session.access_token().is_some() {
            "credential held"
        } else {
            "not logged in"
        },
    );
    output::key_value(
        "Profile",
        if session.profile().is_some() {
            "cached"
        } else {
            "absent"
        },
    );

    match backend.account_status().await {
        Ok(status) => {
            output::key_value(
                "Account",
                if status.is_first_use {
                    "first use (no TOTP secret bound)"
                } else {
                    "TOTP secret bound"
                },
            );
            output::key_value(
                "Declaration",
                if status.is_declaration_accepted {
                    "accepted"
                } else {
                    "pending"
                },
            );
        }
        Err(err) => output::warn(&format!("Backend unreachable: {err}")),
    }

    Ok(())
}
