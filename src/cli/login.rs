//! Interactive login command.
//!
//! Walks the full bootstrap sequence: declaration gate for first-time
//! accounts, TOTP enrollment or verification, session bootstrap.

use std::sync::Arc;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::api::{AuthBackend, HttpBackend};
use crate::config::Config;
use crate::domain::{DeclarationCode, VerificationCode};
use crate::error::Result;
use crate::flow::{DeclarationGate, LoginFlow, LoginState, Route, SubmitOutcome};
use crate::store::{PendingSecretStore, SessionStore};

use super::{output, paths, ConfigPathArg};

const DISCLAIMER: &[&str] = &[
    "This software is a control panel for a live trading deployment",
    "running on your own server. Digital-asset trading carries real",
    "financial risk; you alone are responsible for funds and trades.",
    "The panel, backend, and trading logic are fully open source, and",
    "no user data leaves your server.",
];

pub async fn execute(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load(args.path())?;
    config.init_logging();

    let session = Arc::new(SessionStore::open(paths::session_file()));
    let backend: Arc<dyn AuthBackend> = Arc::new(HttpBackend::new(
        config.network.api_url.clone(),
        Arc::clone(&session),
    ));
    let secrets = PendingSecretStore::new(paths::pending_secret_file());
    let mut flow = LoginFlow::new(backend, session, secrets, config.enrollment.issuer);

    let theme = ColorfulTheme::default();

    loop {
        flow.start().await?;
        match flow.state().clone() {
            LoginState::DeclarationPending => {
                let gate = flow.declaration_gate();
                if !run_declaration_gate(&theme, gate).await? {
                    output::note("Login aborted.");
                    return Ok(());
                }
                // The server decides whether the declaration is now on
                // record; go round and re-fetch account status.
            }
            LoginState::EnrollmentReady { secret, uri } => {
                output::section("First-time enrollment");
                output::note("Add this key to your authenticator app (scan or type it),");
                output::note("then confirm with the 6-digit code the app shows.");
                println!();
                output::key_value("Secret", &secret);
                output::key_value("URI", &uri);

                return submit_codes(&theme, &mut flow, true).await;
            }
            LoginState::VerificationReady => {
                output::section("Login");
                output::note("Enter the 6-digit code from your authenticator app.");

                return submit_codes(&theme, &mut flow, false).await;
            }
            LoginState::Loading | LoginState::Success { .. } => return Ok(()),
        }
    }
}

/// Disclaimer acknowledgment plus declaration-code entry. Returns `false`
/// if the user backs out.
async fn run_declaration_gate(theme: &ColorfulTheme, mut gate: DeclarationGate) -> Result<bool> {
    output::section("Usage disclaimer");
    for line in DISCLAIMER {
        output::note(line);
    }
    println!();

    let agreed = Confirm::with_theme(theme)
        .with_prompt("I have read and agree to the terms above")
        .default(false)
        .interact()?;
    gate.acknowledge(agreed);
    if !gate.can_enter_code() {
        return Ok(false);
    }

    output::section("Open-source disclosure");
    output::note("Open the project repositories, locate the published code.txt,");
    output::note("and paste the declaration code it contains.");

    loop {
        let input: String = Input::with_theme(theme)
            .with_prompt("Declaration code")
            .interact_text()?;
        gate.edit_code();

        let code: DeclarationCode = match input.parse() {
            Ok(code) => code,
            Err(err) => {
                output::warn(&err.to_string());
                continue;
            }
        };

        gate.submit_code(&code).await?;
        if gate.accepted() {
            output::ok("Declaration code accepted");
            return Ok(true);
        }

        output::error("Declaration code rejected");
        let retry = Confirm::with_theme(theme)
            .with_prompt("Try another code?")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(false);
        }
    }
}

/// Prompt-and-submit loop shared by the bind and verify paths. The entered
/// code is local to each iteration, so it is gone after every attempt no
/// matter how the attempt resolves.
async fn submit_codes(theme: &ColorfulTheme, flow: &mut LoginFlow, binding: bool) -> Result<()> {
    loop {
        let input: String = Input::with_theme(theme)
            .with_prompt("Authenticator code")
            .validate_with(|entry: &String| {
                if VerificationCode::is_complete(entry) {
                    Ok(())
                } else {
                    Err("enter exactly 6 digits")
                }
            })
            .interact_text()?;
        let code: VerificationCode = input.parse()?;

        let outcome = if binding {
            flow.confirm_bind(code).await?
        } else {
            flow.confirm_verify(code).await?
        };

        match outcome {
            SubmitOutcome::Routed(route) => {
                announce(route);
                return Ok(());
            }
            SubmitOutcome::Rejected => {
                output::error("Code rejected; try again");
            }
            SubmitOutcome::ProfilePending => {
                return settle_profile(theme, flow).await;
            }
        }
    }
}

/// The credential is in place but the profile fetch failed; offer explicit
/// retries rather than stranding the user.
async fn settle_profile(theme: &ColorfulTheme, flow: &mut LoginFlow) -> Result<()> {
    loop {
        output::warn("Logged in, but fetching your profile failed.");
        let retry = Confirm::with_theme(theme)
            .with_prompt("Retry the profile fetch?")
            .default(true)
            .interact()?;
        if !retry {
            output::note("Credential kept; run `qronos-panel login` again to finish.");
            return Ok(());
        }

        match flow.retry_profile().await? {
            SubmitOutcome::Routed(route) => {
                announce(route);
                return Ok(());
            }
            SubmitOutcome::ProfilePending | SubmitOutcome::Rejected => continue,
        }
    }
}

fn announce(route: Route) {
    match route {
        Route::Home => output::ok("Logged in. Panel home is ready."),
        Route::BindIdentity => {
            output::ok("Logged in.");
            output::warn("No messaging identity is bound yet; bind one to unlock the panel.");
        }
    }
}
