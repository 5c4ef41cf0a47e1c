//! End-to-end login flow scenarios against the scripted backend.

use std::sync::Arc;

use qronos_panel::api::AccountStatus;
use qronos_panel::domain::{VerificationCode, BASE32_ALPHABET, SECRET_LENGTH};
use qronos_panel::flow::{LoginFlow, LoginState, Route, SubmitOutcome};
use qronos_panel::store::{PendingSecretStore, SessionStore};
use qronos_panel::testkit::{grant, MockBackend, ScriptedLogin, ScriptedProfile, ScriptedVerdict};
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    backend: Arc<MockBackend>,
    session: Arc<SessionStore>,
    flow: LoginFlow,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(MockBackend::default());
    let session = Arc::new(SessionStore::open(dir.path().join("session.json")));
    let secrets = PendingSecretStore::new(dir.path().join("ga-secret-key"));
    let flow = LoginFlow::new(
        Arc::clone(&backend) as Arc<dyn qronos_panel::api::AuthBackend>,
        Arc::clone(&session),
        secrets,
        "QRONOSUI",
    );
    Harness {
        _dir: dir,
        backend,
        session,
        flow,
    }
}

fn status(is_first_use: bool, is_declaration_accepted: bool) -> AccountStatus {
    AccountStatus {
        is_first_use,
        is_declaration_accepted,
    }
}

fn code(digits: &str) -> VerificationCode {
    digits.parse().unwrap()
}

#[tokio::test]
async fn fresh_account_hits_the_declaration_gate_before_any_secret() {
    let mut h = harness();
    h.backend.push_status(status(true, false));

    h.flow.start().await.unwrap();

    assert!(matches!(h.flow.state(), LoginState::DeclarationPending));
    // No secret may be materialized while the gate is pending.
    assert!(!h._dir.path().join("ga-secret-key").exists());
}

#[tokio::test]
async fn declared_first_use_account_enrolls_and_binds() {
    let mut h = harness();
    h.backend.push_status(status(true, true));
    h.backend.push_login(ScriptedLogin::Grant(grant(true)));
    h.backend
        .push_profile(ScriptedProfile::Found(serde_json::json!({"name": "ops"})));

    h.flow.start().await.unwrap();

    let (secret, uri) = match h.flow.state() {
        LoginState::EnrollmentReady { secret, uri } => (secret.clone(), uri.clone()),
        state => panic!("expected enrollment, got {state:?}"),
    };
    assert_eq!(secret.as_str().len(), SECRET_LENGTH);
    assert!(secret.as_str().bytes().all(|b| BASE32_ALPHABET.contains(&b)));
    assert!(uri.contains(secret.as_str()));

    let outcome = h.flow.confirm_bind(code("123456")).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Routed(Route::Home));
    assert!(matches!(
        h.flow.state(),
        LoginState::Success {
            route: Route::Home
        }
    ));
    // The bind request carried the displayed secret, and consuming it
    // deleted the stored copy.
    let calls = h.backend.login_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].secret.as_deref(), Some(secret.as_str()));
    assert!(!h._dir.path().join("ga-secret-key").exists());

    assert!(h.session.access_token().is_some());
    assert!(h.session.profile().unwrap().contains("ops"));
}

#[tokio::test]
async fn returning_account_verifies_without_a_secret() {
    let mut h = harness();
    h.backend.push_status(status(false, true));
    h.backend.push_login(ScriptedLogin::Rejected);

    h.flow.start().await.unwrap();
    assert!(matches!(h.flow.state(), LoginState::VerificationReady));

    let outcome = h.flow.confirm_verify(code("000000")).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert!(matches!(h.flow.state(), LoginState::VerificationReady));
    assert!(!h.flow.is_submitting());
    assert!(h.session.access_token().is_none());

    let calls = h.backend.login_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].secret.is_none());
}

#[tokio::test]
async fn unbound_grant_routes_to_identity_binding_without_a_profile() {
    let mut h = harness();
    h.backend.push_status(status(false, true));
    h.backend.push_login(ScriptedLogin::Grant(grant(false)));

    h.flow.start().await.unwrap();
    let outcome = h.flow.confirm_verify(code("123456")).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Routed(Route::BindIdentity));
    assert!(h.session.access_token().is_some());
    assert!(h.session.profile().is_none());
}

#[tokio::test]
async fn transport_failure_on_verify_is_a_retryable_rejection() {
    let mut h = harness();
    h.backend.push_status(status(false, true));
    h.backend.push_login(ScriptedLogin::Transport);
    h.backend.push_login(ScriptedLogin::Grant(grant(false)));

    h.flow.start().await.unwrap();

    let outcome = h.flow.confirm_verify(code("123456")).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert!(!h.flow.is_submitting());

    // The flow folded back; an immediate retry works.
    let outcome = h.flow.confirm_verify(code("654321")).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Routed(Route::BindIdentity));
}

#[tokio::test]
async fn rejected_bind_keeps_the_pending_secret() {
    let mut h = harness();
    h.backend.push_status(status(true, true));
    h.backend.push_login(ScriptedLogin::Rejected);

    h.flow.start().await.unwrap();
    let secret = match h.flow.state() {
        LoginState::EnrollmentReady { secret, .. } => secret.clone(),
        state => panic!("expected enrollment, got {state:?}"),
    };

    let outcome = h.flow.confirm_bind(code("123456")).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected);

    // The same secret survives for the next attempt; a scanned QR code
    // must stay valid.
    let stored = PendingSecretStore::new(h._dir.path().join("ga-secret-key"))
        .load()
        .unwrap();
    assert_eq!(stored, secret);
}

#[tokio::test]
async fn enrollment_secret_is_stable_across_restarts() {
    let mut h = harness();
    h.backend.push_status(status(true, true));
    h.backend.push_status(status(true, true));

    h.flow.start().await.unwrap();
    let first = match h.flow.state() {
        LoginState::EnrollmentReady { secret, .. } => secret.clone(),
        state => panic!("expected enrollment, got {state:?}"),
    };

    // Simulate a panel restart mid-enrollment.
    h.flow.start().await.unwrap();
    let second = match h.flow.state() {
        LoginState::EnrollmentReady { secret, .. } => secret.clone(),
        state => panic!("expected enrollment, got {state:?}"),
    };

    assert_eq!(first, second);
}

#[tokio::test]
async fn first_use_clears_a_stale_session_credential() {
    let mut h = harness();
    h.session
        .set_access_token("stale-token".to_string())
        .unwrap();
    h.backend.push_status(status(true, false));

    h.flow.start().await.unwrap();

    assert!(h.session.access_token().is_none());
}

#[tokio::test]
async fn profile_failure_leaves_an_explicit_retry() {
    let mut h = harness();
    h.backend.push_status(status(false, true));
    h.backend.push_login(ScriptedLogin::Grant(grant(true)));
    h.backend.push_profile(ScriptedProfile::Transport);
    h.backend
        .push_profile(ScriptedProfile::Found(serde_json::json!({"name": "ops"})));

    h.flow.start().await.unwrap();

    let outcome = h.flow.confirm_verify(code("123456")).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::ProfilePending);
    // Credential retained across the failed fetch.
    assert!(h.session.access_token().is_some());
    assert!(h.session.profile().is_none());

    let outcome = h.flow.retry_profile().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Routed(Route::Home));
    assert!(h.session.profile().is_some());
}

#[tokio::test]
async fn declaration_gate_round_trip_re_fetches_status() {
    let mut h = harness();
    h.backend.push_status(status(true, false));
    h.backend.push_declaration(ScriptedVerdict::Rejected);
    h.backend.push_declaration(ScriptedVerdict::Accepted);
    h.backend.push_status(status(true, true));

    h.flow.start().await.unwrap();
    assert!(matches!(h.flow.state(), LoginState::DeclarationPending));

    let mut gate = h.flow.declaration_gate();
    gate.acknowledge(true);

    gate.submit_code(&"wrong".parse().unwrap()).await.unwrap();
    assert!(gate.rejected());
    gate.edit_code();
    assert!(!gate.rejected());

    gate.submit_code(&"right".parse().unwrap()).await.unwrap();
    assert!(gate.accepted());
    assert_eq!(h.backend.declaration_calls(), vec!["wrong", "right"]);

    // Gate completion means: re-fetch status from the source of truth.
    h.flow.start().await.unwrap();
    assert!(matches!(h.flow.state(), LoginState::EnrollmentReady { .. }));
}
