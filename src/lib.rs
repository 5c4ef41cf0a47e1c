//! qronos-panel - terminal control panel for a server-resident trading process.
//!
//! This crate implements the panel's login bootstrap flow: two-factor
//! authentication (TOTP) enrollment and verification, gated by a one-time
//! declaration-code acceptance step for first-time accounts.
//!
//! # Architecture
//!
//! The flow is a small state machine over an external backend:
//!
//! - **[`domain`]** - Login primitives: the 16-character Base32
//!   [`EnrollmentSecret`](domain::EnrollmentSecret), 6-digit
//!   [`VerificationCode`](domain::VerificationCode), and the `otpauth://`
//!   provisioning URI derivation.
//! - **[`api`]** - The backend port ([`AuthBackend`](api::AuthBackend)) and
//!   its `reqwest` implementation. The backend itself is an external
//!   service; this crate only consumes it.
//! - **[`store`]** - Local persistence: the pending enrollment secret
//!   (durable until a bind consumes it) and the session credential/profile.
//! - **[`flow`]** - The state machine:
//!   `Loading → {DeclarationPending, EnrollmentReady, VerificationReady}`,
//!   with submissions guarded by a single-flight flag and all failures
//!   folding back into a retryable ready state.
//! - **[`cli`]** - `login`, `status`, and `logout` commands.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use qronos_panel::api::HttpBackend;
//! use qronos_panel::flow::LoginFlow;
//! use qronos_panel::store::{PendingSecretStore, SessionStore};
//!
//! # async fn demo() -> qronos_panel::error::Result<()> {
//! let session = Arc::new(SessionStore::open("session.json".into()));
//! let backend = Arc::new(HttpBackend::new(
//!     "http://127.0.0.1:8000".into(),
//!     Arc::clone(&session),
//! ));
//! let secrets = PendingSecretStore::new("ga-secret-key".into());
//! let mut flow = LoginFlow::new(backend, session, secrets, "QRONOSUI");
//! flow.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod flow;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
