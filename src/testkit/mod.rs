//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).

mod backend;

pub use backend::{
    grant, LoginCall, MockBackend, ScriptedLogin, ScriptedProfile, ScriptedVerdict,
};
