//! Local persistence: pending enrollment secret and session credential.

pub mod secret_store;
pub mod session;

pub use secret_store::PendingSecretStore;
pub use session::SessionStore;
