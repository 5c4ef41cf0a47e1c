//! Backend contract and its HTTP implementation.

pub mod backend;
pub mod client;
pub mod types;

pub use backend::AuthBackend;
pub use client::HttpBackend;
pub use types::{AccountStatus, SessionGrant};
