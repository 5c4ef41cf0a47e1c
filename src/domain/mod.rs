//! Login-domain primitives: secrets, codes, provisioning URIs.

pub mod code;
pub mod error;
pub mod secret;
pub mod totp;

pub use code::{DeclarationCode, VerificationCode, CODE_LENGTH};
pub use error::DomainError;
pub use secret::{EnrollmentSecret, BASE32_ALPHABET, SECRET_LENGTH};
pub use totp::{provisioning_uri, DEFAULT_ISSUER};
