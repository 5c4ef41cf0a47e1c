use thiserror::Error;

/// Validation errors for user-entered login material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("enrollment secret must be 16 Base32 characters, got {reason}")]
    InvalidSecret { reason: String },

    #[error("verification code must be exactly 6 decimal digits")]
    InvalidCode,

    #[error("declaration code must not be empty")]
    EmptyDeclarationCode,
}
