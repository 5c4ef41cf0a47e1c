//! User-entered codes: 6-digit authenticator codes and declaration codes.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// Number of digits in an authenticator code.
pub const CODE_LENGTH: usize = 6;

/// A complete 6-digit authenticator code.
///
/// Flow operations take this type rather than a raw string, so a short or
/// non-numeric entry is not invocable at all instead of being a runtime
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Whether a partial entry has reached submittable shape. Drives the
    /// enabled/disabled state of the submit affordance.
    pub fn is_complete(input: &str) -> bool {
        input.len() == CODE_LENGTH && input.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VerificationCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_complete(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidCode)
        }
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declaration code copied from the published disclosure artifact.
/// Trimmed on construction; must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationCode(String);

impl DeclarationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DeclarationCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(DomainError::EmptyDeclarationCode)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl fmt::Display for DeclarationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
