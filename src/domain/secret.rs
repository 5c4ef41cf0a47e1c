//! Enrollment secrets for first-time TOTP binding.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::error::DomainError;

/// RFC 4648 Base32 alphabet used by authenticator apps.
pub const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Length of a generated enrollment secret in characters.
pub const SECRET_LENGTH: usize = 16;

/// A 16-character Base32 shared secret, generated client-side and handed to
/// the authenticator app during first-time enrollment.
///
/// Construction is restricted to [`EnrollmentSecret::generate`] and
/// [`FromStr`], so every value in circulation satisfies the length and
/// alphabet invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentSecret(String);

impl EnrollmentSecret {
    /// Draw a fresh secret, one uniform alphabet pick per position.
    ///
    /// Callers wanting production-grade secrets pass a CSPRNG such as
    /// [`rand::rngs::OsRng`].
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let secret = (0..SECRET_LENGTH)
            .map(|_| BASE32_ALPHABET[rng.gen_range(0..BASE32_ALPHABET.len())] as char)
            .collect();
        Self(secret)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EnrollmentSecret {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != SECRET_LENGTH {
            return Err(DomainError::InvalidSecret {
                reason: format!("{} characters", s.len()),
            });
        }
        if let Some(bad) = s.bytes().find(|b| !BASE32_ALPHABET.contains(b)) {
            return Err(DomainError::InvalidSecret {
                reason: format!("invalid character {:?}", bad as char),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for EnrollmentSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
