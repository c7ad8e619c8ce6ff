//! Seam for session token derivation.

use crate::domain::{Error, LoginCredentials, SessionToken};

/// Derives an opaque session token from submitted credentials.
///
/// Implementations must return tokens of exactly
/// [`crate::domain::SESSION_TOKEN_LENGTH`] characters, because that length is
/// all the authorization check inspects.
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `credentials`.
    fn issue(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error>;
}
