//! Authentication primitives: login credentials and session tokens.
//!
//! Credentials are built only after the login validation chain accepted the
//! payload, so the constructors here assume shape checks already ran.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

/// Exact length of every issued token, and the only property the
/// authorization check inspects.
pub const SESSION_TOKEN_LENGTH: usize = 16;

/// Login credentials accepted by the token issuer.
///
/// The password is wiped from memory when the value is dropped.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("deferiascomigo@gmail.com", "12345678");
/// assert_eq!(creds.email(), "deferiascomigo@gmail.com");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    email: String,
    #[serde(serialize_with = "serialize_secret")]
    password: Zeroizing<String>,
}

fn serialize_secret<S>(value: &Zeroizing<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_str())
}

impl LoginCredentials {
    /// Wrap already validated email and password values.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Submitted email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Submitted password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque session token returned by `POST /login`.
///
/// ## Invariants
/// - Exactly [`SESSION_TOKEN_LENGTH`] ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionToken(String);

/// Raised when a token does not have the required length.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session token must be {SESSION_TOKEN_LENGTH} ASCII characters, got {length}")]
pub struct SessionTokenLengthError {
    length: usize,
}

impl SessionToken {
    /// Validate and wrap a token string.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionTokenLengthError> {
        let raw = raw.into();
        if !raw.is_ascii() || raw.len() != SESSION_TOKEN_LENGTH {
            return Err(SessionTokenLengthError {
                length: raw.chars().count(),
            });
        }
        Ok(Self(raw))
    }

    /// Token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
