//! Deterministic session token derivation.
//!
//! [`CipherTokenIssuer`] is a deliberately weak scheme kept for client
//! compatibility: it encrypts the serialised credentials under a fixed
//! secret and truncates the ciphertext text to sixteen characters. The same
//! credentials always yield the same token, and nothing downstream verifies
//! the token beyond its length. Replace it with a signed-token issuer by
//! implementing [`TokenIssuer`]; callers only depend on the trait.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use super::auth::SESSION_TOKEN_LENGTH;
use super::ports::TokenIssuer;
use super::{Error, LoginCredentials, SessionToken};

/// Secret used when configuration does not provide one.
pub const DEFAULT_TOKEN_SECRET: &str = "talker-manager-shared-secret";

const NONCE_SIZE: usize = 12;

/// AES-256-GCM token issuer with a synthetic, plaintext-derived nonce.
///
/// # Examples
/// ```
/// use backend::domain::ports::TokenIssuer;
/// use backend::domain::{CipherTokenIssuer, LoginCredentials};
///
/// let issuer = CipherTokenIssuer::default();
/// let creds = LoginCredentials::new("deferiascomigo@gmail.com", "12345678");
/// let first = issuer.issue(&creds).expect("token");
/// let second = issuer.issue(&creds).expect("token");
/// assert_eq!(first, second);
/// assert_eq!(first.as_str().len(), 16);
/// ```
#[derive(Clone)]
pub struct CipherTokenIssuer {
    cipher: Aes256Gcm,
}

impl CipherTokenIssuer {
    /// Build an issuer keyed by SHA-256 of `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(digest.as_slice());
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }
}

impl Default for CipherTokenIssuer {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_SECRET)
    }
}

impl TokenIssuer for CipherTokenIssuer {
    fn issue(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error> {
        let plaintext = serde_json::to_vec(credentials)
            .map_err(|err| Error::internal(format!("failed to serialise credentials: {err}")))?;

        let seed = Sha256::digest(&plaintext);
        let nonce_bytes = seed
            .as_slice()
            .first_chunk::<NONCE_SIZE>()
            .ok_or_else(|| Error::internal("nonce derivation produced too few bytes"))?;
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(nonce_bytes), plaintext.as_slice())
            .map_err(|err| Error::internal(format!("token encryption failed: {err}")))?;

        let encoded = URL_SAFE_NO_PAD.encode(ciphertext);
        let truncated = encoded
            .get(..SESSION_TOKEN_LENGTH)
            .ok_or_else(|| Error::internal("ciphertext too short for a session token"))?;
        SessionToken::new(truncated)
            .map_err(|err| Error::internal(format!("issued token malformed: {err}")))
    }
}
