//! Driving port for the login use-case.
//!
//! Inbound adapters call this port once the login validation chain accepted
//! the payload. There is no credential store: any well-formed credentials
//! receive a token.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::TokenIssuer;
use crate::domain::{Error, LoginCredentials, SessionToken};

/// Domain use-case port for issuing session tokens.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Issue a session token for validated credentials.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error>;
}

/// Login service delegating token derivation to a [`TokenIssuer`].
#[derive(Clone)]
pub struct TokenLoginService {
    issuer: Arc<dyn TokenIssuer>,
}

impl TokenLoginService {
    /// Wrap the issuer used for every login.
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { issuer }
    }
}

#[async_trait]
impl LoginService for TokenLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error> {
        let token = self.issuer.issue(credentials)?;
        debug!("session token issued");
        Ok(token)
    }
}
