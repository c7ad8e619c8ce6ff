//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use zeroize::Zeroizing;

use super::settings::{ServerSettings, SettingsError};

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store_path: PathBuf,
    pub(crate) token_secret: Zeroizing<String>,
}

impl ServerConfig {
    /// Construct a configuration from explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store_path: PathBuf, token_secret: &str) -> Self {
        Self {
            bind_addr,
            store_path,
            token_secret: Zeroizing::new(token_secret.to_owned()),
        }
    }

    /// Resolve loaded settings, applying defaults.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(
            settings.bind_addr()?,
            settings.store_path(),
            settings.token_secret(),
        ))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
