//! Server settings loaded via OrthoConfig.
//!
//! Every field can come from a CLI flag or a `TALKER_*` environment
//! variable; unset fields fall back to the defaults below.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::DEFAULT_TOKEN_SECRET;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORE_PATH: &str = "talker.json";

/// Errors raised while turning settings into a runnable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// OrthoConfig could not merge the configuration layers.
    #[error("failed to load server settings: {0}")]
    Load(String),
    /// `host` is not an IP address.
    #[error("invalid listen host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Listener, store and token settings for the talker service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TALKER")]
pub struct ServerSettings {
    /// IP address to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Path to the talker JSON document; its directory must exist.
    pub store_path: Option<PathBuf>,
    /// Secret keying the session token cipher.
    pub token_secret: Option<String>,
}

impl ServerSettings {
    /// Load settings from the process arguments and environment.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter(std::env::args_os())
            .map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 3000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address assembled from host and port.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|source| SettingsError::InvalidHost {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Configured document path, falling back to `talker.json`.
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH))
    }

    /// Configured token secret, falling back to the compiled-in secret.
    pub fn token_secret(&self) -> &str {
        self.token_secret.as_deref().unwrap_or(DEFAULT_TOKEN_SECRET)
    }
}
