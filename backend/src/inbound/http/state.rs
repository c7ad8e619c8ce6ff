//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, TalkersCommand, TalkersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub talkers: Arc<dyn TalkersQuery>,
    pub talkers_command: Arc<dyn TalkersCommand>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Construct state from the port implementations.
    pub fn new(
        talkers: Arc<dyn TalkersQuery>,
        talkers_command: Arc<dyn TalkersCommand>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            talkers,
            talkers_command,
            login,
        }
    }
}
