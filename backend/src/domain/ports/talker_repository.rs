//! Driven port for the talker document store.
//!
//! The whole collection is read and written at once; there are no partial
//! writes and no append log. Adapters report "document absent" as an empty
//! collection and keep unreadable and malformed documents distinct so the
//! domain can decide how each surfaces.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::define_port_error;
use crate::domain::Talker;

define_port_error! {
    /// Errors raised by talker store adapters.
    pub enum TalkerPersistenceError {
        /// The document exists but could not be read.
        Unreadable { message: String } => "talker store unreadable: {message}",
        /// The document is not a JSON array of talker records.
        Malformed { message: String } => "talker store malformed: {message}",
        /// Writing the document failed.
        WriteFailed { message: String } => "talker store write failed: {message}",
    }
}

/// Store accessor over the single persisted talker document.
#[async_trait]
pub trait TalkerRepository: Send + Sync {
    /// Load the full collection in document order.
    async fn load(&self) -> Result<Vec<Talker>, TalkerPersistenceError>;

    /// Replace the full collection.
    async fn save(&self, talkers: &[Talker]) -> Result<(), TalkerPersistenceError>;
}

/// In-memory repository for tests and local wiring without a document.
#[derive(Debug, Default)]
pub struct InMemoryTalkerRepository {
    talkers: Mutex<Vec<Talker>>,
}

impl InMemoryTalkerRepository {
    /// Seed the repository with an initial collection.
    #[must_use]
    pub fn with_talkers(talkers: Vec<Talker>) -> Self {
        Self {
            talkers: Mutex::new(talkers),
        }
    }

    /// Copy of the stored collection.
    pub async fn snapshot(&self) -> Vec<Talker> {
        self.talkers.lock().await.clone()
    }
}

#[async_trait]
impl TalkerRepository for InMemoryTalkerRepository {
    async fn load(&self) -> Result<Vec<Talker>, TalkerPersistenceError> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, talkers: &[Talker]) -> Result<(), TalkerPersistenceError> {
        *self.talkers.lock().await = talkers.to_vec();
        Ok(())
    }
}
