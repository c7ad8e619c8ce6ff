//! Record service orchestrating talker reads and mutations.
//!
//! Mutations run a full load, modify, save cycle against the
//! [`TalkerRepository`] while holding a single write gate, so two concurrent
//! creates never compute the same id and concurrent updates never clobber
//! each other. Reads do not take the gate.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info};

use super::ports::{TalkerPersistenceError, TalkerRepository, TalkersCommand, TalkersQuery};
use super::validation::TALKER_NOT_FOUND;
use super::{Error, Talker, TalkerDraft, TalkerId, next_talker_id};

const STORE_UNAVAILABLE: &str = "talker store unavailable";
const ID_SPACE_EXHAUSTED: &str = "talker id space exhausted";

/// Talker use-cases backed by a document repository.
#[derive(Clone)]
pub struct TalkerService {
    repository: Arc<dyn TalkerRepository>,
    write_gate: Arc<Mutex<()>>,
}

impl TalkerService {
    /// Wrap the repository holding the talker document.
    pub fn new(repository: Arc<dyn TalkerRepository>) -> Self {
        Self {
            repository,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<Vec<Talker>, Error> {
        self.repository.load().await.map_err(map_persistence_error)
    }

    async fn save(&self, talkers: &[Talker]) -> Result<(), Error> {
        self.repository
            .save(talkers)
            .await
            .map_err(map_persistence_error)
    }
}

fn map_persistence_error(err: TalkerPersistenceError) -> Error {
    match err {
        TalkerPersistenceError::Unreadable { .. } | TalkerPersistenceError::Malformed { .. } => {
            error!(error = %err, "talker store could not be loaded");
            Error::service_unavailable(STORE_UNAVAILABLE)
        }
        TalkerPersistenceError::WriteFailed { .. } => {
            error!(error = %err, "talker store could not be saved");
            Error::internal(err.to_string())
        }
    }
}

#[async_trait]
impl TalkersQuery for TalkerService {
    async fn list_all(&self) -> Result<Vec<Talker>, Error> {
        self.load().await
    }

    async fn get_by_id(&self, id: TalkerId) -> Result<Talker, Error> {
        self.load()
            .await?
            .into_iter()
            .find(|talker| talker.id() == id)
            .ok_or_else(|| Error::not_found(TALKER_NOT_FOUND))
    }
}

#[async_trait]
impl TalkersCommand for TalkerService {
    async fn create(&self, draft: TalkerDraft) -> Result<Talker, Error> {
        let _guard = self.write_gate.lock().await;
        let mut talkers = self.load().await?;
        let Some(id) = next_talker_id(&talkers) else {
            error!("no talker id left after u64::MAX");
            return Err(Error::internal(ID_SPACE_EXHAUSTED));
        };
        let talker = Talker::from_draft(id, draft);
        talkers.push(talker.clone());
        self.save(&talkers).await?;
        info!(talker_id = %talker.id(), "talker created");
        Ok(talker)
    }

    async fn update(&self, id: TalkerId, draft: TalkerDraft) -> Result<Talker, Error> {
        let _guard = self.write_gate.lock().await;
        let mut talkers = self.load().await?;
        let slot = talkers
            .iter_mut()
            .find(|talker| talker.id() == id)
            .ok_or_else(|| Error::not_found(TALKER_NOT_FOUND))?;
        let talker = Talker::from_draft(id, draft);
        *slot = talker.clone();
        self.save(&talkers).await?;
        info!(talker_id = %id, "talker updated");
        Ok(talker)
    }
}

#[cfg(test)]
#[path = "talker_service_tests.rs"]
mod tests;
