//! Driving port for talker mutations.
//!
//! Callers run the talker validation chain before reaching this port; the
//! port receives already validated drafts.

use async_trait::async_trait;

use crate::domain::{Error, Talker, TalkerDraft, TalkerId};

/// Create and update use-cases over the talker collection.
#[async_trait]
pub trait TalkersCommand: Send + Sync {
    /// Append a record with a service-assigned id and persist the collection.
    async fn create(&self, draft: TalkerDraft) -> Result<Talker, Error>;

    /// Replace the record with `id` in place; not-found when absent.
    async fn update(&self, id: TalkerId, draft: TalkerDraft) -> Result<Talker, Error>;
}
