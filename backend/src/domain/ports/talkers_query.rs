//! Driving port for talker reads.

use async_trait::async_trait;

use crate::domain::{Error, Talker, TalkerId};

/// Read-only access to talker records. Reads skip validation.
#[async_trait]
pub trait TalkersQuery: Send + Sync {
    /// Every record, in document order.
    async fn list_all(&self) -> Result<Vec<Talker>, Error>;

    /// The first record with `id`, or a not-found error.
    async fn get_by_id(&self, id: TalkerId) -> Result<Talker, Error>;
}
