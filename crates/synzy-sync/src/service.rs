use async_trait::async_trait;
use synzy_core::{Entity, EntityId};

use crate::error::RemoteError;

/// Remote shortlist endpoints.
///
/// Implementations wrap whatever transport the host provides. The
/// synchronizer only needs the three calls below and treats every failure
/// as recoverable.
#[async_trait]
pub trait ShortlistService: Send + Sync {
    /// Current shortlist for `user_id`, as full entity records.
    async fn get_shortlist(&self, user_id: &str) -> Result<Vec<Entity>, RemoteError>;

    async fn add_to_shortlist(&self, user_id: &str, entity_id: &EntityId) -> Result<(), RemoteError>;

    async fn remove_from_shortlist(
        &self,
        user_id: &str,
        entity_id: &EntityId,
    ) -> Result<(), RemoteError>;
}
