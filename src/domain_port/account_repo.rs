use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait AccountRepo: Send + Sync {
    /// True for a live (not soft-deleted) account.
    async fn exists(&self, user_id: UserId) -> Result<bool, RelationError>;
}
