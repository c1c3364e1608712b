use crate::domain_model::*;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    #[error("{entity} with {field} {value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("relationship is {}, expected {expected}", state_name(.found))]
    InvalidState {
        expected: RelationStatus,
        found: Option<RelationStatus>,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("internal error: {0}")]
    Internal(String),
}

fn state_name(found: &Option<RelationStatus>) -> &'static str {
    found.as_ref().map_or("absent", RelationStatus::as_str)
}

impl RelationError {
    pub fn user_not_found(user_id: UserId) -> Self {
        RelationError::NotFound {
            entity: "user",
            field: "id",
            value: user_id.to_string(),
        }
    }

    pub fn friends_not_found(user_id: UserId) -> Self {
        RelationError::NotFound {
            entity: "friends",
            field: "id",
            value: user_id.to_string(),
        }
    }
}

/// Switches for the behaviors that are lenient by default.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct RelationPolicy {
    /// `accept_friend` without a pending request fails with `NotFound` instead of doing nothing.
    pub strict_accept: bool,
    /// `unblock_friend` on a pair that is not blocked fails with `InvalidState`.
    pub strict_unblock: bool,
    /// An empty friend list is reported as `NotFound`. When off, only a missing account is.
    pub empty_list_is_not_found: bool,
}

impl Default for RelationPolicy {
    fn default() -> Self {
        Self {
            strict_accept: false,
            strict_unblock: false,
            empty_list_is_not_found: true,
        }
    }
}

#[async_trait::async_trait]
pub trait RelationshipService: Send + Sync {
    async fn add_friend(&self, requester: UserId, recipient: UserId) -> Result<(), RelationError>;
    async fn accept_friend(
        &self,
        recipient: UserId,
        requester: UserId,
    ) -> Result<(), RelationError>;
    async fn reject_friend(
        &self,
        recipient: UserId,
        requester: UserId,
    ) -> Result<(), RelationError>;
    async fn remove_friend(&self, owner: UserId, counterparty: UserId)
    -> Result<(), RelationError>;
    async fn block_friend(&self, owner: UserId, counterparty: UserId) -> Result<(), RelationError>;
    async fn unblock_friend(
        &self,
        owner: UserId,
        counterparty: UserId,
    ) -> Result<(), RelationError>;
    async fn get_friends(&self, owner: UserId) -> Result<Vec<FriendSummary>, RelationError>;
}
