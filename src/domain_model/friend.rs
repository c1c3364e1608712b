use crate::domain_model::{RelationStatus, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of an account's friend list.
///
/// A `Pending` entry is always an incoming request: outbound requests are not listed
/// for the account that sent them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FriendSummary {
    pub user_id: UserId,
    pub username: String,
    pub avatar_id: i32,
    pub status: RelationStatus,
    pub since: DateTime<Utc>,
}
