use super::error::*;
use crate::application_port::RelationshipService;
use crate::domain_model::{FriendSummary, UserId};
use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ApiError) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecipientRequest {
    pub recipient: UserId,
}

#[derive(Debug, Deserialize)]
pub struct RequesterRequest {
    pub requester: UserId,
}

#[derive(Debug, Deserialize)]
pub struct FriendRequest {
    pub friend: UserId,
}

#[derive(Debug, Serialize)]
pub struct FriendListResponse {
    pub friends: Vec<FriendSummary>,
}

fn done() -> warp::reply::Json {
    warp::reply::json(&ApiResponse::ok(()))
}

pub async fn add_friend(
    user_id: UserId,
    body: RecipientRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(%user_id, recipient = %body.recipient, "add_friend");
    relationship_service
        .add_friend(user_id, body.recipient)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;
    Ok(done())
}

pub async fn accept_friend(
    user_id: UserId,
    body: RequesterRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(%user_id, requester = %body.requester, "accept_friend");
    relationship_service
        .accept_friend(user_id, body.requester)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;
    Ok(done())
}

pub async fn reject_friend(
    user_id: UserId,
    body: RequesterRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(%user_id, requester = %body.requester, "reject_friend");
    relationship_service
        .reject_friend(user_id, body.requester)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;
    Ok(done())
}

pub async fn remove_friend(
    user_id: UserId,
    body: FriendRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(%user_id, friend = %body.friend, "remove_friend");
    relationship_service
        .remove_friend(user_id, body.friend)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;
    Ok(done())
}

pub async fn block_friend(
    user_id: UserId,
    body: FriendRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(%user_id, friend = %body.friend, "block_friend");
    relationship_service
        .block_friend(user_id, body.friend)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;
    Ok(done())
}

pub async fn unblock_friend(
    user_id: UserId,
    body: FriendRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(%user_id, friend = %body.friend, "unblock_friend");
    relationship_service
        .unblock_friend(user_id, body.friend)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;
    Ok(done())
}

pub async fn friend_list(
    user_id: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let friends = relationship_service
        .get_friends(user_id)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(FriendListResponse {
        friends,
    })))
}
