use super::error::*;
use super::handler;
use crate::application_port::IdentityVerifier;
use crate::domain_model::UserId;
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

const MAX_BODY_BYTES: u64 = 4 * 1024;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let relationships = server.relationship_service.clone();
    let verifier = server.identity_verifier.clone();

    let add_friend = warp::post()
        .and(warp::path("add_friend"))
        .and(warp::path::end())
        .and(with_verification(verifier.clone()))
        .and(json_body())
        .and(with(relationships.clone()))
        .and_then(handler::add_friend);

    let accept_friend = warp::post()
        .and(warp::path("accept_friend"))
        .and(warp::path::end())
        .and(with_verification(verifier.clone()))
        .and(json_body())
        .and(with(relationships.clone()))
        .and_then(handler::accept_friend);

    let reject_friend = warp::post()
        .and(warp::path("reject_friend"))
        .and(warp::path::end())
        .and(with_verification(verifier.clone()))
        .and(json_body())
        .and(with(relationships.clone()))
        .and_then(handler::reject_friend);

    let remove_friend = warp::post()
        .and(warp::path("remove_friend"))
        .and(warp::path::end())
        .and(with_verification(verifier.clone()))
        .and(json_body())
        .and(with(relationships.clone()))
        .and_then(handler::remove_friend);

    let block_friend = warp::post()
        .and(warp::path("block_friend"))
        .and(warp::path::end())
        .and(with_verification(verifier.clone()))
        .and(json_body())
        .and(with(relationships.clone()))
        .and_then(handler::block_friend);

    let unblock_friend = warp::post()
        .and(warp::path("unblock_friend"))
        .and(warp::path::end())
        .and(with_verification(verifier.clone()))
        .and(json_body())
        .and(with(relationships.clone()))
        .and_then(handler::unblock_friend);

    let friend_list = warp::get()
        .and(warp::path("friend_list"))
        .and(warp::path::end())
        .and(with_verification(verifier))
        .and(with(relationships))
        .and_then(handler::friend_list);

    add_friend
        .or(accept_friend)
        .or(reject_friend)
        .or(remove_friend)
        .or(block_friend)
        .or(unblock_friend)
        .or(friend_list)
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_verification(
    verifier: Arc<dyn IdentityVerifier>,
) -> impl Filter<Extract = (UserId,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>(http::header::AUTHORIZATION.as_str()).and_then(
        move |header: Option<String>| {
            let verifier = verifier.clone();
            async move {
                let token = header
                    .as_deref()
                    .and_then(|h| h.strip_prefix("Bearer "))
                    .ok_or_else(|| {
                        reject::custom(ApiError::new(
                            ApiErrorCode::InvalidToken,
                            "missing bearer token",
                        ))
                    })?;
                let user_id = verifier
                    .verify_token(token)
                    .await
                    .map_err(ApiError::from)
                    .map_err(reject::custom)?;
                Ok::<UserId, warp::Rejection>(user_id)
            }
        },
    )
}
