use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use crate::logger::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, error) = if let Some(error) = err.find::<ApiError>() {
        (error.code.status(), error.clone())
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            ApiError::new(ApiErrorCode::NoSuchRoute, "no such route"),
        )
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            ApiError::new(ApiErrorCode::InvalidArgument, e.to_string()),
        )
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ApiError::new(ApiErrorCode::NoSuchRoute, "method not allowed"),
        )
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(ApiErrorCode::InternalError, format!("Unhandled error: {:?}", err)),
        )
    };

    let json = warp::reply::json(&ApiResponse::<()>::err(error));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    fn internal<E: std::fmt::Display>(error: E) -> Self {
        warn!("Internal error: {}", error);
        ApiError::new(ApiErrorCode::InternalError, ApiErrorCode::InternalError.to_string())
    }
}

impl reject::Reject for ApiError {}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Resource not found")]
    NotFound,
    #[error("Relationship is in the wrong state")]
    InvalidState,
    #[error("Invalid argument")]
    InvalidArgument,
    #[error("Token is not valid")]
    InvalidToken,
    #[error("Token has expired")]
    TokenExpired,
    #[error("No such route")]
    NoSuchRoute,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ApiErrorCode::NotFound | ApiErrorCode::NoSuchRoute => StatusCode::NOT_FOUND,
            ApiErrorCode::InvalidState => StatusCode::CONFLICT,
            ApiErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ApiErrorCode::InvalidToken | ApiErrorCode::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RelationError> for ApiError {
    fn from(error: RelationError) -> Self {
        match error {
            RelationError::NotFound { .. } => {
                ApiError::new(ApiErrorCode::NotFound, error.to_string())
            }
            RelationError::InvalidState { .. } => {
                ApiError::new(ApiErrorCode::InvalidState, error.to_string())
            }
            RelationError::InvalidArgument(_) => {
                ApiError::new(ApiErrorCode::InvalidArgument, error.to_string())
            }
            RelationError::Internal(e) => ApiError::internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::TokenInvalid => ApiError::new(ApiErrorCode::InvalidToken, error.to_string()),
            AuthError::TokenExpired => ApiError::new(ApiErrorCode::TokenExpired, error.to_string()),
            AuthError::InternalError(e) => ApiError::internal(e),
        }
    }
}
