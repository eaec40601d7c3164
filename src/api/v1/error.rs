use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(err) = err.find::<ApiErrorCode>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(err.clone(), err.to_string()));
        Ok(warp::reply::with_status(json, StatusCode::OK))
    } else {
        let json = warp::reply::json(&ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: ApiErrorCode::InternalError,
                message: format!("Unhandled error: {:?}", err),
            }),
        });
        Ok(warp::reply::with_status(
            json,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Invalid email address received")]
    InvalidEmail,
    #[error("Two distinct valid email addresses required")]
    InvalidInput,
    #[error("Email does not exist")]
    UserNotFound,
    #[error("Email already exists")]
    DuplicateUser,
    #[error("Users are already friends")]
    AlreadyFriends,
    #[error("User already subscribed")]
    AlreadySubscribed,
    #[error("User already blocked target")]
    AlreadyBlocked,
    #[error("At least one user is blocking the other")]
    Blocked,
    #[error("Users are friends (unfriend the target first)")]
    IsFriend,
    #[error("Requestor is subscribed to target (unsubscribe from target first)")]
    IsSubscribed,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<RelationError> for ApiErrorCode {
    fn from(error: RelationError) -> Self {
        match error {
            RelationError::InvalidInput => ApiErrorCode::InvalidInput,
            RelationError::UserNotFound => ApiErrorCode::UserNotFound,
            RelationError::DuplicateUser => ApiErrorCode::DuplicateUser,
            RelationError::AlreadyFriends => ApiErrorCode::AlreadyFriends,
            RelationError::AlreadySubscribed => ApiErrorCode::AlreadySubscribed,
            RelationError::AlreadyBlocked => ApiErrorCode::AlreadyBlocked,
            RelationError::Blocked => ApiErrorCode::Blocked,
            RelationError::IsFriend => ApiErrorCode::IsFriend,
            RelationError::IsSubscribed => ApiErrorCode::IsSubscribed,
            RelationError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}
