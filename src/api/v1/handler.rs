use super::error::*;
use crate::application_port::{NotificationService, RelationshipService, UserService};
use crate::domain_model::Email;
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

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

fn parse_email(raw: &str) -> Result<Email, warp::Rejection> {
    raw.parse::<Email>()
        .map_err(|_| reject::custom(ApiErrorCode::InvalidEmail))
}

/// The `friends` array names an unordered pair; only the first two entries
/// are considered.
fn parse_pair(raw: &[String]) -> Result<(Email, Email), warp::Rejection> {
    if raw.len() < 2 {
        return Err(reject::custom(ApiErrorCode::InvalidInput));
    }
    Ok((parse_email(&raw[0])?, parse_email(&raw[1])?))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
}

pub async fn register(
    body: RegisterRequest,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let email = parse_email(&body.email)?;

    user_service
        .register(&email)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

#[derive(Debug, Deserialize)]
pub struct FriendPairRequest {
    pub friends: Vec<String>,
}

pub async fn add_friend(
    body: FriendPairRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (a, b) = parse_pair(&body.friends)?;

    relationship_service
        .add_friend(&a, &b)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn remove_friend(
    body: FriendPairRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (a, b) = parse_pair(&body.friends)?;

    relationship_service
        .remove_friend(&a, &b)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

#[derive(Debug, Deserialize)]
pub struct FriendListQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct FriendListResponse {
    pub friends: Vec<Email>,
    pub count: usize,
}

pub async fn friend_list(
    query: FriendListQuery,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let email = parse_email(&query.email)?;

    let friends = relationship_service
        .list_friends(&email)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let count = friends.len();
    let response = ApiResponse::ok(FriendListResponse { friends, count });
    Ok(warp::reply::json(&response))
}

#[derive(Debug, Deserialize)]
pub struct CommonFriendsQuery {
    pub first: String,
    pub second: String,
}

pub async fn common_friends(
    query: CommonFriendsQuery,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let first = parse_email(&query.first)?;
    let second = parse_email(&query.second)?;

    let friends = relationship_service
        .common_friends(&first, &second)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let count = friends.len();
    let response = ApiResponse::ok(FriendListResponse { friends, count });
    Ok(warp::reply::json(&response))
}

#[derive(Debug, Deserialize)]
pub struct DirectedPairRequest {
    pub requestor: String,
    pub target: String,
}

impl DirectedPairRequest {
    fn parse(&self) -> Result<(Email, Email), warp::Rejection> {
        Ok((parse_email(&self.requestor)?, parse_email(&self.target)?))
    }
}

pub async fn subscribe(
    body: DirectedPairRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (requestor, target) = body.parse()?;

    relationship_service
        .subscribe(&requestor, &target)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn unsubscribe(
    body: DirectedPairRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (requestor, target) = body.parse()?;

    relationship_service
        .unsubscribe(&requestor, &target)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn block(
    body: DirectedPairRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (requestor, target) = body.parse()?;

    relationship_service
        .block(&requestor, &target)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn unblock(
    body: DirectedPairRequest,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (requestor, target) = body.parse()?;

    relationship_service
        .unblock(&requestor, &target)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

#[derive(Debug, Deserialize)]
pub struct NotifiedRequest {
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RecipientsResponse {
    pub recipients: Vec<Email>,
}

pub async fn notified(
    body: NotifiedRequest,
    notification_service: Arc<dyn NotificationService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let sender = parse_email(&body.sender)?;

    let recipients = notification_service
        .resolve_recipients(&sender, &body.text)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let response = ApiResponse::ok(RecipientsResponse { recipients });
    Ok(warp::reply::json(&response))
}
