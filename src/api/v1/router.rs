use super::handler;
use super::handler::{CommonFriendsQuery, FriendListQuery};
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let register = warp::post()
        .and(warp::path("users"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.user_service.clone()))
        .and_then(handler::register);

    let add_friend = warp::post()
        .and(warp::path("friend"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::add_friend);

    let remove_friend = warp::post()
        .and(warp::path("unfriend"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::remove_friend);

    let friend_list = warp::get()
        .and(warp::path("friend_list"))
        .and(warp::path::end())
        .and(warp::query::<FriendListQuery>())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::friend_list);

    let common_friends = warp::get()
        .and(warp::path("common_friends"))
        .and(warp::path::end())
        .and(warp::query::<CommonFriendsQuery>())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::common_friends);

    let subscribe = warp::post()
        .and(warp::path("subscribe"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::subscribe);

    let unsubscribe = warp::post()
        .and(warp::path("unsubscribe"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::unsubscribe);

    let block = warp::post()
        .and(warp::path("block"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::block);

    let unblock = warp::post()
        .and(warp::path("unblock"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::unblock);

    let notified = warp::post()
        .and(warp::path("notified"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.notification_service.clone()))
        .and_then(handler::notified);

    register
        .or(add_friend)
        .or(remove_friend)
        .or(friend_list)
        .or(common_friends)
        .or(subscribe)
        .or(unsubscribe)
        .or(block)
        .or(unblock)
        .or(notified)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}
