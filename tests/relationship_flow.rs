//! Integration tests for the policy engine over the in-memory backend:
//! registration, friendship, subscription, and blocking, with the
//! interaction rules between the three relation kinds.

mod helpers;

use helpers::{as_strings, email, memory_services, register_all};
use sociogram::application_port::RelationError;

#[tokio::test]
async fn register_then_friend_then_list() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .add_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    let friends = services
        .relationships
        .list_friends(&email("a@x.com"))
        .await
        .unwrap();
    assert_eq!(as_strings(&friends), vec!["b@x.com"]);

    let friends = services
        .relationships
        .list_friends(&email("b@x.com"))
        .await
        .unwrap();
    assert_eq!(as_strings(&friends), vec!["a@x.com"]);
}

#[tokio::test]
async fn friendship_is_one_fact_regardless_of_order() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .add_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    // The reversed pair names the same edge.
    let err = services
        .relationships
        .add_friend(&email("b@x.com"), &email("a@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::AlreadyFriends));

    // And removing it from the other side works too.
    services
        .relationships
        .remove_friend(&email("b@x.com"), &email("a@x.com"))
        .await
        .unwrap();
    let friends = services
        .relationships
        .list_friends(&email("a@x.com"))
        .await
        .unwrap();
    assert!(friends.is_empty());
}

#[tokio::test]
async fn friend_rejected_while_blocked_in_either_direction() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .block(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    let err = services
        .relationships
        .add_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::Blocked));

    let err = services
        .relationships
        .add_friend(&email("b@x.com"), &email("a@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::Blocked));
}

#[tokio::test]
async fn subscribe_rejected_only_when_subscriber_blocks_target() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .block(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    let err = services
        .relationships
        .subscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::Blocked));

    // The blocked side may still subscribe; suppression happens at
    // notification time.
    services
        .relationships
        .subscribe(&email("b@x.com"), &email("a@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn block_requires_unfriend_first() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .add_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    let err = services
        .relationships
        .block(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::IsFriend));

    services
        .relationships
        .remove_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    services
        .relationships
        .block(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn block_requires_unsubscribe_first() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .subscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    let err = services
        .relationships
        .block(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::IsSubscribed));

    services
        .relationships
        .unsubscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    services
        .relationships
        .block(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn subscribing_to_a_friend_is_allowed() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .add_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    services
        .relationships
        .subscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    // Tearing down the friendship leaves the subscription in place.
    services
        .relationships
        .remove_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
    let err = services
        .relationships
        .subscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::AlreadySubscribed));
}

#[tokio::test]
async fn deletes_are_idempotent() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    // None of these edges exist; all removals still succeed.
    services
        .relationships
        .remove_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
    services
        .relationships
        .unsubscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
    services
        .relationships
        .unblock(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn unblock_reopens_the_pair() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com"]).await;

    services
        .relationships
        .block(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
    services
        .relationships
        .unblock(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();

    services
        .relationships
        .add_friend(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn duplicate_registration_and_edges_are_reported() {
    let services = memory_services();
    register_all(&services, &["a@x.com", "b@x.com", "c@x.com"]).await;

    let err = services.users.register(&email("a@x.com")).await.unwrap_err();
    assert!(matches!(err, RelationError::DuplicateUser));

    services
        .relationships
        .subscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
    let err = services
        .relationships
        .subscribe(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::AlreadySubscribed));

    services
        .relationships
        .block(&email("a@x.com"), &email("c@x.com"))
        .await
        .unwrap();
    let err = services
        .relationships
        .block(&email("a@x.com"), &email("c@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::AlreadyBlocked));
}

#[tokio::test]
async fn relations_require_registered_users() {
    let services = memory_services();
    register_all(&services, &["a@x.com"]).await;

    let err = services
        .relationships
        .add_friend(&email("a@x.com"), &email("ghost@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound));

    let err = services
        .relationships
        .subscribe(&email("ghost@x.com"), &email("a@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound));

    let err = services
        .relationships
        .block(&email("a@x.com"), &email("ghost@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound));

    let err = services
        .relationships
        .list_friends(&email("ghost@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound));

    let err = services
        .relationships
        .common_friends(&email("a@x.com"), &email("ghost@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound));
}

#[tokio::test]
async fn self_relations_are_invalid() {
    let services = memory_services();
    register_all(&services, &["a@x.com"]).await;

    let me = email("a@x.com");

    assert!(matches!(
        services.relationships.add_friend(&me, &me).await,
        Err(RelationError::InvalidInput)
    ));
    assert!(matches!(
        services.relationships.remove_friend(&me, &me).await,
        Err(RelationError::InvalidInput)
    ));
    assert!(matches!(
        services.relationships.subscribe(&me, &me).await,
        Err(RelationError::InvalidInput)
    ));
    assert!(matches!(
        services.relationships.block(&me, &me).await,
        Err(RelationError::InvalidInput)
    ));
}

#[tokio::test]
async fn common_friends_is_symmetric() {
    let services = memory_services();
    register_all(
        &services,
        &["a@x.com", "b@x.com", "m@x.com", "n@x.com", "only-a@x.com"],
    )
    .await;

    for other in ["m@x.com", "n@x.com", "only-a@x.com"] {
        services
            .relationships
            .add_friend(&email("a@x.com"), &email(other))
            .await
            .unwrap();
    }
    for other in ["m@x.com", "n@x.com"] {
        services
            .relationships
            .add_friend(&email("b@x.com"), &email(other))
            .await
            .unwrap();
    }

    let ab = services
        .relationships
        .common_friends(&email("a@x.com"), &email("b@x.com"))
        .await
        .unwrap();
    let ba = services
        .relationships
        .common_friends(&email("b@x.com"), &email("a@x.com"))
        .await
        .unwrap();

    assert_eq!(as_strings(&ab), vec!["m@x.com", "n@x.com"]);
    assert_eq!(ab, ba);
}

#[tokio::test]
async fn friend_list_is_sorted() {
    let services = memory_services();
    register_all(&services, &["hub@x.com", "zed@x.com", "amy@x.com", "mia@x.com"]).await;

    for other in ["zed@x.com", "amy@x.com", "mia@x.com"] {
        services
            .relationships
            .add_friend(&email("hub@x.com"), &email(other))
            .await
            .unwrap();
    }

    let friends = services
        .relationships
        .list_friends(&email("hub@x.com"))
        .await
        .unwrap();
    assert_eq!(as_strings(&friends), vec!["amy@x.com", "mia@x.com", "zed@x.com"]);
}
