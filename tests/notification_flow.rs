//! Integration tests for the notification resolver: recipient union,
//! mention handling, and the unconditional blocker suppression.

mod helpers;

use helpers::{as_strings, email, memory_services, register_all};
use sociogram::application_port::RelationError;
use sociogram::domain_model::UserPair;
use sociogram::infra_mem::GraphState;

#[tokio::test]
async fn recipients_union_friends_subscribers_and_mentions() {
    let services = memory_services();
    register_all(&services, &["s@x.com", "f@x.com", "sub@x.com", "m@x.com"]).await;

    services
        .relationships
        .add_friend(&email("s@x.com"), &email("f@x.com"))
        .await
        .unwrap();
    services
        .relationships
        .subscribe(&email("sub@x.com"), &email("s@x.com"))
        .await
        .unwrap();

    let recipients = services
        .notifications
        .resolve_recipients(&email("s@x.com"), "hi m@x.com")
        .await
        .unwrap();

    assert_eq!(as_strings(&recipients), vec!["f@x.com", "m@x.com", "sub@x.com"]);
}

#[tokio::test]
async fn mentions_count_only_when_registered() {
    let services = memory_services();
    register_all(&services, &["s@x.com", "t@x.com"]).await;

    let recipients = services
        .notifications
        .resolve_recipients(&email("s@x.com"), "hello t@x.com")
        .await
        .unwrap();
    assert_eq!(as_strings(&recipients), vec!["t@x.com"]);

    let recipients = services
        .notifications
        .resolve_recipients(&email("s@x.com"), "hello u@x.com")
        .await
        .unwrap();
    assert!(recipients.is_empty());
}

#[tokio::test]
async fn sender_must_be_registered() {
    let services = memory_services();
    register_all(&services, &["t@x.com"]).await;

    let err = services
        .notifications
        .resolve_recipients(&email("ghost@x.com"), "hello t@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound));
}

#[tokio::test]
async fn blocker_is_suppressed_even_when_mentioned() {
    let services = memory_services();
    register_all(&services, &["s@x.com", "d@x.com", "f@x.com"]).await;

    services
        .relationships
        .add_friend(&email("s@x.com"), &email("f@x.com"))
        .await
        .unwrap();
    services
        .relationships
        .block(&email("d@x.com"), &email("s@x.com"))
        .await
        .unwrap();

    let recipients = services
        .notifications
        .resolve_recipients(&email("s@x.com"), "fyi d@x.com")
        .await
        .unwrap();

    assert_eq!(as_strings(&recipients), vec!["f@x.com"]);
}

#[tokio::test]
async fn blocker_is_suppressed_even_as_friend_and_subscriber() {
    let services = memory_services();
    register_all(&services, &["s@x.com", "d@x.com"]).await;

    // The policy engine never lets a friendship or subscription coexist
    // with this block, so seed the store directly: suppression must hold
    // regardless of how the graph got into that shape.
    {
        let mut state = services.state.lock().await;
        let pair = UserPair::new(email("s@x.com"), email("d@x.com"));
        state.friendships.insert(GraphState::friendship_key(&pair));
        state
            .subscriptions
            .insert((email("d@x.com"), email("s@x.com")));
        state.blocks.insert((email("d@x.com"), email("s@x.com")));
    }

    let recipients = services
        .notifications
        .resolve_recipients(&email("s@x.com"), "fyi d@x.com")
        .await
        .unwrap();

    assert!(recipients.is_empty());
}

#[tokio::test]
async fn recipients_are_sorted_and_deduplicated() {
    let services = memory_services();
    register_all(&services, &["s@x.com", "b@x.com", "a@x.com"]).await;

    services
        .relationships
        .add_friend(&email("s@x.com"), &email("b@x.com"))
        .await
        .unwrap();
    services
        .relationships
        .add_friend(&email("s@x.com"), &email("a@x.com"))
        .await
        .unwrap();
    // b is also a subscriber and mentioned; it must appear exactly once.
    services
        .relationships
        .subscribe(&email("b@x.com"), &email("s@x.com"))
        .await
        .unwrap();

    let recipients = services
        .notifications
        .resolve_recipients(&email("s@x.com"), "ping b@x.com b@x.com")
        .await
        .unwrap();

    assert_eq!(as_strings(&recipients), vec!["a@x.com", "b@x.com"]);
}
