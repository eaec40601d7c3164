/// Example demonstrating how to call the public service interfaces against
/// the in-memory store backend. No external infrastructure required.
use sociogram::application_impl::{
    RealNotificationService, RealRelationshipService, RealUserService,
};
use sociogram::application_port::{
    NotificationService, RelationError, RelationshipService, UserService,
};
use sociogram::domain_model::Email;
use sociogram::domain_port::{BlockRepo, FriendshipRepo, SubscriptionRepo, TxManager, UserRepo};
use sociogram::infra_mem::{
    MemBlockRepo, MemFriendshipRepo, MemSubscriptionRepo, MemTxManager, MemUserRepo,
    SharedGraphState,
};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::new("graph_demo=debug,sociogram=debug");

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    // region initialization

    let state = SharedGraphState::default();

    let tx_manager: Arc<dyn TxManager> = Arc::new(MemTxManager::new(state.clone()));
    let user_repo: Arc<dyn UserRepo> = Arc::new(MemUserRepo::new(state.clone()));
    let friendship_repo: Arc<dyn FriendshipRepo> = Arc::new(MemFriendshipRepo::new(state.clone()));
    let subscription_repo: Arc<dyn SubscriptionRepo> =
        Arc::new(MemSubscriptionRepo::new(state.clone()));
    let block_repo: Arc<dyn BlockRepo> = Arc::new(MemBlockRepo::new(state));

    let user_service: Arc<dyn UserService> =
        Arc::new(RealUserService::new(user_repo.clone(), tx_manager.clone()));
    let relationship_service: Arc<dyn RelationshipService> = Arc::new(RealRelationshipService::new(
        user_repo.clone(),
        friendship_repo.clone(),
        subscription_repo.clone(),
        block_repo.clone(),
        tx_manager,
    ));
    let notification_service: Arc<dyn NotificationService> = Arc::new(
        RealNotificationService::new(user_repo, friendship_repo, subscription_repo, block_repo),
    );

    // endregion

    // use cases

    let alice: Email = "alice@example.com".parse()?;
    let bob: Email = "bob@example.com".parse()?;
    let carol: Email = "carol@example.com".parse()?;
    let dave: Email = "dave@example.com".parse()?;

    for user in [&alice, &bob, &carol, &dave] {
        user_service.register(user).await?;
        tracing::debug!("registered {user}");
    }

    relationship_service.add_friend(&alice, &bob).await?;
    relationship_service.add_friend(&alice, &carol).await?;
    relationship_service.add_friend(&bob, &carol).await?;

    let friends = relationship_service.list_friends(&alice).await?;
    tracing::debug!("friends of {alice}: {}", serde_json::to_string(&friends)?);

    let common = relationship_service.common_friends(&alice, &bob).await?;
    tracing::debug!(
        "common friends of {alice} and {bob}: {}",
        serde_json::to_string(&common)?
    );

    relationship_service.subscribe(&dave, &alice).await?;
    tracing::debug!("{dave} subscribed to {alice}");

    match relationship_service.block(&carol, &alice).await {
        Err(RelationError::IsFriend) => {
            tracing::debug!("{carol} must unfriend {alice} before blocking")
        }
        other => tracing::debug!("block while friends: {other:?}"),
    }

    relationship_service.remove_friend(&carol, &alice).await?;
    relationship_service.block(&carol, &alice).await?;
    tracing::debug!("{carol} blocked {alice}");

    match relationship_service.add_friend(&alice, &carol).await {
        Err(RelationError::Blocked) => tracing::debug!("{alice} cannot re-friend {carol}"),
        other => tracing::debug!("add_friend after block: {other:?}"),
    }

    let recipients = notification_service
        .resolve_recipients(
            &alice,
            "hello carol@example.com and eve@example.com",
        )
        .await?;
    tracing::debug!(
        "recipients of update from {alice}: {}",
        serde_json::to_string(&recipients)?
    );

    Ok(())
}
