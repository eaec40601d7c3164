use sociogram::application_impl::{
    RealNotificationService, RealRelationshipService, RealUserService,
};
use sociogram::application_port::{NotificationService, RelationshipService, UserService};
use sociogram::domain_model::Email;
use sociogram::domain_port::{BlockRepo, FriendshipRepo, SubscriptionRepo, TxManager, UserRepo};
use sociogram::infra_mem::{
    MemBlockRepo, MemFriendshipRepo, MemSubscriptionRepo, MemTxManager, MemUserRepo,
    SharedGraphState,
};
use std::sync::Arc;

/// The real services wired over the in-memory backend. `state` is exposed
/// so tests can seed graph shapes the policy engine would not produce.
pub struct TestServices {
    pub users: Arc<dyn UserService>,
    pub relationships: Arc<dyn RelationshipService>,
    pub notifications: Arc<dyn NotificationService>,
    pub state: SharedGraphState,
}

pub fn memory_services() -> TestServices {
    let state = SharedGraphState::default();

    let tx_manager: Arc<dyn TxManager> = Arc::new(MemTxManager::new(state.clone()));
    let user_repo: Arc<dyn UserRepo> = Arc::new(MemUserRepo::new(state.clone()));
    let friendship_repo: Arc<dyn FriendshipRepo> = Arc::new(MemFriendshipRepo::new(state.clone()));
    let subscription_repo: Arc<dyn SubscriptionRepo> =
        Arc::new(MemSubscriptionRepo::new(state.clone()));
    let block_repo: Arc<dyn BlockRepo> = Arc::new(MemBlockRepo::new(state.clone()));

    let users: Arc<dyn UserService> =
        Arc::new(RealUserService::new(user_repo.clone(), tx_manager.clone()));
    let relationships: Arc<dyn RelationshipService> = Arc::new(RealRelationshipService::new(
        user_repo.clone(),
        friendship_repo.clone(),
        subscription_repo.clone(),
        block_repo.clone(),
        tx_manager,
    ));
    let notifications: Arc<dyn NotificationService> = Arc::new(RealNotificationService::new(
        user_repo,
        friendship_repo,
        subscription_repo,
        block_repo,
    ));

    TestServices {
        users,
        relationships,
        notifications,
        state,
    }
}

pub fn email(s: &str) -> Email {
    s.parse().expect("test email")
}

pub async fn register_all(services: &TestServices, addresses: &[&str]) {
    for address in addresses {
        services
            .users
            .register(&email(address))
            .await
            .expect("register test user");
    }
}

/// Collect a sorted list of raw addresses for readable assertions.
pub fn as_strings(emails: &[Email]) -> Vec<&str> {
    emails.iter().map(Email::as_str).collect()
}
