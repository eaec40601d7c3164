use crate::domain_model::Email;

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    #[error("two distinct users required")]
    InvalidInput,
    #[error("user not found")]
    UserNotFound,
    #[error("user already registered")]
    DuplicateUser,
    #[error("friendship already established")]
    AlreadyFriends,
    #[error("subscription already established")]
    AlreadySubscribed,
    #[error("block already established")]
    AlreadyBlocked,
    #[error("a block exists between the users")]
    Blocked,
    #[error("users are friends")]
    IsFriend,
    #[error("requestor is subscribed to target")]
    IsSubscribed,
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait RelationshipService: Send + Sync {
    /// Establish a friendship between two registered users. Unordered: the
    /// same pair in either argument order names the same edge.
    async fn add_friend(&self, a: &Email, b: &Email) -> Result<(), RelationError>;

    /// Remove a friendship edge if present. Succeeds when there is nothing
    /// to remove.
    async fn remove_friend(&self, a: &Email, b: &Email) -> Result<(), RelationError>;

    /// All users in a friendship edge with `email`, sorted.
    async fn list_friends(&self, email: &Email) -> Result<Vec<Email>, RelationError>;

    /// Intersection of both users' friend sets, sorted.
    async fn common_friends(&self, a: &Email, b: &Email) -> Result<Vec<Email>, RelationError>;

    async fn subscribe(&self, subscriber: &Email, target: &Email) -> Result<(), RelationError>;

    async fn unsubscribe(&self, subscriber: &Email, target: &Email) -> Result<(), RelationError>;

    async fn block(&self, blocker: &Email, target: &Email) -> Result<(), RelationError>;

    async fn unblock(&self, blocker: &Email, target: &Email) -> Result<(), RelationError>;
}
