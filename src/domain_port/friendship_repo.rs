use crate::application_port::RelationError;
use crate::domain_model::{Email, UserPair};
use crate::domain_port::repo_tx::StorageTx;

#[async_trait::async_trait]
pub trait FriendshipRepo: Send + Sync {
    /// Insert the unordered edge. `AlreadyFriends` if it is present; the
    /// backing unique key makes this race-proof against a concurrent insert
    /// of the same pair.
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: &UserPair,
    ) -> Result<(), RelationError>;

    /// Idempotent delete: succeeds whether or not the edge exists.
    async fn delete(&self, pair: &UserPair) -> Result<(), RelationError>;

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: &UserPair,
    ) -> Result<bool, RelationError>;

    /// All users in a friendship edge with `email`, either side, sorted.
    async fn friends_of(&self, email: &Email) -> Result<Vec<Email>, RelationError>;
}
