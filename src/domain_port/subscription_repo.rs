use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::repo_tx::StorageTx;

#[async_trait::async_trait]
pub trait SubscriptionRepo: Send + Sync {
    /// Insert the directed edge. `AlreadySubscribed` if it is present.
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        subscriber: &Email,
        target: &Email,
    ) -> Result<(), RelationError>;

    /// Idempotent delete.
    async fn delete(&self, subscriber: &Email, target: &Email) -> Result<(), RelationError>;

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        subscriber: &Email,
        target: &Email,
    ) -> Result<bool, RelationError>;

    /// All users whose subscription targets `email`, sorted.
    async fn subscribers_of(&self, email: &Email) -> Result<Vec<Email>, RelationError>;
}
