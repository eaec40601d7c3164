use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::repo_tx::StorageTx;

#[async_trait::async_trait]
pub trait BlockRepo: Send + Sync {
    /// Insert the directed edge. `AlreadyBlocked` if it is present.
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        blocker: &Email,
        blocked: &Email,
    ) -> Result<(), RelationError>;

    /// Idempotent delete.
    async fn delete(&self, blocker: &Email, blocked: &Email) -> Result<(), RelationError>;

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        blocker: &Email,
        blocked: &Email,
    ) -> Result<bool, RelationError>;

    /// All users who block `email`, sorted.
    async fn blockers_of(&self, email: &Email) -> Result<Vec<Email>, RelationError>;
}
