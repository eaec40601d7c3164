use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::repo_tx::StorageTx;

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a new user record. `DuplicateUser` if the address is already
    /// registered.
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &Email,
    ) -> Result<(), RelationError>;

    async fn exists(&self, email: &Email) -> Result<bool, RelationError>;

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &Email,
    ) -> Result<bool, RelationError>;
}
