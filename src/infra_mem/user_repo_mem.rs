use super::graph_state::SharedGraphState;
use super::util::downcast;
use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::{StorageTx, UserRepo};

pub struct MemUserRepo {
    state: SharedGraphState,
}

impl MemUserRepo {
    pub fn new(state: SharedGraphState) -> Self {
        MemUserRepo { state }
    }
}

#[async_trait::async_trait]
impl UserRepo for MemUserRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &Email,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);

        if !tx.state().users.insert(email.clone()) {
            return Err(RelationError::DuplicateUser);
        }
        Ok(())
    }

    async fn exists(&self, email: &Email) -> Result<bool, RelationError> {
        Ok(self.state.lock().await.users.contains(email))
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &Email,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        Ok(tx.state().users.contains(email))
    }
}
