use super::graph_state::SharedGraphState;
use super::util::downcast;
use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::{BlockRepo, StorageTx};

pub struct MemBlockRepo {
    state: SharedGraphState,
}

impl MemBlockRepo {
    pub fn new(state: SharedGraphState) -> Self {
        MemBlockRepo { state }
    }
}

#[async_trait::async_trait]
impl BlockRepo for MemBlockRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        blocker: &Email,
        blocked: &Email,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);
        let state = tx.state();

        if !state.users.contains(blocker) || !state.users.contains(blocked) {
            return Err(RelationError::Store(
                "block references unknown user".to_string(),
            ));
        }
        if !state.blocks.insert((blocker.clone(), blocked.clone())) {
            return Err(RelationError::AlreadyBlocked);
        }
        Ok(())
    }

    async fn delete(&self, blocker: &Email, blocked: &Email) -> Result<(), RelationError> {
        let mut state = self.state.lock().await;
        state.blocks.remove(&(blocker.clone(), blocked.clone()));
        Ok(())
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        blocker: &Email,
        blocked: &Email,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        Ok(tx
            .state()
            .blocks
            .contains(&(blocker.clone(), blocked.clone())))
    }

    async fn blockers_of(&self, email: &Email) -> Result<Vec<Email>, RelationError> {
        let state = self.state.lock().await;

        Ok(state
            .blocks
            .iter()
            .filter(|(_, blocked)| blocked == email)
            .map(|(blocker, _)| blocker.clone())
            .collect())
    }
}
