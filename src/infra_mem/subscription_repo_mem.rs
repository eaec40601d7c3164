use super::graph_state::SharedGraphState;
use super::util::downcast;
use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::{StorageTx, SubscriptionRepo};

pub struct MemSubscriptionRepo {
    state: SharedGraphState,
}

impl MemSubscriptionRepo {
    pub fn new(state: SharedGraphState) -> Self {
        MemSubscriptionRepo { state }
    }
}

#[async_trait::async_trait]
impl SubscriptionRepo for MemSubscriptionRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        subscriber: &Email,
        target: &Email,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);
        let state = tx.state();

        if !state.users.contains(subscriber) || !state.users.contains(target) {
            return Err(RelationError::Store(
                "subscription references unknown user".to_string(),
            ));
        }
        if !state
            .subscriptions
            .insert((subscriber.clone(), target.clone()))
        {
            return Err(RelationError::AlreadySubscribed);
        }
        Ok(())
    }

    async fn delete(&self, subscriber: &Email, target: &Email) -> Result<(), RelationError> {
        let mut state = self.state.lock().await;
        state
            .subscriptions
            .remove(&(subscriber.clone(), target.clone()));
        Ok(())
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        subscriber: &Email,
        target: &Email,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        Ok(tx
            .state()
            .subscriptions
            .contains(&(subscriber.clone(), target.clone())))
    }

    async fn subscribers_of(&self, email: &Email) -> Result<Vec<Email>, RelationError> {
        let state = self.state.lock().await;

        Ok(state
            .subscriptions
            .iter()
            .filter(|(_, target)| target == email)
            .map(|(subscriber, _)| subscriber.clone())
            .collect())
    }
}
