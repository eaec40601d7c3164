use super::graph_state::{GraphState, SharedGraphState};
use super::util::downcast;
use crate::application_port::RelationError;
use crate::domain_model::{Email, UserPair};
use crate::domain_port::{FriendshipRepo, StorageTx};
use std::collections::BTreeSet;

pub struct MemFriendshipRepo {
    state: SharedGraphState,
}

impl MemFriendshipRepo {
    pub fn new(state: SharedGraphState) -> Self {
        MemFriendshipRepo { state }
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MemFriendshipRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: &UserPair,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);
        let state = tx.state();

        // Mirrors the foreign keys of the relational schema.
        if !state.users.contains(pair.min()) || !state.users.contains(pair.max()) {
            return Err(RelationError::Store(
                "friendship references unknown user".to_string(),
            ));
        }
        if !state.friendships.insert(GraphState::friendship_key(pair)) {
            return Err(RelationError::AlreadyFriends);
        }
        Ok(())
    }

    async fn delete(&self, pair: &UserPair) -> Result<(), RelationError> {
        let mut state = self.state.lock().await;
        state.friendships.remove(&GraphState::friendship_key(pair));
        Ok(())
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: &UserPair,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        Ok(tx
            .state()
            .friendships
            .contains(&GraphState::friendship_key(pair)))
    }

    async fn friends_of(&self, email: &Email) -> Result<Vec<Email>, RelationError> {
        let state = self.state.lock().await;

        let friends: BTreeSet<Email> = state
            .friendships
            .iter()
            .filter_map(|(min, max)| {
                if min == email {
                    Some(max.clone())
                } else if max == email {
                    Some(min.clone())
                } else {
                    None
                }
            })
            .collect();

        Ok(friends.into_iter().collect())
    }
}
