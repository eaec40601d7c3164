use crate::domain_model::{Email, UserPair};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The whole relation graph as plain sets. Friendship keys are normalized
/// (min, max) pairs, so the symmetric edge exists exactly once.
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    pub users: BTreeSet<Email>,
    pub friendships: BTreeSet<(Email, Email)>,
    pub subscriptions: BTreeSet<(Email, Email)>,
    pub blocks: BTreeSet<(Email, Email)>,
}

impl GraphState {
    pub fn friendship_key(pair: &UserPair) -> (Email, Email) {
        (pair.min().clone(), pair.max().clone())
    }
}

/// One mutex over the full graph. Mutations clone the state under the lock
/// and publish on commit, so readers never see a half-applied write.
pub type SharedGraphState = Arc<Mutex<GraphState>>;
