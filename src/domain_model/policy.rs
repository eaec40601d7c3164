use crate::application_port::RelationError;

/// Snapshot of every relation fact for one ordered (actor, target) pair,
/// read within a single unit of work. The authorization functions below are
/// the whole per-pair state machine: given the snapshot, they decide whether
/// a transition is permitted, independent of storage and transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairFacts {
    pub friends: bool,
    pub actor_blocks_target: bool,
    pub target_blocks_actor: bool,
    pub actor_subscribed_to_target: bool,
}

/// Friend(A,B): no block may exist in either direction, and the pair must
/// not already be friends.
pub fn authorize_friend(facts: PairFacts) -> Result<(), RelationError> {
    if facts.actor_blocks_target || facts.target_blocks_actor {
        return Err(RelationError::Blocked);
    }
    if facts.friends {
        return Err(RelationError::AlreadyFriends);
    }
    Ok(())
}

/// Subscribe(S,T): only a block held by the subscriber is disqualifying.
/// A target who blocks the subscriber does not prevent the subscription;
/// suppression happens at notification time instead.
pub fn authorize_subscribe(facts: PairFacts) -> Result<(), RelationError> {
    if facts.actor_blocks_target {
        return Err(RelationError::Blocked);
    }
    if facts.actor_subscribed_to_target {
        return Err(RelationError::AlreadySubscribed);
    }
    Ok(())
}

/// Block(R,T): blocking is a hard reset of the relationship, so any
/// friendship or outgoing subscription must be torn down first. Friendship
/// is reported ahead of subscription when both conflict.
pub fn authorize_block(facts: PairFacts) -> Result<(), RelationError> {
    if facts.friends {
        return Err(RelationError::IsFriend);
    }
    if facts.actor_subscribed_to_target {
        return Err(RelationError::IsSubscribed);
    }
    Ok(())
}
