use crate::application_port::{RelationError, RelationshipService};
use crate::domain_model::{self, Email, PairFacts, UserPair};
use crate::domain_port::{BlockRepo, FriendshipRepo, StorageTx, SubscriptionRepo, TxManager, UserRepo};
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct RealRelationshipService {
    user_repo: Arc<dyn UserRepo>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    subscription_repo: Arc<dyn SubscriptionRepo>,
    block_repo: Arc<dyn BlockRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealRelationshipService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        subscription_repo: Arc<dyn SubscriptionRepo>,
        block_repo: Arc<dyn BlockRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            user_repo,
            friendship_repo,
            subscription_repo,
            block_repo,
            tx_manager,
        }
    }

    async fn begin(&self) -> Result<Box<dyn StorageTx<'_> + '_>, RelationError> {
        self.tx_manager
            .begin()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))
    }

    async fn require_both_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        a: &Email,
        b: &Email,
    ) -> Result<(), RelationError> {
        if !self.user_repo.exists_in_tx(&mut *tx, a).await?
            || !self.user_repo.exists_in_tx(&mut *tx, b).await?
        {
            return Err(RelationError::UserNotFound);
        }
        Ok(())
    }

    /// The full relation snapshot for one ordered (actor, target) pair,
    /// read inside the caller's unit of work.
    async fn load_pair_facts(
        &self,
        tx: &mut dyn StorageTx<'_>,
        actor: &Email,
        target: &Email,
    ) -> Result<PairFacts, RelationError> {
        let pair = UserPair::new(actor.clone(), target.clone());
        Ok(PairFacts {
            friends: self.friendship_repo.exists_in_tx(&mut *tx, &pair).await?,
            actor_blocks_target: self.block_repo.exists_in_tx(&mut *tx, actor, target).await?,
            target_blocks_actor: self.block_repo.exists_in_tx(&mut *tx, target, actor).await?,
            actor_subscribed_to_target: self
                .subscription_repo
                .exists_in_tx(&mut *tx, actor, target)
                .await?,
        })
    }
}

#[async_trait::async_trait]
impl RelationshipService for RealRelationshipService {
    async fn add_friend(&self, a: &Email, b: &Email) -> Result<(), RelationError> {
        if a == b {
            return Err(RelationError::InvalidInput);
        }

        let mut tx = self.begin().await?;

        self.require_both_in_tx(&mut *tx, a, b).await?;
        let facts = self.load_pair_facts(&mut *tx, a, b).await?;
        domain_model::authorize_friend(facts)?;

        let pair = UserPair::new(a.clone(), b.clone());
        self.friendship_repo.insert_in_tx(&mut *tx, &pair).await?;

        tx.commit()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))?;

        Ok(())
    }

    async fn remove_friend(&self, a: &Email, b: &Email) -> Result<(), RelationError> {
        if a == b {
            return Err(RelationError::InvalidInput);
        }

        let pair = UserPair::new(a.clone(), b.clone());
        self.friendship_repo.delete(&pair).await
    }

    async fn list_friends(&self, email: &Email) -> Result<Vec<Email>, RelationError> {
        if !self.user_repo.exists(email).await? {
            return Err(RelationError::UserNotFound);
        }
        self.friendship_repo.friends_of(email).await
    }

    async fn common_friends(&self, a: &Email, b: &Email) -> Result<Vec<Email>, RelationError> {
        if !self.user_repo.exists(a).await? || !self.user_repo.exists(b).await? {
            return Err(RelationError::UserNotFound);
        }

        let of_a: BTreeSet<Email> = self.friendship_repo.friends_of(a).await?.into_iter().collect();
        let of_b: BTreeSet<Email> = self.friendship_repo.friends_of(b).await?.into_iter().collect();

        Ok(of_a.intersection(&of_b).cloned().collect())
    }

    async fn subscribe(&self, subscriber: &Email, target: &Email) -> Result<(), RelationError> {
        if subscriber == target {
            return Err(RelationError::InvalidInput);
        }

        let mut tx = self.begin().await?;

        self.require_both_in_tx(&mut *tx, subscriber, target).await?;
        let facts = self.load_pair_facts(&mut *tx, subscriber, target).await?;
        domain_model::authorize_subscribe(facts)?;

        self.subscription_repo
            .insert_in_tx(&mut *tx, subscriber, target)
            .await?;

        tx.commit()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))?;

        Ok(())
    }

    async fn unsubscribe(&self, subscriber: &Email, target: &Email) -> Result<(), RelationError> {
        self.subscription_repo.delete(subscriber, target).await
    }

    async fn block(&self, blocker: &Email, target: &Email) -> Result<(), RelationError> {
        if blocker == target {
            return Err(RelationError::InvalidInput);
        }

        let mut tx = self.begin().await?;

        self.require_both_in_tx(&mut *tx, blocker, target).await?;
        let facts = self.load_pair_facts(&mut *tx, blocker, target).await?;
        domain_model::authorize_block(facts)?;

        self.block_repo.insert_in_tx(&mut *tx, blocker, target).await?;

        tx.commit()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))?;

        Ok(())
    }

    async fn unblock(&self, blocker: &Email, target: &Email) -> Result<(), RelationError> {
        self.block_repo.delete(blocker, target).await
    }
}
