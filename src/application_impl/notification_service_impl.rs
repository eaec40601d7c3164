use crate::application_port::{NotificationService, RelationError};
use crate::domain_model::{self, Email};
use crate::domain_port::{BlockRepo, FriendshipRepo, SubscriptionRepo, UserRepo};
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct RealNotificationService {
    user_repo: Arc<dyn UserRepo>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    subscription_repo: Arc<dyn SubscriptionRepo>,
    block_repo: Arc<dyn BlockRepo>,
}

impl RealNotificationService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        subscription_repo: Arc<dyn SubscriptionRepo>,
        block_repo: Arc<dyn BlockRepo>,
    ) -> Self {
        Self {
            user_repo,
            friendship_repo,
            subscription_repo,
            block_repo,
        }
    }
}

#[async_trait::async_trait]
impl NotificationService for RealNotificationService {
    async fn resolve_recipients(
        &self,
        sender: &Email,
        text: &str,
    ) -> Result<Vec<Email>, RelationError> {
        if !self.user_repo.exists(sender).await? {
            return Err(RelationError::UserNotFound);
        }

        let mut recipients: BTreeSet<Email> = BTreeSet::new();
        recipients.extend(self.friendship_repo.friends_of(sender).await?);
        recipients.extend(self.subscription_repo.subscribers_of(sender).await?);

        // Mentions count only once their registration is confirmed.
        for mention in domain_model::scan_mentions(text) {
            if recipients.contains(&mention) {
                continue;
            }
            if self.user_repo.exists(&mention).await? {
                recipients.insert(mention);
            }
        }

        // A user who blocks the sender never receives, whatever set they
        // entered through.
        for blocker in self.block_repo.blockers_of(sender).await? {
            recipients.remove(&blocker);
        }

        Ok(recipients.into_iter().collect())
    }
}
