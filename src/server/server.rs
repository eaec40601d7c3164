use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_mem::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;

pub struct Server {
    pub user_service: Arc<dyn UserService>,
    pub relationship_service: Arc<dyn RelationshipService>,
    pub notification_service: Arc<dyn NotificationService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let server = match settings.store.backend.as_str() {
            "mysql" => {
                let pool = Pool::<MySql>::connect(&settings.database.dsn).await?;

                let tx_manager: Arc<dyn TxManager> = Arc::new(MySqlTxManager::new(pool.clone()));
                let user_repo: Arc<dyn UserRepo> = Arc::new(MySqlUserRepo::new(pool.clone()));
                let friendship_repo: Arc<dyn FriendshipRepo> =
                    Arc::new(MySqlFriendshipRepo::new(pool.clone()));
                let subscription_repo: Arc<dyn SubscriptionRepo> =
                    Arc::new(MySqlSubscriptionRepo::new(pool.clone()));
                let block_repo: Arc<dyn BlockRepo> = Arc::new(MySqlBlockRepo::new(pool.clone()));

                Self::assemble(
                    user_repo,
                    friendship_repo,
                    subscription_repo,
                    block_repo,
                    tx_manager,
                    Some(pool),
                )
            }
            "memory" => {
                let state = SharedGraphState::default();

                let tx_manager: Arc<dyn TxManager> = Arc::new(MemTxManager::new(state.clone()));
                let user_repo: Arc<dyn UserRepo> = Arc::new(MemUserRepo::new(state.clone()));
                let friendship_repo: Arc<dyn FriendshipRepo> =
                    Arc::new(MemFriendshipRepo::new(state.clone()));
                let subscription_repo: Arc<dyn SubscriptionRepo> =
                    Arc::new(MemSubscriptionRepo::new(state.clone()));
                let block_repo: Arc<dyn BlockRepo> = Arc::new(MemBlockRepo::new(state));

                Self::assemble(
                    user_repo,
                    friendship_repo,
                    subscription_repo,
                    block_repo,
                    tx_manager,
                    None,
                )
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        info!("server started");

        Ok(server)
    }

    fn assemble(
        user_repo: Arc<dyn UserRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        subscription_repo: Arc<dyn SubscriptionRepo>,
        block_repo: Arc<dyn BlockRepo>,
        tx_manager: Arc<dyn TxManager>,
        pool: Option<Pool<MySql>>,
    ) -> Self {
        let user_service: Arc<dyn UserService> = Arc::new(RealUserService::new(
            user_repo.clone(),
            tx_manager.clone(),
        ));

        let relationship_service: Arc<dyn RelationshipService> =
            Arc::new(RealRelationshipService::new(
                user_repo.clone(),
                friendship_repo.clone(),
                subscription_repo.clone(),
                block_repo.clone(),
                tx_manager,
            ));

        let notification_service: Arc<dyn NotificationService> =
            Arc::new(RealNotificationService::new(
                user_repo,
                friendship_repo,
                subscription_repo,
                block_repo,
            ));

        Self {
            user_service,
            relationship_service,
            notification_service,
            pool,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
