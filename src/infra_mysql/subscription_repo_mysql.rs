use super::util::{downcast, is_dup_key};
use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::{StorageTx, SubscriptionRepo};
use sqlx::MySqlPool;

pub struct MySqlSubscriptionRepo {
    pool: MySqlPool,
}

impl MySqlSubscriptionRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SubscriptionRepo for MySqlSubscriptionRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        subscriber: &Email,
        target: &Email,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);

        let res = sqlx::query("INSERT INTO subscription (subscriber, target) VALUES (?, ?)")
            .bind(subscriber)
            .bind(target)
            .execute(tx.conn())
            .await;

        match res {
            Ok(_) => Ok(()),
            Err(e) if is_dup_key(&e) => Err(RelationError::AlreadySubscribed),
            Err(e) => Err(RelationError::Store(format!("insert subscription: {e}"))),
        }
    }

    async fn delete(&self, subscriber: &Email, target: &Email) -> Result<(), RelationError> {
        sqlx::query("DELETE FROM subscription WHERE subscriber = ? AND target = ?")
            .bind(subscriber)
            .bind(target)
            .execute(&self.pool)
            .await
            .map_err(|e| RelationError::Store(format!("delete subscription: {e}")))?;

        Ok(())
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        subscriber: &Email,
        target: &Email,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM subscription WHERE subscriber = ? AND target = ?",
        )
        .bind(subscriber)
        .bind(target)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| RelationError::Store(format!("query subscription: {e}")))?;

        Ok(count > 0)
    }

    async fn subscribers_of(&self, email: &Email) -> Result<Vec<Email>, RelationError> {
        let subscribers = sqlx::query_scalar::<_, Email>(
            "SELECT subscriber FROM subscription WHERE target = ? ORDER BY subscriber",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::Store(format!("list subscribers: {e}")))?;

        Ok(subscribers)
    }
}
