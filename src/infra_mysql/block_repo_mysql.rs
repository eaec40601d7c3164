use super::util::{downcast, is_dup_key};
use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::{BlockRepo, StorageTx};
use sqlx::MySqlPool;

pub struct MySqlBlockRepo {
    pool: MySqlPool,
}

impl MySqlBlockRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BlockRepo for MySqlBlockRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        blocker: &Email,
        blocked: &Email,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);

        let res = sqlx::query("INSERT INTO block (blocker, blocked) VALUES (?, ?)")
            .bind(blocker)
            .bind(blocked)
            .execute(tx.conn())
            .await;

        match res {
            Ok(_) => Ok(()),
            Err(e) if is_dup_key(&e) => Err(RelationError::AlreadyBlocked),
            Err(e) => Err(RelationError::Store(format!("insert block: {e}"))),
        }
    }

    async fn delete(&self, blocker: &Email, blocked: &Email) -> Result<(), RelationError> {
        sqlx::query("DELETE FROM block WHERE blocker = ? AND blocked = ?")
            .bind(blocker)
            .bind(blocked)
            .execute(&self.pool)
            .await
            .map_err(|e| RelationError::Store(format!("delete block: {e}")))?;

        Ok(())
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        blocker: &Email,
        blocked: &Email,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM block WHERE blocker = ? AND blocked = ?")
                .bind(blocker)
                .bind(blocked)
                .fetch_one(tx.conn())
                .await
                .map_err(|e| RelationError::Store(format!("query block: {e}")))?;

        Ok(count > 0)
    }

    async fn blockers_of(&self, email: &Email) -> Result<Vec<Email>, RelationError> {
        let blockers = sqlx::query_scalar::<_, Email>(
            "SELECT blocker FROM block WHERE blocked = ? ORDER BY blocker",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::Store(format!("list blockers: {e}")))?;

        Ok(blockers)
    }
}
