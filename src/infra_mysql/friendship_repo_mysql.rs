use super::util::{downcast, is_dup_key};
use crate::application_port::RelationError;
use crate::domain_model::{Email, UserPair};
use crate::domain_port::{FriendshipRepo, StorageTx};
use sqlx::MySqlPool;

pub struct MySqlFriendshipRepo {
    pool: MySqlPool,
}

impl MySqlFriendshipRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MySqlFriendshipRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: &UserPair,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);

        let res = sqlx::query("INSERT INTO friendship (user_min, user_max) VALUES (?, ?)")
            .bind(pair.min())
            .bind(pair.max())
            .execute(tx.conn())
            .await;

        match res {
            Ok(_) => Ok(()),
            Err(e) if is_dup_key(&e) => Err(RelationError::AlreadyFriends),
            Err(e) => Err(RelationError::Store(format!("insert friendship: {e}"))),
        }
    }

    async fn delete(&self, pair: &UserPair) -> Result<(), RelationError> {
        sqlx::query("DELETE FROM friendship WHERE user_min = ? AND user_max = ?")
            .bind(pair.min())
            .bind(pair.max())
            .execute(&self.pool)
            .await
            .map_err(|e| RelationError::Store(format!("delete friendship: {e}")))?;

        Ok(())
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: &UserPair,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM friendship WHERE user_min = ? AND user_max = ?",
        )
        .bind(pair.min())
        .bind(pair.max())
        .fetch_one(tx.conn())
        .await
        .map_err(|e| RelationError::Store(format!("query friendship: {e}")))?;

        Ok(count > 0)
    }

    async fn friends_of(&self, email: &Email) -> Result<Vec<Email>, RelationError> {
        let friends = sqlx::query_scalar::<_, Email>(
            r#"
SELECT user_max AS friend FROM friendship WHERE user_min = ?
UNION
SELECT user_min AS friend FROM friendship WHERE user_max = ?
ORDER BY friend
"#,
        )
        .bind(email)
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::Store(format!("list friends: {e}")))?;

        Ok(friends)
    }
}
