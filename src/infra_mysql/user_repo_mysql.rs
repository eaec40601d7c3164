use super::util::{downcast, is_dup_key};
use crate::application_port::RelationError;
use crate::domain_model::Email;
use crate::domain_port::{StorageTx, UserRepo};
use sqlx::MySqlPool;

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &Email,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx);

        let res = sqlx::query("INSERT INTO user (email) VALUES (?)")
            .bind(email)
            .execute(tx.conn())
            .await;

        match res {
            Ok(_) => Ok(()),
            Err(e) if is_dup_key(&e) => Err(RelationError::DuplicateUser),
            Err(e) => Err(RelationError::Store(format!("insert user: {e}"))),
        }
    }

    async fn exists(&self, email: &Email) -> Result<bool, RelationError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM user WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RelationError::Store(format!("query user: {e}")))?;

        Ok(count > 0)
    }

    async fn exists_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &Email,
    ) -> Result<bool, RelationError> {
        let tx = downcast(tx);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM user WHERE email = ?")
            .bind(email)
            .fetch_one(tx.conn())
            .await
            .map_err(|e| RelationError::Store(format!("query user: {e}")))?;

        Ok(count > 0)
    }
}
