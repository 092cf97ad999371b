use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    database::DbPool,
    error::{Error, Result},
    models::users::{NewUser, User},
    queries::users,
};

use super::UserStore;

/// Postgres-backed store; each call borrows one connection from the pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = self.acquire().await?;
        users::list_users(&mut conn).await
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        let mut conn = self.acquire().await?;
        users::create_user(&mut conn, new_user).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>> {
        let mut conn = self.acquire().await?;
        users::delete_user(&mut conn, id).await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.acquire().await?;
        users::ping(&mut conn).await
    }
}
